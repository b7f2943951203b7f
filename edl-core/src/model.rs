//! Domain object graph produced by the assembler.
//!
//! This module defines the fully cross-referenced model handed to the
//! downstream code generator. It is plain data: the graph is built
//! once per assembly call and is not updated afterwards. Name-keyed
//! maps are case-sensitive; relationships and options reference
//! entities by their validated names, never by copies.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Table name given to the implicitly synthesized `User` entity.
pub const USER_TABLE_NAME: &str = "jhi_user";

/// Target application flavor, supplied as an ambient assembly parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    Monolith,
    Microservice,
    Gateway,
    Uaa,
}

impl FromStr for ApplicationType {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "monolith" => Ok(ApplicationType::Monolith),
            "microservice" => Ok(ApplicationType::Microservice),
            "gateway" => Ok(ApplicationType::Gateway),
            "uaa" => Ok(ApplicationType::Uaa),
            _ => Err(CoreError::UnknownApplicationType(text.to_string())),
        }
    }
}

/// Relationship multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Normalize the surface keyword spelling into the internal kind.
    pub fn from_keyword(keyword: &str) -> Result<Self, CoreError> {
        match keyword {
            "OneToOne" => Ok(Cardinality::OneToOne),
            "OneToMany" => Ok(Cardinality::OneToMany),
            "ManyToOne" => Ok(Cardinality::ManyToOne),
            "ManyToMany" => Ok(Cardinality::ManyToMany),
            _ => Err(CoreError::UnknownCardinality(keyword.to_string())),
        }
    }
}

/// Root container of the assembled graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    pub applications: BTreeMap<String, Application>,
    pub entities: BTreeMap<String, Entity>,
    pub enums: BTreeMap<String, EnumDef>,
    pub relationships: Vec<Relationship>,
    pub options: Vec<ModelOption>,
}

/// One application: its configuration bag plus the ordered,
/// deduplicated names of the entities it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub config: BTreeMap<String, String>,
    pub entity_names: Vec<String>,
}

impl Application {
    /// Append an entity name, keeping insertion order and dropping
    /// duplicates.
    pub fn add_entity_name(&mut self, name: &str) {
        if !self.entity_names.iter().any(|existing| existing == name) {
            self.entity_names.push(name.to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    pub table_name: String,
    pub comment: Option<String>,
    pub fields: BTreeMap<String, Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub comment: Option<String>,
    pub validations: BTreeMap<String, Validation>,
}

/// A validation attached to a field. The value is always a resolved
/// literal; named-constant references are substituted at assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    pub kind: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
    pub comment: Option<String>,
}

/// Directional edge between two entities already present in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub cardinality: Cardinality,
    pub from: RelationshipEnd,
    pub to: RelationshipEnd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEnd {
    /// Name of the endpoint entity; a key into `Model::entities`.
    pub entity: String,
    pub injected_field: Option<String>,
    pub required: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOptionName {
    SkipClient,
    SkipServer,
    NoFluentMethod,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOptionName {
    Dto,
    Pagination,
    Service,
    Search,
    AngularSuffix,
    ClientRootFolder,
    Microservice,
}

/// An option applied to a set of entities, referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelOption {
    /// A flag over a target set, with an excluded subset.
    Unary {
        name: UnaryOptionName,
        entities: Vec<String>,
        excluded: Vec<String>,
    },
    /// A named key/value pair over a target set, with an excluded
    /// subset.
    Binary {
        name: BinaryOptionName,
        value: String,
        entities: Vec<String>,
        excluded: Vec<String>,
    },
}

/// Normalize a name to start with a lower-case letter.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
