//! Parser-boundary document types.
//!
//! The external grammar/parser produces an already-parsed document
//! with this shape; the assembler consumes it as-is and performs no
//! structural re-validation. The serde field names are the wire
//! contract with that parser (`entityList`, `tableName`,
//! `injectedfield`, `javadoc`, `constant`), and every field defaults
//! so partial documents deserialize.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An already-parsed source tree: applications, entities, enums,
/// relationships, options, and the constants table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub applications: Vec<ApplicationDecl>,
    pub enums: Vec<EnumDecl>,
    pub entities: Vec<EntityDecl>,
    pub relationships: Vec<RelationshipDecl>,
    /// Constant name -> literal value, resolved during assembly.
    pub constants: BTreeMap<String, String>,

    // Unary option targets.
    pub no_client: OptionTargets,
    pub no_server: OptionTargets,
    pub no_fluent_method: OptionTargets,
    pub filter: OptionTargets,

    // Binary option targets, keyed by option value.
    pub dto: BTreeMap<String, OptionTargets>,
    pub pagination: BTreeMap<String, OptionTargets>,
    pub service: BTreeMap<String, OptionTargets>,
    pub search: BTreeMap<String, OptionTargets>,
    pub angular_suffix: BTreeMap<String, OptionTargets>,
    pub client_root_folder: BTreeMap<String, OptionTargets>,
    pub microservice: BTreeMap<String, OptionTargets>,
}

/// One `application { ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationDecl {
    pub config: BTreeMap<String, String>,
    pub entities: ApplicationEntities,
}

/// Entity membership of an application block. The list may be the
/// wildcard marker `["*"]`, expanded during assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationEntities {
    pub entity_list: Vec<String>,
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<String>,
    pub javadoc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityDecl {
    pub name: String,
    pub table_name: Option<String>,
    pub javadoc: Option<String>,
    pub body: Vec<FieldDecl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub javadoc: Option<String>,
    pub validations: Vec<ValidationDecl>,
}

/// A single validation. When `constant` is set the value is a named
/// reference into the document's constants table rather than a literal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationDecl {
    pub key: String,
    pub value: Option<String>,
    pub constant: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipDecl {
    pub cardinality: String,
    pub from: RelationshipSideDecl,
    pub to: RelationshipSideDecl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipSideDecl {
    pub name: String,
    #[serde(rename = "injectedfield")]
    pub injected_field: Option<String>,
    pub required: bool,
    pub javadoc: Option<String>,
}

/// Target set of an option: the entities it applies to, minus the
/// excluded subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionTargets {
    pub list: Vec<String>,
    pub excluded: Vec<String>,
}
