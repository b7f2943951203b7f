//! Semantic assembly of a parsed document into the domain model.
//!
//! The single public operation is [`assemble`]. It runs a fixed,
//! ordered pipeline over the document: applications (with wildcard
//! expansion and exclusion), enums, entities and fields (defaulting,
//! `id` dropping, constant resolution), the implicit `User` entity,
//! relationships (endpoint resolution and injected-field defaulting),
//! and finally options. Later steps read state produced by earlier
//! steps and never mutate earlier results.
//!
//! All working state lives in a per-call [`Assembler`] value, so
//! concurrent assemblies never share anything.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::document::{Document, OptionTargets};
use crate::error::CoreError;
use crate::model::{
    Application, ApplicationType, BinaryOptionName, Cardinality, Entity, EnumDef, Field, Model,
    ModelOption, Relationship, RelationshipEnd, UnaryOptionName, USER_TABLE_NAME, Validation,
    lower_first,
};

/// Configuration key receiving the externally supplied generator
/// version override.
const GENERATOR_VERSION_KEY: &str = "generatorVersion";

/// Configuration key naming an application.
const BASE_NAME_KEY: &str = "baseName";

/// Assemble a parsed document into the domain object graph.
///
/// Fails with [`CoreError::MissingDocument`] when no document is
/// given; all other document shapes are assumed well-formed per the
/// parser contract. A relationship endpoint naming an entity that is
/// neither declared nor the implicit `User` fails fast with
/// [`CoreError::UnknownEntity`].
pub fn assemble(
    document: Option<&Document>,
    application_type: ApplicationType,
    application_name: &str,
    generator_version: Option<&str>,
) -> Result<Model, CoreError> {
    let document = document.ok_or(CoreError::MissingDocument)?;
    Assembler::new(document, application_type, application_name, generator_version).run()
}

/// Working state of one assembly call.
struct Assembler<'a> {
    document: &'a Document,
    application_type: ApplicationType,
    application_name: &'a str,
    generator_version: Option<&'a str>,
    model: Model,
    /// Entity name -> names of the applications that own it.
    applications_per_entity: BTreeMap<String, Vec<String>>,
}

impl<'a> Assembler<'a> {
    fn new(
        document: &'a Document,
        application_type: ApplicationType,
        application_name: &'a str,
        generator_version: Option<&'a str>,
    ) -> Self {
        Assembler {
            document,
            application_type,
            application_name,
            generator_version,
            model: Model::default(),
            applications_per_entity: BTreeMap::new(),
        }
    }

    fn run(mut self) -> Result<Model, CoreError> {
        self.install_applications();
        self.install_enums();
        self.install_entities()?;
        self.install_implicit_user();
        self.install_relationships()?;
        self.install_options();
        Ok(self.model)
    }

    /// Step 1: applications, with wildcard expansion, exclusions, the
    /// generator-version override, and the entity ownership index.
    fn install_applications(&mut self) {
        let document = self.document;
        let declared: Vec<&String> = document.entities.iter().map(|decl| &decl.name).collect();

        for decl in &document.applications {
            let mut config = decl.config.clone();
            if let Some(version) = self.generator_version {
                config.insert(GENERATOR_VERSION_KEY.to_string(), version.to_string());
            }

            let mut application = Application {
                config,
                entity_names: Vec::new(),
            };
            let wildcard = decl.entities.entity_list.iter().any(|name| name == "*");
            let members: Vec<&String> = if wildcard {
                declared.clone()
            } else {
                decl.entities.entity_list.iter().collect()
            };
            for name in members {
                if decl.entities.excluded.iter().any(|excluded| excluded == name) {
                    continue;
                }
                application.add_entity_name(name);
            }

            let name = application
                .config
                .get(BASE_NAME_KEY)
                .cloned()
                .unwrap_or_else(|| self.application_name.to_string());
            for entity_name in &application.entity_names {
                self.applications_per_entity
                    .entry(entity_name.clone())
                    .or_default()
                    .push(name.clone());
            }
            self.model.applications.insert(name, application);
        }
    }

    /// Step 2: enums are copied verbatim.
    fn install_enums(&mut self) {
        for decl in &self.document.enums {
            self.model.enums.insert(decl.name.clone(), EnumDef {
                name: decl.name.clone(),
                values: decl.values.clone(),
                comment: decl.javadoc.as_deref().map(format_comment),
            });
        }
    }

    /// Step 3: entities and fields. Table names default to the entity
    /// name, field names are lower-first normalized, `id` fields are
    /// implicit and never materialized, and named-constant validation
    /// values are resolved against the constants table.
    fn install_entities(&mut self) -> Result<(), CoreError> {
        let document = self.document;
        for decl in &document.entities {
            let mut entity = Entity {
                name: decl.name.clone(),
                table_name: decl.table_name.clone().unwrap_or_else(|| decl.name.clone()),
                comment: decl.javadoc.as_deref().map(format_comment),
                fields: BTreeMap::new(),
            };

            for field_decl in &decl.body {
                let name = lower_first(&field_decl.name);
                if name.eq_ignore_ascii_case("id") {
                    // The primary key is provided by the generator.
                    continue;
                }

                let mut validations = BTreeMap::new();
                for validation in &field_decl.validations {
                    let value = if validation.constant {
                        let reference = validation.value.as_deref().unwrap_or_default();
                        Some(self.resolve_constant(reference)?)
                    } else {
                        validation.value.clone()
                    };
                    validations.insert(validation.key.clone(), Validation {
                        kind: validation.key.clone(),
                        value,
                    });
                }

                entity.fields.insert(name.clone(), Field {
                    name,
                    field_type: field_decl.field_type.clone(),
                    comment: field_decl.javadoc.as_deref().map(format_comment),
                    validations,
                });
            }

            self.model.entities.insert(entity.name.clone(), entity);
        }
        Ok(())
    }

    fn resolve_constant(&self, reference: &str) -> Result<String, CoreError> {
        self.document
            .constants
            .get(reference)
            .cloned()
            .ok_or_else(|| CoreError::UnknownConstant(reference.to_string()))
    }

    /// Step 4: synthesize the `User` entity when relationships target
    /// it and it was not declared. Must run after entity installation
    /// and before relationship installation.
    fn install_implicit_user(&mut self) {
        if self.model.entities.contains_key("User") {
            return;
        }
        let referenced = self.document.relationships.iter().any(|relationship| {
            relationship.from.name.eq_ignore_ascii_case("user")
                || relationship.to.name.eq_ignore_ascii_case("user")
        });
        if !referenced {
            return;
        }
        debug!("synthesizing implicit User entity");
        self.model.entities.insert("User".to_string(), Entity {
            name: "User".to_string(),
            table_name: USER_TABLE_NAME.to_string(),
            comment: None,
            fields: BTreeMap::new(),
        });
    }

    /// Step 5: relationships. Endpoints resolve by exact name against
    /// the installed entities; when neither side names an injected
    /// field, the from side defaults to the lower-first form of the
    /// to entity's name.
    fn install_relationships(&mut self) -> Result<(), CoreError> {
        let document = self.document;
        for decl in &document.relationships {
            let cardinality = Cardinality::from_keyword(&decl.cardinality)?;
            let mut from = RelationshipEnd {
                entity: self.resolve_endpoint(&decl.from.name)?,
                injected_field: decl.from.injected_field.clone(),
                required: decl.from.required,
                comment: decl.from.javadoc.as_deref().map(format_comment),
            };
            let to = RelationshipEnd {
                entity: self.resolve_endpoint(&decl.to.name)?,
                injected_field: decl.to.injected_field.clone(),
                required: decl.to.required,
                comment: decl.to.javadoc.as_deref().map(format_comment),
            };

            if from.injected_field.is_none() && to.injected_field.is_none() {
                from.injected_field = Some(lower_first(&to.entity));
            }

            self.model.relationships.push(Relationship {
                cardinality,
                from,
                to,
            });
        }
        Ok(())
    }

    /// Exact-name endpoint resolution, with the implicit `User` as the
    /// single case-insensitive special case.
    fn resolve_endpoint(&self, name: &str) -> Result<String, CoreError> {
        if self.model.entities.contains_key(name) {
            return Ok(name.to_string());
        }
        if name.eq_ignore_ascii_case("user") && self.model.entities.contains_key("User") {
            return Ok("User".to_string());
        }
        Err(CoreError::UnknownEntity(name.to_string()))
    }

    /// Step 6: options. Unary options are installed only when their
    /// target list is non-empty; binary options once per
    /// (name, value) pair, with the microservice special cases.
    fn install_options(&mut self) {
        let document = self.document;

        let unary: [(UnaryOptionName, &OptionTargets); 4] = [
            (UnaryOptionName::SkipClient, &document.no_client),
            (UnaryOptionName::SkipServer, &document.no_server),
            (UnaryOptionName::NoFluentMethod, &document.no_fluent_method),
            (UnaryOptionName::Filter, &document.filter),
        ];
        for (name, targets) in unary {
            if targets.list.is_empty() {
                continue;
            }
            self.model.options.push(ModelOption::Unary {
                name,
                entities: targets.list.clone(),
                excluded: targets.excluded.clone(),
            });
        }

        let binary: [(BinaryOptionName, &BTreeMap<String, OptionTargets>); 7] = [
            (BinaryOptionName::Dto, &document.dto),
            (BinaryOptionName::Pagination, &document.pagination),
            (BinaryOptionName::Service, &document.service),
            (BinaryOptionName::Search, &document.search),
            (BinaryOptionName::AngularSuffix, &document.angular_suffix),
            (BinaryOptionName::ClientRootFolder, &document.client_root_folder),
            (BinaryOptionName::Microservice, &document.microservice),
        ];
        for (name, values) in binary {
            for (value, targets) in values {
                if name == BinaryOptionName::ClientRootFolder
                    && self.application_type == ApplicationType::Microservice
                {
                    warn!(
                        value = %value,
                        "clientRootFolder has no effect in a microservice application, skipping"
                    );
                    continue;
                }
                self.model.options.push(ModelOption::Binary {
                    name,
                    value: value.clone(),
                    entities: targets.list.clone(),
                    excluded: targets.excluded.clone(),
                });
            }
        }

        // A standalone microservice application exports all of its
        // entities under its own name unless told otherwise.
        if self.application_type == ApplicationType::Microservice
            && document.microservice.is_empty()
        {
            let entities: Vec<String> = document
                .entities
                .iter()
                .map(|decl| decl.name.clone())
                .collect();
            self.model.options.push(ModelOption::Binary {
                name: BinaryOptionName::Microservice,
                value: self.application_name.to_string(),
                entities,
                excluded: Vec::new(),
            });
        }
    }
}

/// Strip javadoc-style decoration from a documentation block: leading
/// `*` runs per line and surrounding blank lines.
fn format_comment(raw: &str) -> String {
    let mut lines: Vec<&str> = raw
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim_end_matches('*').trim())
        .collect();
    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
