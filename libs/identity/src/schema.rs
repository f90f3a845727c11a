//! Host-facing identity schema derived from a descriptor.

use serde::{Deserialize, Serialize};

use crate::IdentityAttribute;

/// Whether an identity attribute must be supplied on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportRequirement {
    RequiredForImport,
    OptionalForImport,
}

/// Schema entry for one identity attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    pub name: String,
    pub requirement: ImportRequirement,
}

impl SchemaAttribute {
    /// Returns true if the attribute must be supplied on import.
    pub fn is_required(&self) -> bool {
        self.requirement == ImportRequirement::RequiredForImport
    }
}

/// Identity schema in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentitySchema(Vec<SchemaAttribute>);

impl IdentitySchema {
    /// Builds the schema for a descriptor's attributes.
    pub fn from_attributes(attributes: &[IdentityAttribute]) -> Self {
        Self(
            attributes
                .iter()
                .map(|attr| SchemaAttribute {
                    name: attr.name.clone(),
                    requirement: if attr.required {
                        ImportRequirement::RequiredForImport
                    } else {
                        ImportRequirement::OptionalForImport
                    },
                })
                .collect(),
        )
    }

    /// Looks up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&SchemaAttribute> {
        self.0.iter().find(|a| a.name == name)
    }

    /// Iterates attributes in descriptor order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaAttribute> {
        self.0.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the schema has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
