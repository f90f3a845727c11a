//! Identity descriptors: which attributes identify a resource kind.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::DescriptorError;

/// Name of the primary identifier field.
pub const ID_ATTR: &str = "id";

/// Name of the account scope attribute.
pub const ACCOUNT_ID_ATTR: &str = "account_id";

/// Name of the region attribute.
pub const REGION_ATTR: &str = "region";

/// Default name of the ARN attribute.
const DEFAULT_ARN_ATTR: &str = "arn";

/// How an identity attribute is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeRole {
    /// Filled from, and validated against, the ambient account.
    AccountScope,
    /// Filled from the ambient region; copied into state on import.
    Region,
    /// Copied between resource state and identity record.
    #[default]
    Plain,
}

impl AttributeRole {
    /// Infers the role from a well-known attribute name.
    pub fn from_name(name: &str) -> Self {
        match name {
            ACCOUNT_ID_ATTR => Self::AccountScope,
            REGION_ATTR => Self::Region,
            _ => Self::Plain,
        }
    }
}

impl std::fmt::Display for AttributeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeRole::AccountScope => write!(f, "account_scope"),
            AttributeRole::Region => write!(f, "region"),
            AttributeRole::Plain => write!(f, "plain"),
        }
    }
}

/// One attribute of a resource identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAttribute")]
pub struct IdentityAttribute {
    pub name: String,
    pub required: bool,
    pub role: AttributeRole,
}

/// Wire form of [`IdentityAttribute`]; the role may be left out and is then
/// inferred from the name.
#[derive(Deserialize)]
struct RawAttribute {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    role: Option<AttributeRole>,
}

impl From<RawAttribute> for IdentityAttribute {
    fn from(raw: RawAttribute) -> Self {
        let role = raw
            .role
            .unwrap_or_else(|| AttributeRole::from_name(&raw.name));
        Self {
            name: raw.name,
            required: raw.required,
            role,
        }
    }
}

impl IdentityAttribute {
    /// A required plain attribute.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            role: AttributeRole::Plain,
        }
    }

    /// An optional plain attribute.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            role: AttributeRole::Plain,
        }
    }

    /// The optional `account_id` scope attribute.
    pub fn account_id() -> Self {
        Self {
            name: ACCOUNT_ID_ATTR.to_string(),
            required: false,
            role: AttributeRole::AccountScope,
        }
    }

    /// The optional `region` attribute.
    pub fn region() -> Self {
        Self {
            name: REGION_ATTR.to_string(),
            required: false,
            role: AttributeRole::Region,
        }
    }
}

/// Declarative description of a resource kind's identity.
///
/// Defined once per resource kind and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDescriptor {
    pub attributes: Vec<IdentityAttribute>,

    /// The resource is not scoped to a region.
    #[serde(default)]
    pub global: bool,

    /// At most one instance exists per scope.
    #[serde(default)]
    pub singleton: bool,

    /// The identity is a single ARN attribute.
    #[serde(default)]
    pub is_arn: bool,

    #[serde(default = "default_arn_attribute")]
    pub arn_attribute: String,

    /// Attribute whose resolved value is mirrored into the primary identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_shadow_attribute: Option<String>,
}

fn default_arn_attribute() -> String {
    DEFAULT_ARN_ATTR.to_string()
}

impl IdentityDescriptor {
    fn base(attributes: Vec<IdentityAttribute>, global: bool) -> Self {
        Self {
            attributes,
            global,
            singleton: false,
            is_arn: false,
            arn_attribute: default_arn_attribute(),
            id_shadow_attribute: None,
        }
    }

    /// A regional resource identified by `account_id`, `region` and the given
    /// attributes.
    pub fn parameterized(attributes: impl IntoIterator<Item = IdentityAttribute>) -> Self {
        let mut attrs = vec![IdentityAttribute::account_id(), IdentityAttribute::region()];
        attrs.extend(attributes);
        Self::base(attrs, false)
    }

    /// A global resource identified by `account_id` and the given attributes.
    pub fn global_parameterized(attributes: impl IntoIterator<Item = IdentityAttribute>) -> Self {
        let mut attrs = vec![IdentityAttribute::account_id()];
        attrs.extend(attributes);
        Self::base(attrs, true)
    }

    /// A global resource identified by an ARN.
    pub fn global_arn(arn_attribute: impl Into<String>) -> Self {
        let arn_attribute = arn_attribute.into();
        Self {
            is_arn: true,
            attributes: vec![IdentityAttribute::required(arn_attribute.clone())],
            arn_attribute,
            ..Self::base(Vec::new(), true)
        }
    }

    /// A regional resource identified by an ARN, with an optional region
    /// override.
    pub fn regional_arn(arn_attribute: impl Into<String>) -> Self {
        let arn_attribute = arn_attribute.into();
        Self {
            is_arn: true,
            attributes: vec![
                IdentityAttribute::required(arn_attribute.clone()),
                IdentityAttribute::region(),
            ],
            arn_attribute,
            ..Self::base(Vec::new(), false)
        }
    }

    /// One instance per account.
    pub fn global_singleton() -> Self {
        Self {
            singleton: true,
            ..Self::base(vec![IdentityAttribute::account_id()], true)
        }
    }

    /// One instance per account and region.
    pub fn regional_singleton() -> Self {
        Self {
            singleton: true,
            ..Self::base(
                vec![IdentityAttribute::account_id(), IdentityAttribute::region()],
                false,
            )
        }
    }

    /// Mirrors `name` into the primary identifier when it is resolved.
    #[must_use]
    pub fn with_id_shadow(mut self, name: impl Into<String>) -> Self {
        self.id_shadow_attribute = Some(name.into());
        self
    }

    /// Returns the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&IdentityAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns true if `name` is the shadow attribute.
    pub fn is_id_shadow(&self, name: &str) -> bool {
        self.id_shadow_attribute.as_deref() == Some(name)
    }

    /// Checks the descriptor's invariants.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        let mut seen = HashSet::new();
        for attr in &self.attributes {
            if attr.name.is_empty() {
                return Err(DescriptorError::EmptyName);
            }
            if !seen.insert(attr.name.as_str()) {
                return Err(DescriptorError::DuplicateAttribute(attr.name.clone()));
            }
        }

        if self.is_arn && self.singleton {
            return Err(DescriptorError::ConflictingKinds);
        }

        if self.is_arn {
            match self.attribute(&self.arn_attribute) {
                Some(attr) if attr.required && attr.role == AttributeRole::Plain => {}
                _ => return Err(DescriptorError::MissingArnAttribute(self.arn_attribute.clone())),
            }
            if let Some(extra) = self
                .attributes
                .iter()
                .find(|a| a.required && a.name != self.arn_attribute)
            {
                return Err(DescriptorError::ExtraRequiredAttribute(extra.name.clone()));
            }
        }

        if self.singleton {
            let scope_role = if self.global {
                AttributeRole::AccountScope
            } else {
                AttributeRole::Region
            };
            let mut scopes = self.attributes.iter().filter(|a| a.role == scope_role);
            scopes.next();
            if let Some(extra) = scopes.next() {
                return Err(DescriptorError::InvalidSingletonScope(extra.name.clone()));
            }
            if let Some(required) = self.attributes.iter().find(|a| a.required) {
                return Err(DescriptorError::InvalidSingletonScope(required.name.clone()));
            }
        }

        if let Some(shadow) = &self.id_shadow_attribute {
            match self.attribute(shadow) {
                Some(attr) if attr.role == AttributeRole::Plain => {}
                _ => return Err(DescriptorError::InvalidShadowAttribute(shadow.clone())),
            }
        }

        Ok(())
    }
}
