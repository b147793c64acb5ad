//! Weapon attribute value types

mod attack;
mod weapon;

pub use attack::Attack;
pub use weapon::WeaponAttributes;

use serde::{Deserialize, Serialize};

/// A definition as loaded, before inheritance is resolved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDefinition {
    /// Parent definition reference, as written in the source document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Attributes declared at this level; may be absent when only a parent is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<WeaponAttributes>,
}

impl RawDefinition {
    /// Create a root definition with no parent
    pub fn new(attributes: WeaponAttributes) -> Self {
        RawDefinition {
            parent: None,
            attributes: Some(attributes),
        }
    }

    /// Create a definition inheriting from `parent`
    pub fn inheriting(parent: impl Into<String>, attributes: WeaponAttributes) -> Self {
        RawDefinition {
            parent: Some(parent.into()),
            attributes: Some(attributes),
        }
    }

    /// Create a definition that only names a parent
    pub fn parent_only(parent: impl Into<String>) -> Self {
        RawDefinition {
            parent: Some(parent.into()),
            attributes: None,
        }
    }
}
