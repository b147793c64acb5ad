//! Prelude module for convenient imports
//!
//! ```rust
//! use weapon_core::prelude::*;
//! ```

// Attribute values
pub use crate::attributes::{Attack, RawDefinition, WeaponAttributes};
pub use crate::types::WeaponId;

// Resolution
pub use crate::resolve::{merge_override, resolve, ResolveError};

// Registry
pub use crate::registry::{LoadReport, PayloadError, WeaponRegistry};

// Config
pub use crate::config::{load_definitions, RegistryConfig};
