//! weapon_core - Weapon attribute inheritance and registry distribution
//!
//! This library provides:
//! - WeaponAttributes / Attack: Per-weapon combat attribute values
//! - Resolution: Folding a definition's parent chain into one value
//! - WeaponRegistry: Atomically published store of resolved attributes
//! - Payload codec: Encoding the registry for consumers and decoding it back

pub mod attributes;
pub mod config;
pub mod registry;
pub mod resolve;
pub mod types;

pub mod prelude;

// Re-export core types for convenience
pub use attributes::{Attack, RawDefinition, WeaponAttributes};
pub use config::{ConfigError, DefinitionSet, RegistryConfig};
pub use registry::{LoadReport, PayloadError, WeaponRegistry};
pub use resolve::{merge_override, resolve, ResolveError};
pub use types::{IdError, WeaponId};
