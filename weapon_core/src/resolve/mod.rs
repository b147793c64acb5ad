//! Inheritance resolution
//!
//! A definition is resolved by walking its parent chain up to the root and
//! folding the chain, root first, with [`merge_override`] starting from
//! [`WeaponAttributes::empty`].

mod chain;
mod merge;

pub use chain::collect_chain;
pub use merge::{merge_attack, merge_override};

use crate::attributes::{RawDefinition, WeaponAttributes};
use crate::types::{IdError, WeaponId};
use std::collections::HashMap;
use thiserror::Error;

/// Default cap on parent hops followed for a single definition
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Failure to resolve a single definition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("definition '{0}' not found")]
    NotFound(WeaponId),
    #[error("circular inheritance: {}", format_path(.path))]
    Cycle { path: Vec<WeaponId> },
    #[error("inheritance chain of '{id}' exceeds {depth} levels")]
    TooDeep { id: WeaponId, depth: usize },
    #[error("definition '{id}' has invalid parent '{parent}': {source}")]
    InvalidParent {
        id: WeaponId,
        parent: String,
        #[source]
        source: IdError,
    },
}

fn format_path(path: &[WeaponId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Resolve `id` against `definitions` with the default depth limit
pub fn resolve(
    id: &WeaponId,
    definitions: &HashMap<WeaponId, RawDefinition>,
) -> Result<WeaponAttributes, ResolveError> {
    resolve_with_limit(id, definitions, DEFAULT_MAX_DEPTH)
}

/// Resolve `id` against `definitions`, following at most `max_depth` parents
pub fn resolve_with_limit(
    id: &WeaponId,
    definitions: &HashMap<WeaponId, RawDefinition>,
    max_depth: usize,
) -> Result<WeaponAttributes, ResolveError> {
    let chain = collect_chain(id, definitions, max_depth)?;
    Ok(chain
        .iter()
        .filter_map(|definition| definition.attributes.as_ref())
        .fold(WeaponAttributes::empty(), |resolved, patch| {
            merge_override(&resolved, patch)
        }))
}
