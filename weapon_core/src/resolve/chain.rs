//! Parent chain collection

use super::ResolveError;
use crate::attributes::RawDefinition;
use crate::types::WeaponId;
use std::collections::{HashMap, HashSet};

/// Collect the inheritance chain of `id`, root ancestor first
///
/// A parent missing from `definitions` ends the chain without error.
pub fn collect_chain<'a>(
    id: &WeaponId,
    definitions: &'a HashMap<WeaponId, RawDefinition>,
    max_depth: usize,
) -> Result<Vec<&'a RawDefinition>, ResolveError> {
    let mut current = definitions
        .get(id)
        .ok_or_else(|| ResolveError::NotFound(id.clone()))?;
    let mut chain = vec![current];
    let mut path = vec![id.clone()];
    let mut visited: HashSet<&WeaponId> = HashSet::from([id]);

    while let Some(parent) = current.parent.as_deref() {
        let parent_id = WeaponId::parse(parent).map_err(|source| ResolveError::InvalidParent {
            id: path.last().unwrap_or(id).clone(),
            parent: parent.to_string(),
            source,
        })?;

        let Some((key, definition)) = definitions.get_key_value(&parent_id) else {
            tracing::debug!(id = %id, parent = %parent_id, "parent not found, chain truncated");
            break;
        };

        if !visited.insert(key) {
            let start = path.iter().position(|p| p == key).unwrap_or(0);
            let mut cycle = path.split_off(start);
            cycle.push(parent_id);
            return Err(ResolveError::Cycle { path: cycle });
        }
        if chain.len() > max_depth {
            return Err(ResolveError::TooDeep {
                id: id.clone(),
                depth: max_depth,
            });
        }

        chain.push(definition);
        path.push(parent_id);
        current = definition;
    }

    chain.reverse();
    Ok(chain)
}
