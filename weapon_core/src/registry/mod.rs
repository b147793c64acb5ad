//! Weapon attribute registry
//!
//! The registry holds one immutable snapshot of resolved attributes behind
//! an [`ArcSwap`]. Readers load the current snapshot without locking; every
//! write builds a complete replacement map and publishes it in one swap, so
//! a reader sees either the old or the new registry, never a mix.
//!
//! An authority fills the registry with [`WeaponRegistry::load_all`] and
//! ships [`WeaponRegistry::encoded`] to its consumers, which apply it with
//! [`WeaponRegistry::decode`].

mod payload;

pub use payload::{decode_payload, encode_payload, payload_body, PayloadError};

use crate::attributes::{RawDefinition, WeaponAttributes};
use crate::config::RegistryConfig;
use crate::resolve::{resolve_with_limit, ResolveError};
use crate::types::WeaponId;
use arc_swap::ArcSwap;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Resolved attributes keyed by weapon id
pub type Entries = BTreeMap<WeaponId, WeaponAttributes>;

/// Outcome of a [`WeaponRegistry::load_all`] pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Definitions resolved and published
    pub registered: usize,
    /// Definitions rejected by the known-id predicate
    pub skipped: usize,
    /// Definitions whose inheritance could not be resolved
    pub failed: Vec<(WeaponId, ResolveError)>,
}

/// Registry of resolved weapon attributes
#[derive(Debug)]
pub struct WeaponRegistry {
    config: RegistryConfig,
    entries: ArcSwap<Entries>,
    /// Last payload produced by `encode`
    encoded: ArcSwap<Bytes>,
}

impl Default for WeaponRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WeaponRegistry {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry
    pub fn with_config(config: RegistryConfig) -> Self {
        WeaponRegistry {
            config,
            entries: ArcSwap::from_pointee(Entries::new()),
            encoded: ArcSwap::from_pointee(Bytes::new()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Insert or replace the resolved attributes of one weapon
    pub fn register(&self, id: WeaponId, attributes: WeaponAttributes) {
        self.entries.rcu(|current| {
            let mut next = Entries::clone(current);
            next.insert(id.clone(), attributes.clone());
            next
        });
    }

    /// Get the resolved attributes of a weapon
    pub fn get_attributes(&self, id: &WeaponId) -> Option<WeaponAttributes> {
        self.entries.load().get(id).cloned()
    }

    pub fn contains(&self, id: &WeaponId) -> bool {
        self.entries.load().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// All registered ids in sorted order
    pub fn ids(&self) -> Vec<WeaponId> {
        self.entries.load().keys().cloned().collect()
    }

    /// Pin the current contents for consistent multi-key reads
    pub fn snapshot(&self) -> Arc<Entries> {
        self.entries.load_full()
    }

    /// Resolve and publish every definition accepted by `is_known_id`
    ///
    /// The previous contents are replaced as a whole. A definition that fails
    /// to resolve is logged and left out without affecting the others.
    /// Re-encodes the payload afterwards; an encode failure is the only error.
    pub fn load_all<F>(
        &self,
        definitions: &HashMap<WeaponId, RawDefinition>,
        is_known_id: F,
    ) -> Result<LoadReport, PayloadError>
    where
        F: Fn(&WeaponId) -> bool,
    {
        let mut ids: Vec<&WeaponId> = definitions.keys().collect();
        ids.sort();

        let mut report = LoadReport::default();
        let mut resolved = Entries::new();

        for id in ids {
            // Abstract bases are not items themselves
            if !is_known_id(id) {
                report.skipped += 1;
                continue;
            }

            match resolve_with_limit(id, definitions, self.config.max_inheritance_depth) {
                Ok(attributes) => {
                    resolved.insert(id.clone(), attributes);
                }
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "failed to resolve weapon attributes");
                    report.failed.push((id.clone(), err));
                }
            }
        }

        report.registered = resolved.len();
        self.entries.store(Arc::new(resolved));
        tracing::info!(
            registered = report.registered,
            skipped = report.skipped,
            failed = report.failed.len(),
            "loaded weapon attribute registry"
        );

        self.encode()?;
        Ok(report)
    }

    /// Encode the current contents and cache the payload
    pub fn encode(&self) -> Result<Bytes, PayloadError> {
        let entries = self.entries.load_full();
        let payload = encode_payload(&entries, self.config.max_payload_bytes)?;

        if self.config.log_payload {
            if let Ok(body) = payload_body(&payload) {
                tracing::debug!(body, "encoded weapon attribute registry");
            }
        }
        tracing::debug!(
            entries = entries.len(),
            bytes = payload.len(),
            "encoded weapon attribute registry"
        );

        self.encoded.store(Arc::new(payload.clone()));
        Ok(payload)
    }

    /// Replace the contents with those of a received payload
    ///
    /// Nothing changes when the payload fails to decode.
    pub fn decode(&self, payload: &[u8]) -> Result<(), PayloadError> {
        let entries = decode_payload(payload, self.config.max_payload_bytes)?;
        tracing::info!(
            entries = entries.len(),
            bytes = payload.len(),
            "applied weapon attribute registry payload"
        );
        self.entries.store(Arc::new(entries));
        Ok(())
    }

    /// The last payload produced by [`encode`](Self::encode)
    ///
    /// Empty until the registry has been encoded once.
    pub fn encoded(&self) -> Bytes {
        Bytes::clone(&self.encoded.load())
    }
}
