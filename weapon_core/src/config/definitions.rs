//! Raw definition document loading

use super::ConfigError;
use crate::attributes::RawDefinition;
use crate::types::WeaponId;
use std::collections::HashMap;

/// Resource directory holding weapon definition documents
pub const DEFINITIONS_DIR: &str = "weapon_attributes/";

/// Definitions parsed from a batch of documents
#[derive(Debug, Default)]
pub struct DefinitionSet {
    pub definitions: HashMap<WeaponId, RawDefinition>,
    /// Resource paths that could not be loaded, with the reason
    pub failed: Vec<(String, ConfigError)>,
}

/// Parse one definition document in JSON form
pub fn parse_definition_json(content: &str) -> Result<RawDefinition, ConfigError> {
    super::parse_json(content)
}

/// Parse one definition document in TOML form
pub fn parse_definition_toml(content: &str) -> Result<RawDefinition, ConfigError> {
    super::parse_toml(content)
}

/// Derive a definition id from its resource path
///
/// `ns:weapon_attributes/swords/claymore.json` becomes `ns:swords/claymore`.
pub fn definition_id_from_path(resource_path: &str) -> Result<WeaponId, ConfigError> {
    let id = WeaponId::parse(resource_path)?;
    let relative = id.path().strip_prefix(DEFINITIONS_DIR).ok_or_else(|| {
        ConfigError::ValidationError(format!(
            "'{}' is not under {}",
            resource_path, DEFINITIONS_DIR
        ))
    })?;

    let file_start = relative.rfind('/').map(|i| i + 1).unwrap_or(0);
    let stem = match relative[file_start..].rfind('.') {
        Some(dot) => &relative[..file_start + dot],
        None => relative,
    };

    Ok(WeaponId::new(id.namespace(), stem)?)
}

/// Load a batch of `(resource_path, json_content)` documents
///
/// Documents that fail to parse are logged and collected in
/// [`DefinitionSet::failed`]; the rest are still loaded.
pub fn load_definitions<I, P, C>(documents: I) -> DefinitionSet
where
    I: IntoIterator<Item = (P, C)>,
    P: AsRef<str>,
    C: AsRef<str>,
{
    let mut set = DefinitionSet::default();

    for (path, content) in documents {
        let path = path.as_ref();
        let loaded = definition_id_from_path(path)
            .and_then(|id| Ok((id, parse_definition_json(content.as_ref())?)));

        match loaded {
            Ok((id, definition)) => {
                set.definitions.insert(id, definition);
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "failed to parse weapon definition");
                set.failed.push((path.to_string(), err));
            }
        }
    }

    tracing::debug!(
        loaded = set.definitions.len(),
        failed = set.failed.len(),
        "loaded weapon definition documents"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_definition() {
        let json = r#"{
            "parent": "bettercombat:claymore",
            "attributes": {
                "attackRange": 3.2,
                "isTwoHanded": true,
                "attacks": [
                    { "angle": 160 },
                    { "damageMultiplier": 1.4, "hitbox": "VERTICAL_PLANE" }
                ]
            }
        }"#;

        let def = parse_definition_json(json).unwrap();
        assert_eq!(def.parent.as_deref(), Some("bettercombat:claymore"));
        let attrs = def.attributes.unwrap();
        assert!(attrs.is_two_handed);
        assert_eq!(attrs.attacks.len(), 2);
        assert_eq!(attrs.attacks[1].hitbox.as_deref(), Some("VERTICAL_PLANE"));
    }

    #[test]
    fn test_parse_parent_only_json() {
        let def = parse_definition_json(r#"{ "parent": "bettercombat:sword" }"#).unwrap();
        assert!(def.attributes.is_none());
    }

    #[test]
    fn test_parse_toml_definition() {
        let toml = r#"
parent = "bettercombat:sword"

[attributes]
attackRange = 2.8
pose = "katana"

[[attributes.attacks]]
hitbox = "HORIZONTAL_PLANE"
angle = 120.0
swingSound = "katana_swing"
"#;

        let def = parse_definition_toml(toml).unwrap();
        let attrs = def.attributes.unwrap();
        assert_eq!(attrs.pose.as_deref(), Some("katana"));
        assert!(!attrs.is_two_handed);
        assert_eq!(attrs.attacks[0].swing_sound.as_deref(), Some("katana_swing"));
    }

    #[test]
    fn test_id_from_path() {
        let id = definition_id_from_path("mymod:weapon_attributes/claymore.json").unwrap();
        assert_eq!(id.to_string(), "mymod:claymore");

        let id = definition_id_from_path("mymod:weapon_attributes/swords/long.v2.json").unwrap();
        assert_eq!(id.to_string(), "mymod:swords/long.v2");

        let id = definition_id_from_path("weapon_attributes/dagger").unwrap();
        assert_eq!(id.path(), "dagger");

        assert!(definition_id_from_path("mymod:textures/claymore.json").is_err());
    }

    #[test]
    fn test_load_definitions_skips_broken_documents() {
        let docs = vec![
            ("w:weapon_attributes/sword.json", r#"{ "attributes": { "attackRange": 2.5 } }"#),
            ("w:weapon_attributes/broken.json", r#"{ "attributes": "#),
            ("w:weapon_attributes/katana.json", r#"{ "parent": "w:sword" }"#),
            ("w:models/katana.json", r#"{}"#),
        ];

        let set = load_definitions(docs);
        assert_eq!(set.definitions.len(), 2);
        assert!(set.definitions.contains_key(&WeaponId::parse("w:katana").unwrap()));
        assert_eq!(set.failed.len(), 2);
        assert!(matches!(set.failed[0].1, ConfigError::JsonError(_)));
        assert!(matches!(set.failed[1].1, ConfigError::ValidationError(_)));
    }
}
