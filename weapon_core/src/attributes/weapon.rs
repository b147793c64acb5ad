//! WeaponAttributes - Combat attributes of a whole weapon

use super::Attack;
use serde::{Deserialize, Serialize};

/// Combat attributes of one weapon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttributes {
    /// Reach in blocks; unset when `None` or not positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_range: Option<f64>,
    /// Opaque holding pose identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<String>,
    /// Has no unset state; every definition restates it
    #[serde(default)]
    pub is_two_handed: bool,
    /// Combo steps in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attacks: Vec<Attack>,
}

impl WeaponAttributes {
    /// The fold seed: nothing set, one-handed, no attacks
    pub fn empty() -> Self {
        WeaponAttributes::default()
    }

    pub fn attack_range(&self) -> f64 {
        self.attack_range.unwrap_or(0.0)
    }

    /// Get the attack for a combo step
    pub fn attack(&self, combo_step: usize) -> Option<&Attack> {
        self.attacks.get(combo_step)
    }

    pub fn with_attack_range(mut self, range: f64) -> Self {
        self.attack_range = Some(range);
        self
    }

    pub fn with_pose(mut self, pose: impl Into<String>) -> Self {
        self.pose = Some(pose.into());
        self
    }

    pub fn two_handed(mut self, is_two_handed: bool) -> Self {
        self.is_two_handed = is_two_handed;
        self
    }

    /// Append a combo step
    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_seed() {
        let empty = WeaponAttributes::empty();
        assert!((empty.attack_range() - 0.0).abs() < f64::EPSILON);
        assert!(empty.pose.is_none());
        assert!(!empty.is_two_handed);
        assert!(empty.attacks.is_empty());
        assert_eq!(empty, WeaponAttributes::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let attrs: WeaponAttributes = serde_json::from_str(r#"{"attackRange": 3.5}"#).unwrap();
        assert!((attrs.attack_range() - 3.5).abs() < f64::EPSILON);
        assert!(!attrs.is_two_handed);
        assert!(attrs.attack(0).is_none());
    }

    #[test]
    fn test_null_fields_are_unset() {
        let attrs: WeaponAttributes =
            serde_json::from_str(r#"{"attackRange": null, "pose": null, "isTwoHanded": true}"#)
                .unwrap();
        assert!(attrs.attack_range.is_none());
        assert!(attrs.pose.is_none());
        assert!(attrs.is_two_handed);
    }
}
