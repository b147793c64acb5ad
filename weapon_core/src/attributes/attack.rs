//! Attack - One strike of a weapon's combo

use serde::{Deserialize, Serialize};

/// Per-strike attack data
///
/// Every field may be unset. Unset strings are `None`; unset numerics are
/// `None` or `Some(0.0)`, both of which read back as `0.0` and never
/// override an inherited value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    /// Opaque hitbox shape descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hitbox: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_multiplier: Option<f64>,
    /// Swing arc in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Fraction of the attack cooldown spent winding up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upswing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swing_sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_sound: Option<String>,
}

impl Attack {
    /// An attack with every field unset
    pub fn empty() -> Self {
        Attack::default()
    }

    pub fn damage_multiplier(&self) -> f64 {
        self.damage_multiplier.unwrap_or(0.0)
    }

    pub fn angle(&self) -> f64 {
        self.angle.unwrap_or(0.0)
    }

    pub fn upswing(&self) -> f64 {
        self.upswing.unwrap_or(0.0)
    }

    pub fn with_hitbox(mut self, hitbox: impl Into<String>) -> Self {
        self.hitbox = Some(hitbox.into());
        self
    }

    pub fn with_damage_multiplier(mut self, value: f64) -> Self {
        self.damage_multiplier = Some(value);
        self
    }

    pub fn with_angle(mut self, value: f64) -> Self {
        self.angle = Some(value);
        self
    }

    pub fn with_upswing(mut self, value: f64) -> Self {
        self.upswing = Some(value);
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    /// Set both swing and impact sounds
    pub fn with_sounds(mut self, swing: impl Into<String>, impact: impl Into<String>) -> Self {
        self.swing_sound = Some(swing.into());
        self.impact_sound = Some(impact.into());
        self
    }
}
