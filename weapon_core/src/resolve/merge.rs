//! Field-level override merge
//!
//! A patch field replaces the base field only when the patch actually sets
//! it. Strings are set when present; numerics are set when non-zero (attack
//! range must be positive). `is_two_handed` has no unset state, so the patch
//! always wins.

use crate::attributes::{Attack, WeaponAttributes};

/// Merge `patch` on top of `base`
pub fn merge_override(base: &WeaponAttributes, patch: &WeaponAttributes) -> WeaponAttributes {
    let attacks = if patch.attacks.is_empty() {
        base.attacks.clone()
    } else {
        let empty = Attack::empty();
        patch
            .attacks
            .iter()
            .enumerate()
            .map(|(i, over)| merge_attack(base.attacks.get(i).unwrap_or(&empty), over))
            .collect()
    };

    WeaponAttributes {
        attack_range: positive(patch.attack_range).or(base.attack_range),
        pose: patch.pose.clone().or_else(|| base.pose.clone()),
        is_two_handed: patch.is_two_handed,
        attacks,
    }
}

/// Merge one combo step of `patch` on top of the same step of `base`
pub fn merge_attack(base: &Attack, patch: &Attack) -> Attack {
    Attack {
        hitbox: patch.hitbox.clone().or_else(|| base.hitbox.clone()),
        damage_multiplier: non_zero(patch.damage_multiplier).or(base.damage_multiplier),
        angle: non_zero(patch.angle).or(base.angle),
        upswing: non_zero(patch.upswing).or(base.upswing),
        animation: patch.animation.clone().or_else(|| base.animation.clone()),
        swing_sound: patch.swing_sound.clone().or_else(|| base.swing_sound.clone()),
        impact_sound: patch
            .impact_sound
            .clone()
            .or_else(|| base.impact_sound.clone()),
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
