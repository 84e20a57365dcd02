//! Bullet-fire detection from consecutive snapshots.
//!
//! A robot pays for a bullet with energy equal to the bullet's power, and
//! the host game only allows powers inside a fixed band. An energy drop that
//! falls inside that band between two adjacent ticks, while the robot is not
//! braking harder than the game allows, is read as a shot.
//!
//! The rule cannot tell a shot apart from ramming damage or from the energy
//! drain applied to inactive robots. A robot destroyed with little energy
//! left can also look like it fired on its final tick. These are accepted
//! false positives.

use recon_types::Snapshot;
use serde::Deserialize;

/// Smallest bullet power the host game accepts.
pub const MIN_BULLET_POWER: f64 = 0.1;

/// Largest bullet power the host game accepts.
pub const MAX_BULLET_POWER: f64 = 3.0;

/// Fastest a robot may slow down in one tick.
pub const DECELERATION: f64 = 2.0;

/// Slack on every band edge so drops computed from decimal energies still
/// land inside the closed interval.
const FIRE_EPSILON: f64 = 1e-9;

/// Thresholds for inferring a shot from an energy drop.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FireRules {
    /// Smallest energy drop counted as a shot (default: 0.1).
    #[serde(default = "default_min_fire_cost")]
    pub min_fire_cost: f64,

    /// Largest energy drop counted as a shot (default: 3.0).
    #[serde(default = "default_max_fire_cost")]
    pub max_fire_cost: f64,

    /// Largest per-tick velocity loss still consistent with a shot
    /// (default: 2.0).
    #[serde(default = "default_max_deceleration")]
    pub max_deceleration: f64,
}

impl Default for FireRules {
    fn default() -> Self {
        Self {
            min_fire_cost: MIN_BULLET_POWER,
            max_fire_cost: MAX_BULLET_POWER,
            max_deceleration: DECELERATION,
        }
    }
}

impl FireRules {
    /// Return the inferred bullet power if `curr` looks like `prev` one tick
    /// after firing.
    ///
    /// Both snapshots must be adjacent entries of the same round. The shot
    /// is attributed to `prev`.
    pub fn detect(&self, prev: &Snapshot, curr: &Snapshot) -> Option<f64> {
        if curr.time.checked_sub(prev.time) != Some(1) {
            return None;
        }

        let energy_diff = curr.energy - prev.energy;
        let velocity_diff = curr.velocity - prev.velocity;

        let in_band = energy_diff <= -self.min_fire_cost + FIRE_EPSILON
            && energy_diff >= -self.max_fire_cost - FIRE_EPSILON;
        if in_band && velocity_diff >= -self.max_deceleration - FIRE_EPSILON {
            Some(energy_diff.abs())
        } else {
            None
        }
    }
}

const fn default_min_fire_cost() -> f64 {
    MIN_BULLET_POWER
}

const fn default_max_fire_cost() -> f64 {
    MAX_BULLET_POWER
}

const fn default_max_deceleration() -> f64 {
    DECELERATION
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn frame(time: u64, energy: f64, velocity: f64) -> Snapshot {
        Snapshot::new("Target", 0, time)
            .with_energy(energy)
            .with_velocity(velocity)
    }

    #[test]
    fn drop_inside_band_is_a_shot() {
        let rules = FireRules::default();
        let power = rules.detect(&frame(1, 100.0, 8.0), &frame(2, 97.0, 8.0));
        assert!((power.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn small_drop_inside_band() {
        let rules = FireRules::default();
        let power = rules.detect(&frame(10, 50.0, 0.0), &frame(11, 49.5, 0.0));
        assert!((power.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn drop_above_max_is_not_a_shot() {
        let rules = FireRules::default();
        assert!(rules.detect(&frame(1, 100.0, 8.0), &frame(2, 96.9, 8.0)).is_none());
    }

    #[test]
    fn drop_below_min_is_not_a_shot() {
        let rules = FireRules::default();
        assert!(rules.detect(&frame(1, 100.0, 8.0), &frame(2, 99.95, 8.0)).is_none());
    }

    #[test]
    fn energy_gain_is_not_a_shot() {
        let rules = FireRules::default();
        assert!(rules.detect(&frame(1, 50.0, 8.0), &frame(2, 52.0, 8.0)).is_none());
    }

    #[test]
    fn hard_braking_is_not_a_shot() {
        let rules = FireRules::default();
        // Losing 2.1 velocity in one tick is more than the game allows from
        // deceleration alone, so the robot must have hit something.
        assert!(rules.detect(&frame(1, 100.0, 8.0), &frame(2, 98.0, 5.9)).is_none());
    }

    #[test]
    fn maximum_deceleration_is_still_a_shot() {
        let rules = FireRules::default();
        let power = rules.detect(&frame(1, 100.0, 8.0), &frame(2, 98.0, 6.0));
        assert!((power.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn drop_exactly_at_min_cost_is_a_shot() {
        let rules = FireRules::default();
        let power = rules.detect(&frame(1, 100.0, 8.0), &frame(2, 99.9, 8.0));
        assert!((power.unwrap() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn drop_exactly_at_max_cost_from_fractional_energy_is_a_shot() {
        let rules = FireRules::default();
        let power = rules.detect(&frame(1, 10.1, 8.0), &frame(2, 7.1, 8.0));
        assert!((power.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn deceleration_exactly_at_limit_from_fractional_speed_is_a_shot() {
        let rules = FireRules::default();
        let power = rules.detect(&frame(1, 100.0, 7.3), &frame(2, 99.0, 5.3));
        assert!((power.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn gap_in_ticks_is_not_a_shot() {
        let rules = FireRules::default();
        assert!(rules.detect(&frame(1, 100.0, 8.0), &frame(3, 97.0, 8.0)).is_none());
    }

    #[test]
    fn custom_rules_override_band() {
        let rules = FireRules {
            min_fire_cost: 1.0,
            max_fire_cost: 5.0,
            max_deceleration: 2.0,
        };
        assert!(rules.detect(&frame(1, 100.0, 0.0), &frame(2, 99.5, 0.0)).is_none());
        let power = rules.detect(&frame(1, 100.0, 0.0), &frame(2, 96.0, 0.0));
        assert!((power.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn deserializes_with_defaults() {
        let rules: FireRules = serde_json::from_str(r#"{"max_fire_cost": 4.0}"#).unwrap();
        assert!((rules.max_fire_cost - 4.0).abs() < f64::EPSILON);
        assert!((rules.min_fire_cost - MIN_BULLET_POWER).abs() < f64::EPSILON);
        assert!((rules.max_deceleration - DECELERATION).abs() < f64::EPSILON);
    }
}
