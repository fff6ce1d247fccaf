use bevy::math::Vec3;
use serde::Deserialize;

use crate::graph::Behavior;

/// Pulse scale swings this far either side of 1.0
pub const PULSE_AMPLITUDE: f32 = 0.15;

/// Rotation added to a spinning node every tick, radians
pub const SPIN_STEP: f32 = 0.01;

/// How node positions evolve over time
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Absolute position on a breathing sphere-like orbit
    Orbit { base_radius: f32, amplitude: f32 },
    /// Integrates a sinusoidal velocity into the current position
    Drift,
}

/// Orbit position at time `t`
///
/// radius = base + amplitude * sin(0.5t + phase)
/// a = t * float_speed + phase, b = 1.5 * t * float_speed + phase
pub fn orbit_position(
    t: f32,
    float_speed: f32,
    phase: f32,
    base_radius: f32,
    amplitude: f32,
) -> Vec3 {
    let radius = base_radius + amplitude * (t * 0.5 + phase).sin();
    let a = t * float_speed + phase;
    let b = t * float_speed * 1.5 + phase;

    Vec3::new(
        radius * a.sin() * b.cos(),
        radius * a.sin() * b.sin(),
        radius * a.cos(),
    )
}

/// One drift step: nudges x by float_speed * sin(t + phase) and y by
/// float_speed * cos(t + phase). Unbounded over time.
pub fn drift_step(position: Vec3, t: f32, float_speed: f32, phase: f32) -> Vec3 {
    let angle = t + phase;
    position + Vec3::new(float_speed * angle.sin(), float_speed * angle.cos(), 0.0)
}

/// Uniform scale factor, periodic in 2π / pulse_speed
pub fn pulse_scale(t: f32, pulse_speed: f32, phase: f32) -> f32 {
    1.0 + PULSE_AMPLITUDE * (t * pulse_speed + phase).sin()
}

pub fn shimmer_opacity(t: f32, phase: f32) -> f32 {
    0.7 + 0.2 * (t * 4.0 + phase).sin()
}

/// Visible only while sin(3t + phase) is strictly positive
pub fn blink_visible(t: f32, phase: f32) -> bool {
    (t * 3.0 + phase).sin() > 0.0
}

/// What a behavior does to a node this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorOverlay {
    /// Added to the node's accumulated rotation
    pub spin_step: f32,
    /// Replaces the shell opacity when set
    pub opacity: Option<f32>,
    pub visible: bool,
}

impl BehaviorOverlay {
    pub const NEUTRAL: BehaviorOverlay = BehaviorOverlay {
        spin_step: 0.0,
        opacity: None,
        visible: true,
    };
}

pub fn behavior_overlay(behavior: Behavior, t: f32, phase: f32) -> BehaviorOverlay {
    match behavior {
        Behavior::Spin => BehaviorOverlay {
            spin_step: SPIN_STEP,
            ..BehaviorOverlay::NEUTRAL
        },
        Behavior::Shimmer => BehaviorOverlay {
            opacity: Some(shimmer_opacity(t, phase)),
            ..BehaviorOverlay::NEUTRAL
        },
        Behavior::Blink => BehaviorOverlay {
            visible: blink_visible(t, phase),
            ..BehaviorOverlay::NEUTRAL
        },
        Behavior::None => BehaviorOverlay::NEUTRAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_orbit_radius_breathes_between_bounds() {
        for step in 0..2000 {
            let t = step as f32 * 0.05;
            let p = orbit_position(t, 0.01, 3.3, 20.0, 5.0);
            let r = p.length();
            assert!((15.0 - 1e-3..=25.0 + 1e-3).contains(&r), "radius {r} at t={t}");
        }
    }

    #[test]
    fn test_orbit_at_time_zero() {
        // t = 0, phase = 0: a = b = 0 so the node sits on +Z at the base radius
        let p = orbit_position(0.0, 0.01, 0.0, 20.0, 5.0);
        assert!(p.distance(Vec3::new(0.0, 0.0, 20.0)) < 1e-4);
    }

    #[test]
    fn test_drift_accumulates() {
        let mut p = Vec3::ZERO;
        p = drift_step(p, 0.0, 0.5, 0.0);
        assert!(p.distance(Vec3::new(0.0, 0.5, 0.0)) < 1e-6);

        p = drift_step(p, PI / 2.0, 0.5, 0.0);
        assert!(p.distance(Vec3::new(0.5, 0.5, 0.0)) < 1e-5);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_pulse_scale_is_periodic() {
        for &(speed, phase) in &[(2.5, 0.0), (3.2, 4.4), (4.1, 9.9)] {
            let period = TAU / speed;
            for step in 0..200 {
                let t = step as f32 * 0.013;
                let a = pulse_scale(t, speed, phase);
                let b = pulse_scale(t + period, speed, phase);
                assert!((a - b).abs() < 1e-4, "speed {speed}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_pulse_scale_bounds() {
        for step in 0..1000 {
            let s = pulse_scale(step as f32 * 0.01, 2.5, 1.0);
            assert!((0.85 - 1e-6..=1.15 + 1e-6).contains(&s));
        }
    }

    #[test]
    fn test_blink_visibility() {
        assert!(!blink_visible(0.0, 0.0), "sin(0) = 0 is not > 0");
        assert!(blink_visible(PI / 6.0, 0.0), "sin(π/2) = 1");
        assert!(!blink_visible(PI / 2.0, 0.0), "sin(3π/2) = -1");
    }

    #[test]
    fn test_shimmer_range() {
        assert!((shimmer_opacity(0.0, 0.0) - 0.7).abs() < 1e-6);
        assert!((shimmer_opacity(PI / 8.0, 0.0) - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_behavior_overlay_dispatch() {
        let spin = behavior_overlay(Behavior::Spin, 1.0, 0.0);
        assert_eq!(spin.spin_step, SPIN_STEP);
        assert!(spin.visible && spin.opacity.is_none());

        let shimmer = behavior_overlay(Behavior::Shimmer, 0.0, 0.0);
        assert_eq!(shimmer.spin_step, 0.0);
        assert!(shimmer.opacity.is_some());

        let blink = behavior_overlay(Behavior::Blink, 0.0, 0.0);
        assert!(!blink.visible);

        assert_eq!(
            behavior_overlay(Behavior::None, 5.0, 2.0),
            BehaviorOverlay::NEUTRAL
        );
    }
}
