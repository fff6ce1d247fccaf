use bevy::math::{Vec3, Vec4};
use serde::Deserialize;
use std::f32::consts::FRAC_PI_4;

use crate::network::color::{hsla, normalize_hue};

/// Core hue cycling rate, degrees per second (slower than the nodes)
pub const CORE_HUE_RATE: f32 = 15.0;

/// How the central knot rotates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoreMotion {
    /// Rocks back and forth on all three axes
    Sinusoidal,
    /// Adds a fixed Euler increment (radians) every tick
    Linear { step: [f32; 3] },
}

/// The torus knot at the center of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct CoreKnot {
    pub motion: CoreMotion,
    /// XYZ Euler angles, radians
    pub rotation: Vec3,
    pub color: Vec4,
}

impl CoreKnot {
    pub fn new(motion: CoreMotion) -> Self {
        CoreKnot {
            motion,
            rotation: Vec3::ZERO,
            color: core_color(0.0),
        }
    }

    pub fn tick(&mut self, t: f32) {
        self.rotation = match self.motion {
            CoreMotion::Sinusoidal => sinusoidal_rotation(t),
            CoreMotion::Linear { step } => self.rotation + Vec3::from_array(step),
        };
        self.color = core_color(t);
    }
}

pub fn sinusoidal_rotation(t: f32) -> Vec3 {
    Vec3::new(
        0.2 * (t * 0.7).sin(),
        0.3 * (t * 0.5).cos(),
        0.15 * (t * 1.2 + FRAC_PI_4).sin(),
    )
}

pub fn core_hue(t: f32) -> f32 {
    normalize_hue(t * CORE_HUE_RATE)
}

fn core_color(t: f32) -> Vec4 {
    hsla(core_hue(t), 1.0, 0.6, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinusoidal_rotation_is_absolute() {
        let mut knot = CoreKnot::new(CoreMotion::Sinusoidal);
        knot.tick(3.0);
        knot.tick(3.0);

        assert_eq!(knot.rotation, sinusoidal_rotation(3.0));
        assert!(knot.rotation.x.abs() <= 0.2);
        assert!(knot.rotation.y.abs() <= 0.3);
        assert!(knot.rotation.z.abs() <= 0.15);
    }

    #[test]
    fn test_linear_rotation_accumulates_per_tick() {
        let mut knot = CoreKnot::new(CoreMotion::Linear {
            step: [0.005, 0.01, 0.0],
        });
        for i in 0..10 {
            knot.tick(i as f32);
        }

        assert!(knot.rotation.distance(Vec3::new(0.05, 0.1, 0.0)) < 1e-5);
    }

    #[test]
    fn test_core_hue_cycles_at_fifteen_degrees_per_second() {
        assert!((core_hue(2.0) - 30.0).abs() < 1e-4);
        assert!((core_hue(25.0) - 15.0).abs() < 1e-3);
        assert!((0.0..360.0).contains(&core_hue(1e6)));
    }
}
