//! The slow-pulsing web of lines behind the network.

use bevy::math::{Vec3, Vec4};
use rand::Rng;
use serde::Deserialize;
use std::f32::consts::TAU;

use crate::graph::{self, EdgeRule};
use crate::network::color::{hsla, normalize_hue};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BackgroundConfig {
    pub point_count: usize,
    pub bounding_radius: f32,
    pub threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLine {
    pub start: Vec3,
    pub end: Vec3,
    pub pulse_speed: f32,
    pub pulse_offset: f32,
    /// RGB + opacity
    pub color: Vec4,
}

#[derive(Debug, Clone, Default)]
pub struct BackgroundWeb {
    lines: Vec<BackgroundLine>,
}

/// Hue runs backwards: 360 - ((10t + 60 * offset) mod 360)
pub fn background_hue(t: f32, pulse_offset: f32) -> f32 {
    normalize_hue(360.0 - normalize_hue(t * 10.0 + pulse_offset * 60.0))
}

/// Always within [0.1, 0.3]
pub fn background_opacity(t: f32, pulse_speed: f32, pulse_offset: f32) -> f32 {
    0.2 + 0.1 * (-t * pulse_speed + pulse_offset).sin()
}

impl BackgroundWeb {
    /// Sample points and link every pair closer than the threshold
    pub fn generate(config: &BackgroundConfig, rng: &mut impl Rng) -> Self {
        let spatial = graph::generate(
            config.point_count,
            config.bounding_radius,
            EdgeRule::Proximity {
                threshold: config.threshold,
            },
            rng,
        );

        let lines = spatial
            .edges
            .iter()
            .map(|edge| BackgroundLine {
                start: spatial.positions[edge.a.index()],
                end: spatial.positions[edge.b.index()],
                pulse_speed: rng.random_range(1.0..3.0),
                pulse_offset: rng.random_range(0.0..TAU),
                color: hsla(rng.random_range(0.0..360.0), 1.0, 0.5, 0.3),
            })
            .collect();

        BackgroundWeb { lines }
    }

    pub fn tick(&mut self, t: f32) {
        for line in &mut self.lines {
            line.color = hsla(
                background_hue(t, line.pulse_offset),
                1.0,
                0.5,
                background_opacity(t, line.pulse_speed, line.pulse_offset),
            );
        }
    }

    pub fn lines(&self) -> &[BackgroundLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_background_lines_respect_threshold() {
        let mut rng = StdRng::seed_from_u64(8);
        let config = BackgroundConfig {
            point_count: 150,
            bounding_radius: 50.0,
            threshold: 15.0,
        };
        let web = BackgroundWeb::generate(&config, &mut rng);

        assert!(!web.is_empty());
        for line in web.lines() {
            assert!(line.start.distance(line.end) < 15.0);
            assert!((1.0..3.0).contains(&line.pulse_speed));
            assert!((0.0..TAU).contains(&line.pulse_offset));
        }
    }

    #[test]
    fn test_background_hue_runs_backwards() {
        assert!((background_hue(1.0, 0.0) - 350.0).abs() < 1e-4);
        assert!((background_hue(2.0, 0.0) - 340.0).abs() < 1e-4);
        // 360 - 0 wraps to 0 instead of landing on 360
        assert_eq!(background_hue(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_background_tick_keeps_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = BackgroundConfig {
            point_count: 60,
            bounding_radius: 30.0,
            threshold: 15.0,
        };
        let mut web = BackgroundWeb::generate(&config, &mut rng);

        for step in 0..300 {
            web.tick(step as f32 * 0.21);
            for line in web.lines() {
                assert!((0.1 - 1e-6..=0.3 + 1e-6).contains(&line.color.w));
                assert!(line.color.x >= 0.0 && line.color.x <= 1.0);
            }
        }
    }
}
