use super::edge::{Edge, EdgeSet};
use super::node_id::NodeId;

use bevy::math::Vec3;
use rand::Rng;
use serde::Deserialize;
use std::f32::consts::TAU;

/// How pairs of sampled points get connected
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeRule {
    /// Connect (i, j) iff their distance is below `threshold`
    Proximity { threshold: f32 },
    /// Connect each pair independently with probability `p`
    Probability { p: f64 },
}

/// Node positions plus the edges between them
#[derive(Debug, Clone)]
pub struct SpatialGraph {
    pub positions: Vec<Vec3>,
    pub edges: EdgeSet,
}

/// Sample `count` points uniformly inside the cube of half-width
/// `bounding_radius` centered at the origin. Overlap is allowed.
pub fn sample_positions(count: usize, bounding_radius: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    let half = bounding_radius.max(0.0);

    (0..count)
        .map(|_| {
            Vec3::new(
                coordinate(half, rng),
                coordinate(half, rng),
                coordinate(half, rng),
            )
        })
        .collect()
}

fn coordinate(half: f32, rng: &mut impl Rng) -> f32 {
    if half > 0.0 {
        rng.random_range(-half..half)
    } else {
        0.0
    }
}

/// Clamp into [0, 1]; NaN and infinities count as "never"
///
/// `random_bool` panics outside [0, 1], and `clamp` passes NaN through.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}

/// Evaluate every unordered pair (i < j) against `rule`
///
/// O(n²), which is fine for the few hundred points a scene uses.
/// Every created edge gets a random pulse phase in [0, 2π).
pub fn connect(positions: &[Vec3], rule: EdgeRule, rng: &mut impl Rng) -> EdgeSet {
    let mut edges = EdgeSet::with_node_count(positions.len());

    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let linked = match rule {
                EdgeRule::Proximity { threshold } => positions[i].distance(positions[j]) < threshold,
                EdgeRule::Probability { p } => rng.random_bool(clamp_probability(p)),
            };

            if linked {
                let pulse_phase = rng.random_range(0.0..TAU);
                edges.add(Edge::new(NodeId(i), NodeId(j), pulse_phase));
            }
        }
    }

    edges
}

/// Sample positions and connect them
pub fn generate(
    node_count: usize,
    bounding_radius: f32,
    rule: EdgeRule,
    rng: &mut impl Rng,
) -> SpatialGraph {
    let positions = sample_positions(node_count, bounding_radius, rng);
    let edges = connect(&positions, rule, rng);

    log::debug!(
        "generated {} nodes and {} edges with {:?}",
        positions.len(),
        edges.len(),
        rule
    );

    SpatialGraph { positions, edges }
}
