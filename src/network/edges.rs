use bevy::math::Vec3;

use crate::graph::EdgeSet;
use crate::network::factory::NodeEntity;

/// Bow offset of each endpoint, as a function of time
pub fn bow_offset(t: f32, pulse_phase: f32, amplitude: f32) -> f32 {
    (t * 2.0 + pulse_phase).sin() * amplitude
}

/// Endpoints pulled toward (or pushed away from) the segment midpoint
///
/// Coincident endpoints have no direction to move along and stay put.
pub fn bowed_endpoints(p1: Vec3, p2: Vec3, t: f32, pulse_phase: f32, amplitude: f32) -> [Vec3; 2] {
    let mid = (p1 + p2) * 0.5;
    let offset = bow_offset(t, pulse_phase, amplitude);

    [
        p1 + (mid - p1).normalize_or_zero() * offset,
        p2 + (mid - p2).normalize_or_zero() * offset,
    ]
}

/// Rewrite `segments` in place from the current node positions
///
/// `segments` is resized to the edge count; every entry is overwritten.
pub fn update_segments(
    segments: &mut Vec<[Vec3; 2]>,
    edges: &EdgeSet,
    nodes: &[NodeEntity],
    t: f32,
    bow_amplitude: Option<f32>,
) {
    segments.resize(edges.len(), [Vec3::ZERO; 2]);

    for (segment, edge) in segments.iter_mut().zip(edges.iter()) {
        let p1 = nodes[edge.a.index()].position;
        let p2 = nodes[edge.b.index()].position;

        *segment = match bow_amplitude {
            Some(amplitude) => bowed_endpoints(p1, p2, t, edge.pulse_phase, amplitude),
            None => [p1, p2],
        };
    }
}
