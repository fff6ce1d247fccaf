// ============================================================================
// PROCEDURAL GEOMETRY - node bodies, wire shells, the torus knot, line buffers
// ============================================================================

use bevy::asset::RenderAssetUsages;
use bevy::math::Vec3;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use std::collections::BTreeSet;
use std::f32::consts::TAU;

/// Faces of the unit icosahedron, counter-clockwise from outside
pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Twelve vertices on a sphere of the given radius
pub fn icosahedron_vertices(radius: f32) -> [Vec3; 12] {
    let t = (1.0 + 5f32.sqrt()) / 2.0;

    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|v| v.normalize() * radius)
}

/// Unique undirected edges of the icosahedron, lower index first
pub fn icosahedron_edges() -> Vec<[usize; 2]> {
    let mut edges = BTreeSet::new();
    for [a, b, c] in ICOSAHEDRON_FACES {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            edges.insert([u.min(v), u.max(v)]);
        }
    }
    edges.into_iter().collect()
}

/// Point on the (p, q) torus knot curve at parameter `u`
fn torus_knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();

    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

/// Tube vertices around a (p, q) torus knot
///
/// Returns (tubular + 1) rings of (radial + 1) vertices; the seam
/// vertices are duplicated so every ring and segment closes.
pub fn torus_knot_points(
    radius: f32,
    tube: f32,
    tubular: usize,
    radial: usize,
    p: u32,
    q: u32,
) -> Vec<Vec3> {
    let (p, q) = (p as f32, q as f32);
    let mut points = Vec::with_capacity((tubular + 1) * (radial + 1));

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * TAU;
        let p1 = torus_knot_curve(u, p, q, radius);
        let p2 = torus_knot_curve(u + 0.01, p, q, radius);

        // Frenet-like frame along the curve
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize_or_zero();
        let normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            points.push(p1 + normal * cx + binormal * cy);
        }
    }

    points
}

/// Wireframe edges over the torus knot grid: rings, rails and one diagonal
/// per quad
pub fn torus_knot_wire_indices(tubular: usize, radial: usize) -> Vec<[u32; 2]> {
    let stride = radial + 1;
    let at = |i: usize, j: usize| (i * stride + j) as u32;
    let mut lines = Vec::with_capacity(tubular * radial * 3);

    for i in 0..tubular {
        for j in 0..radial {
            let a = at(i, j);
            let b = at(i + 1, j);
            let d = at(i, j + 1);
            lines.push([a, b]);
            lines.push([a, d]);
            lines.push([b, d]);
        }
    }

    lines
}

/// Flat-shaded solid icosahedron
pub fn solid_icosahedron_mesh(radius: f32) -> Mesh {
    let vertices = icosahedron_vertices(radius);
    let mut positions = Vec::with_capacity(60);
    let mut normals = Vec::with_capacity(60);

    for [a, b, c] in ICOSAHEDRON_FACES {
        let (va, vb, vc) = (vertices[a], vertices[b], vertices[c]);
        let normal = (vb - va).cross(vc - va).normalize_or_zero();
        for v in [va, vb, vc] {
            positions.push(v.to_array());
            normals.push(normal.to_array());
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

/// Icosahedron edges as a line list
pub fn wire_icosahedron_mesh(radius: f32) -> Mesh {
    let vertices = icosahedron_vertices(radius);
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.to_array()).collect();
    let indices: Vec<u32> = icosahedron_edges()
        .into_iter()
        .flat_map(|[a, b]| [a as u32, b as u32])
        .collect();

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices))
}

/// Torus knot tube as a line list
pub fn torus_knot_wire_mesh(
    radius: f32,
    tube: f32,
    tubular: usize,
    radial: usize,
    p: u32,
    q: u32,
) -> Mesh {
    let positions: Vec<[f32; 3]> = torus_knot_points(radius, tube, tubular, radial, p, q)
        .into_iter()
        .map(|v| v.to_array())
        .collect();
    let indices: Vec<u32> = torus_knot_wire_indices(tubular, radial)
        .into_iter()
        .flatten()
        .collect();

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices))
}

/// Flatten segments into line-list vertex positions
pub fn segment_positions(segments: &[[Vec3; 2]]) -> Vec<[f32; 3]> {
    segments
        .iter()
        .flat_map(|[a, b]| [a.to_array(), b.to_array()])
        .collect()
}

/// Line list whose vertices get rewritten every frame
pub fn dynamic_line_mesh(segments: &[[Vec3; 2]], colors: Option<Vec<[f32; 4]>>) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::LineList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, segment_positions(segments));

    if let Some(colors) = colors {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_topology() {
        let vertices = icosahedron_vertices(0.6);
        for v in vertices {
            assert!((v.length() - 0.6).abs() < 1e-5);
        }

        // Euler: V - E + F = 2
        let edges = icosahedron_edges();
        assert_eq!(edges.len(), 30);
        assert_eq!(12 - edges.len() as i32 + ICOSAHEDRON_FACES.len() as i32, 2);

        // Every vertex touches five edges
        for i in 0..12 {
            let degree = edges.iter().filter(|e| e.contains(&i)).count();
            assert_eq!(degree, 5, "vertex {i}");
        }
    }

    #[test]
    fn test_icosahedron_faces_point_outward() {
        let vertices = icosahedron_vertices(1.0);
        for [a, b, c] in ICOSAHEDRON_FACES {
            let (va, vb, vc) = (vertices[a], vertices[b], vertices[c]);
            let normal = (vb - va).cross(vc - va);
            let centroid = (va + vb + vc) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_torus_knot_grid_sizes() {
        let points = torus_knot_points(3.0, 1.0, 80, 8, 2, 3);
        assert_eq!(points.len(), 81 * 9);
        assert!(points.iter().all(|p| p.is_finite()));

        // The tube never strays past radius * 1.5 + tube from the center
        assert!(points.iter().all(|p| p.length() <= 3.0 * 1.5 + 1.0 + 1e-3));

        let lines = torus_knot_wire_indices(80, 8);
        assert_eq!(lines.len(), 80 * 8 * 3);
        let max = lines.iter().flatten().copied().max().unwrap();
        assert!((max as usize) < points.len());
    }

    #[test]
    fn test_segment_positions_flatten_in_order() {
        let segments = [
            [Vec3::ZERO, Vec3::X],
            [Vec3::Y, Vec3::Z],
        ];

        assert_eq!(
            segment_positions(&segments),
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0]
            ]
        );
    }
}
