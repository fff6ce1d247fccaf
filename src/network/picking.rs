use bevy::math::Vec3;

use crate::graph::NodeId;

/// Something the pointer ray can hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    pub node: NodeId,
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    /// Distance along the ray to the entry point
    pub distance: f32,
}

/// Distance along the ray to the first intersection with a sphere
///
/// `direction` must be normalized. Rays starting inside the sphere
/// report the exit point; spheres entirely behind the ray miss.
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;

    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;

    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// The single nearest target hit by the ray, or `None` on a miss
pub fn pick_nearest(
    origin: Vec3,
    direction: Vec3,
    targets: impl IntoIterator<Item = PickTarget>,
) -> Option<PickHit> {
    let direction = direction.try_normalize()?;

    targets
        .into_iter()
        .filter_map(|target| {
            ray_sphere(origin, direction, target.center, target.radius).map(|distance| PickHit {
                node: target.node,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
