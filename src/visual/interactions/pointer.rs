use bevy::prelude::*;

use crate::{
    camera::MainCamera,
    graph::NodeId,
    input::PointerNdc,
    network::VisualizationState,
};

/// The node under the pointer, if any
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct HoverState {
    pub hovered_node: Option<NodeId>,
    pub label: Option<String>,
}

fn world_from_transform(transform: &Transform) -> Mat4 {
    Mat4::from_scale_rotation_translation(transform.scale, transform.rotation, transform.translation)
}

/// World-space ray through a point in normalized device coordinates
pub fn ray_from_ndc(
    world_from_view: Mat4,
    clip_from_view: Mat4,
    ndc: Vec2,
) -> Option<(Vec3, Vec3)> {
    let world_from_clip = world_from_view * clip_from_view.inverse();

    // Reverse-z: the near plane sits at depth 1
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !(near.is_finite() && far.is_finite()) {
        return None;
    }

    let direction = (far - near).try_normalize()?;
    Some((near, direction))
}

/// System: Pick the nearest node under the pointer every frame
///
/// Runs even when the pointer is still, since nodes move under it. Reads
/// the camera's local transform, which this frame's orbit has already
/// written; the global one only catches up in PostUpdate.
pub fn pick_hovered_node(
    pointer: Res<PointerNdc>,
    state: Res<VisualizationState>,
    camera_query: Query<(&Camera, &Transform), With<MainCamera>>,
    mut hover: ResMut<HoverState>,
) {
    let hit = pointer.ndc.and_then(|ndc| {
        let (camera, transform) = camera_query.single().ok()?;
        let world_from_view = world_from_transform(transform);
        let (origin, direction) = ray_from_ndc(world_from_view, camera.clip_from_view(), ndc)?;
        state.pick(origin, direction)
    });

    let next = match hit {
        Some((hit, node)) => HoverState {
            hovered_node: Some(hit.node),
            label: Some(node.label().to_owned()),
        },
        None => HoverState::default(),
    };

    if *hover != next {
        if let Some(node) = next.hovered_node {
            debug!("Hovering node {node}");
        }
        *hover = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitRig;

    fn world_from_view(transform: Transform) -> Mat4 {
        world_from_transform(&transform)
    }

    fn clip_from_view() -> Mat4 {
        Mat4::perspective_infinite_reverse_rh(75f32.to_radians(), 16.0 / 9.0, 0.1)
    }

    #[test]
    fn test_center_ray_points_at_origin() {
        let rig = OrbitRig::default();
        let (origin, direction) =
            ray_from_ndc(world_from_view(rig.transform()), clip_from_view(), Vec2::ZERO).unwrap();

        assert!(origin.distance(rig.eye()) < 0.2);
        assert!(direction.distance(-rig.eye().normalize()) < 1e-3);
    }

    #[test]
    fn test_ray_follows_this_frames_orbit() {
        let mut rig = OrbitRig::default();
        let before = rig.eye();

        // Advance the orbit as the camera system does, then aim from the
        // freshly written transform
        rig.advance(30.0);
        let (origin, direction) =
            ray_from_ndc(world_from_view(rig.transform()), clip_from_view(), Vec2::ZERO).unwrap();

        assert!(before.distance(rig.eye()) > 1.0);
        assert!(origin.distance(rig.eye()) < 0.2);
        assert!(direction.distance(-rig.eye().normalize()) < 1e-3);
    }

    #[test]
    fn test_off_center_ray_leans_toward_pointer() {
        let rig = OrbitRig::default();
        let (_, direction) =
            ray_from_ndc(world_from_view(rig.transform()), clip_from_view(), Vec2::new(0.5, 0.0))
                .unwrap();

        // Default rig sits on +Z looking down -Z, so screen right is +X
        assert!(direction.x > 0.0);
        assert!(direction.z < 0.0);
    }
}
