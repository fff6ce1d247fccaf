use bevy::prelude::*;

use crate::{network::VisualizationState, visual::nodes::vec4_to_color};

#[derive(Component)]
pub struct CoreKnotMesh {
    pub material: Handle<StandardMaterial>,
}

/// System: Apply the core knot's rotation and hue
pub fn sync_core_knot(
    state: Res<VisualizationState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut knots: Query<(&CoreKnotMesh, &mut Transform)>,
) {
    let core = state.core();

    for (knot, mut transform) in &mut knots {
        let r = core.rotation;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);

        if let Some(material) = materials.get_mut(&knot.material) {
            material.base_color = vec4_to_color(core.color);
        }
    }
}
