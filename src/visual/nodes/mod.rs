use bevy::prelude::*;

use crate::{graph::NodeId, network::VisualizationState};

#[derive(Component)]
pub struct GraphNode {
    pub node_id: NodeId,
}

/// Per-node shell material, recolored every frame
#[derive(Component)]
pub struct NodeShell {
    pub material: Handle<StandardMaterial>,
}

pub fn vec4_to_color(rgba: Vec4) -> Color {
    Color::srgba(rgba.x, rgba.y, rgba.z, rgba.w)
}

/// System: Copy node position, pulse, spin, color and visibility onto entities
pub fn sync_nodes(
    state: Res<VisualizationState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut nodes: Query<(&GraphNode, &NodeShell, &mut Transform, &mut Visibility)>,
) {
    for (graph_node, shell, mut transform, mut visibility) in &mut nodes {
        let Some(node) = state.nodes().get(graph_node.node_id.index()) else {
            continue;
        };

        transform.translation = node.position;
        transform.scale = Vec3::splat(node.scale);
        transform.rotation = Quat::from_rotation_y(node.visual.rotation_y);

        *visibility = if node.visual.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        if let Some(material) = materials.get_mut(&shell.material) {
            material.base_color = vec4_to_color(node.visual.shell_color);
        }
    }
}
