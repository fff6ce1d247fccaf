use bevy::prelude::*;

use crate::{
    network::{BackgroundWeb, VisualizationState},
    visual::meshes::segment_positions,
};

/// The line-list mesh holding every node edge
#[derive(Component)]
pub struct EdgeLines(pub Handle<Mesh>);

/// The vertex-colored line-list mesh of the background web
#[derive(Component)]
pub struct BackgroundLines(pub Handle<Mesh>);

/// Two vertex colors per background line, one for each end
pub fn background_colors(web: &BackgroundWeb) -> Vec<[f32; 4]> {
    web.lines()
        .iter()
        .flat_map(|line| {
            let rgba = line.color.to_array();
            [rgba, rgba]
        })
        .collect()
}

/// System: Rewrite edge endpoints and background colors in place
pub fn sync_line_buffers(
    state: Res<VisualizationState>,
    mut meshes: ResMut<Assets<Mesh>>,
    edges: Query<&EdgeLines>,
    background: Query<&BackgroundLines>,
) {
    for EdgeLines(handle) in &edges {
        if let Some(mesh) = meshes.get_mut(handle) {
            mesh.insert_attribute(
                Mesh::ATTRIBUTE_POSITION,
                segment_positions(state.edge_segments()),
            );
        }
    }

    let Some(web) = state.background() else {
        return;
    };

    for BackgroundLines(handle) in &background {
        if let Some(mesh) = meshes.get_mut(handle) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, background_colors(web));
        }
    }
}
