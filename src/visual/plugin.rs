use bevy::prelude::*;

use crate::{
    camera::CameraSet,
    config::NetworkConfig,
    network::VisualizationState,
    visual::{
        core_knot::sync_core_knot,
        edges::sync_line_buffers,
        interactions::{
            HoverState, TrailEntities, pick_hovered_node, spawn_tooltip, sync_ghost_trails,
            update_tooltip,
        },
        nodes::sync_nodes,
        setup::{SceneRng, setup_network, setup_scene},
    },
};

pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(NetworkConfig::load_or_default())
            .init_resource::<HoverState>()
            .init_resource::<TrailEntities>()
            // Build the network first, then spawn what draws it
            .add_systems(Startup, (setup_network, setup_scene, spawn_tooltip).chain())
            .add_systems(
                Update,
                (
                    // Model
                    tick_network,
                    tick_trails,
                    // Renderer sync
                    sync_nodes,
                    sync_line_buffers,
                    sync_core_knot,
                    sync_ghost_trails,
                    // Pointer
                    pick_hovered_node,
                    update_tooltip,
                )
                    .chain()
                    .after(CameraSet),
            );
    }
}

/// System: Advance the whole network to the current clock reading
fn tick_network(time: Res<Time>, mut state: ResMut<VisualizationState>) {
    state.tick(time.elapsed_secs());
}

/// System: Age ghost trails and maybe leave new ones behind
fn tick_trails(mut state: ResMut<VisualizationState>, mut rng: ResMut<SceneRng>) {
    let before = state.trails().len();
    state.tick_trails(&mut rng.0);
    let after = state.trails().len();

    if before != after {
        trace!("Ghost trails: {before} -> {after}");
    }
}
