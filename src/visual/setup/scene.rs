use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    config::NetworkConfig,
    graph::NodeCatalog,
    network::{
        VisualizationState,
        factory::{NODE_BODY_RADIUS, SHELL_SCALE},
    },
    visual::{
        core_knot::CoreKnotMesh,
        edges::{BackgroundLines, EdgeLines, background_colors},
        meshes::{
            dynamic_line_mesh, solid_icosahedron_mesh, torus_knot_wire_mesh,
            wire_icosahedron_mesh,
        },
        nodes::{GraphNode, NodeShell},
    },
};

/// Inner node bodies are near-black
const BODY_COLOR: Color = Color::srgb(0.067, 0.067, 0.067);

/// Node edges are faint white lines
const EDGE_OPACITY: f32 = 0.08;

const KNOT_RADIUS: f32 = 3.0;
const KNOT_TUBE: f32 = 1.0;
const KNOT_TUBULAR_SEGMENTS: usize = 80;
const KNOT_RADIAL_SEGMENTS: usize = 8;
const KNOT_P: u32 = 2;
const KNOT_Q: u32 = 3;

/// The one random source for everything built or spawned at runtime
#[derive(Resource)]
pub struct SceneRng(pub StdRng);

impl SceneRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => SceneRng(StdRng::seed_from_u64(seed)),
            None => SceneRng(StdRng::from_os_rng()),
        }
    }
}

/// Wire shell mesh, shared by every node and ghost
#[derive(Resource, Debug, Clone)]
pub struct SceneMeshes {
    pub shell: Handle<Mesh>,
}

/// Builds the network itself: Generator, then Factory
pub fn setup_network(mut commands: Commands, config: Res<NetworkConfig>) {
    let catalog = NodeCatalog::load().unwrap_or_else(|err| {
        error!("Node catalog rejected, using built-in categories: {err}");
        NodeCatalog::builtin()
    });

    let mut rng = SceneRng::from_seed(config.seed);
    let state = VisualizationState::build(&config, &catalog, &mut rng.0);

    info!(
        "Network built: {} nodes, {} edges, {} background lines",
        state.nodes().len(),
        state.edges().len(),
        state.background().map_or(0, |web| web.len())
    );
    if let Some(seed) = config.seed {
        info!("Scene seed: {seed}");
    }
    if state.edges().is_empty() {
        warn!("Edge rule produced no edges; nodes will float unconnected");
    }

    commands.insert_resource(rng);
    commands.insert_resource(state);
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<VisualizationState>,
) {
    let body_mesh = meshes.add(solid_icosahedron_mesh(NODE_BODY_RADIUS));
    let shell_mesh = meshes.add(wire_icosahedron_mesh(NODE_BODY_RADIUS));

    let body_material = materials.add(StandardMaterial {
        base_color: BODY_COLOR,
        unlit: true,
        ..default()
    });

    // === Nodes: solid body plus a colored wire shell ===
    for node in state.nodes() {
        let shell_material = materials.add(line_material(Color::NONE));

        commands.spawn((
            GraphNode { node_id: node.id },
            NodeShell {
                material: shell_material.clone(),
            },
            Transform::from_translation(node.position),
            Visibility::default(),
            children![
                (
                    Mesh3d(body_mesh.clone()),
                    MeshMaterial3d(body_material.clone()),
                ),
                (
                    Mesh3d(shell_mesh.clone()),
                    MeshMaterial3d(shell_material),
                    Transform::from_scale(Vec3::splat(SHELL_SCALE)),
                ),
            ],
        ));
    }

    // === Edge lines ===
    let edge_mesh = meshes.add(dynamic_line_mesh(state.edge_segments(), None));
    commands.spawn((
        EdgeLines(edge_mesh.clone()),
        Mesh3d(edge_mesh),
        MeshMaterial3d(materials.add(line_material(Color::srgba(1.0, 1.0, 1.0, EDGE_OPACITY)))),
        Transform::default(),
    ));

    // === Background web ===
    if let Some(web) = state.background().filter(|web| !web.is_empty()) {
        let segments: Vec<[Vec3; 2]> = web.lines().iter().map(|l| [l.start, l.end]).collect();
        let web_mesh = meshes.add(dynamic_line_mesh(&segments, Some(background_colors(web))));
        commands.spawn((
            BackgroundLines(web_mesh.clone()),
            Mesh3d(web_mesh),
            MeshMaterial3d(materials.add(line_material(Color::WHITE))),
            Transform::default(),
        ));
    }

    // === Core knot ===
    let knot_mesh = meshes.add(torus_knot_wire_mesh(
        KNOT_RADIUS,
        KNOT_TUBE,
        KNOT_TUBULAR_SEGMENTS,
        KNOT_RADIAL_SEGMENTS,
        KNOT_P,
        KNOT_Q,
    ));
    let knot_material = materials.add(line_material(Color::NONE));
    commands.spawn((
        CoreKnotMesh {
            material: knot_material.clone(),
        },
        Mesh3d(knot_mesh),
        MeshMaterial3d(knot_material),
        Transform::default(),
    ));

    commands.insert_resource(SceneMeshes { shell: shell_mesh });

    info!("Scene spawned");
}

/// Unlit, alpha-blended material for wireframes and line buffers
pub fn line_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}
