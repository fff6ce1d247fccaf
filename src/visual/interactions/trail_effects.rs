use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::{
    network::{
        VisualizationState,
        factory::SHELL_SCALE,
        trails::{GhostTrail, TrailId},
    },
    visual::{
        nodes::vec4_to_color,
        setup::{SceneMeshes, line_material},
    },
};

/// Live ghost entities, keyed by the trail they draw
#[derive(Resource, Default)]
pub struct TrailEntities {
    entities: HashMap<TrailId, Entity>,
}

#[derive(Component)]
pub struct GhostShell {
    pub material: Handle<StandardMaterial>,
}

fn ghost_transform(trail: &GhostTrail) -> Transform {
    let snapshot = &trail.snapshot;
    Transform::from_translation(snapshot.position)
        .with_rotation(Quat::from_rotation_y(snapshot.rotation_y))
        .with_scale(Vec3::splat(snapshot.scale * SHELL_SCALE))
}

/// System: Mirror the trail manager onto wireframe ghost entities
///
/// Removed trails are despawned first so an id is never drawn after
/// the manager has retired it.
pub fn sync_ghost_trails(
    mut commands: Commands,
    mut state: ResMut<VisualizationState>,
    mut registry: ResMut<TrailEntities>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene_meshes: Res<SceneMeshes>,
    ghosts: Query<&GhostShell>,
) {
    let removed: Vec<TrailId> = state.trails_mut().drain_removed().collect();
    for id in removed {
        let Some(entity) = registry.entities.remove(&id) else {
            continue;
        };
        if let Ok(ghost) = ghosts.get(entity) {
            materials.remove(&ghost.material);
        }
        commands.entity(entity).despawn();
        trace!("Ghost {} despawned", id.0);
    }

    for trail in state.trails().iter() {
        let color = vec4_to_color(trail.color());

        match registry.entities.get(&trail.id) {
            Some(&entity) => {
                let Ok(ghost) = ghosts.get(entity) else {
                    continue;
                };
                if let Some(material) = materials.get_mut(&ghost.material) {
                    material.base_color = color;
                }
            }
            None => {
                let material = materials.add(line_material(color));
                let entity = commands
                    .spawn((
                        GhostShell {
                            material: material.clone(),
                        },
                        Mesh3d(scene_meshes.shell.clone()),
                        MeshMaterial3d(material),
                        ghost_transform(trail),
                    ))
                    .id();
                registry.entities.insert(trail.id, entity);
            }
        }
    }
}
