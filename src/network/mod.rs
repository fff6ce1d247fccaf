//! The network core: everything the renderer draws, and how it changes
//! from one tick to the next. Nothing in here touches the ECS world.

pub mod animation;
pub mod background;
pub mod color;
pub mod core_knot;
pub mod edges;
pub mod factory;
pub mod picking;
pub mod trails;

use bevy::math::Vec3;
use bevy::prelude::Resource;
use rand::Rng;

use crate::config::NetworkConfig;
use crate::graph::{self, EdgeSet, NodeCatalog};
use crate::network::animation::{BehaviorOverlay, behavior_overlay, drift_step, orbit_position, pulse_scale};
use crate::network::color::hsla;
use crate::network::factory::{SHELL_LIGHTNESS, SHELL_OPACITY, SHELL_SATURATION, build_node};
use crate::network::picking::{PickHit, PickTarget, pick_nearest};

pub use animation::Placement;
pub use background::{BackgroundConfig, BackgroundWeb};
pub use core_knot::{CoreKnot, CoreMotion};
pub use factory::NodeEntity;
pub use trails::{TrailConfig, TrailManager, TrailSnapshot};

/// All mutable scene state, owned by a single writer
///
/// Ticks mutate everything in one pass, so state read after `tick` is
/// always consistent for the frame.
#[derive(Resource, Debug)]
pub struct VisualizationState {
    config: NetworkConfig,
    nodes: Vec<NodeEntity>,
    edges: EdgeSet,
    /// Current endpoints of every edge, in edge order
    edge_segments: Vec<[Vec3; 2]>,
    core: CoreKnot,
    background: Option<BackgroundWeb>,
    trails: TrailManager,
}

impl VisualizationState {
    /// Generator, then factory: sample and connect positions, then dress
    /// every position as a node
    pub fn build(config: &NetworkConfig, catalog: &NodeCatalog, rng: &mut impl Rng) -> Self {
        let spatial = graph::generate(config.node_count, config.bounding_radius, config.edge_rule, rng);

        let nodes: Vec<NodeEntity> = spatial
            .positions
            .iter()
            .enumerate()
            .map(|(index, &position)| build_node(index, position, catalog, rng))
            .collect();

        let background = config
            .background
            .as_ref()
            .map(|background| BackgroundWeb::generate(background, rng));

        let mut state = VisualizationState {
            config: config.clone(),
            nodes,
            edges: spatial.edges,
            edge_segments: Vec::new(),
            core: CoreKnot::new(config.core_motion),
            background,
            trails: TrailManager::new(),
        };
        edges::update_segments(
            &mut state.edge_segments,
            &state.edges,
            &state.nodes,
            0.0,
            None,
        );

        state
    }

    /// Advance every node, edge, the core and the background to time `t`
    ///
    /// `t` is absolute elapsed seconds; frame deltas never enter the math
    /// except for the per-tick spin and drift steps.
    pub fn tick(&mut self, t: f32) {
        let placement = self.config.placement;
        let behaviors = self.config.behaviors;

        for (index, node) in self.nodes.iter_mut().enumerate() {
            let category = &node.category;
            let phase = node.phase_offset;

            node.position = match placement {
                Placement::Orbit {
                    base_radius,
                    amplitude,
                } => orbit_position(t, category.float_speed, phase, base_radius, amplitude),
                Placement::Drift => drift_step(node.position, t, category.float_speed, phase),
            };

            node.scale = pulse_scale(t, category.pulse_speed, phase);

            let overlay = if behaviors {
                behavior_overlay(category.behavior, t, phase)
            } else {
                BehaviorOverlay::NEUTRAL
            };

            let hue = color::shell_hue(category.base_hue, t, index);
            let opacity = overlay.opacity.unwrap_or(SHELL_OPACITY);
            node.visual.shell_color = hsla(hue, SHELL_SATURATION, SHELL_LIGHTNESS, opacity);
            node.visual.rotation_y += overlay.spin_step;
            node.visual.visible = overlay.visible;
        }

        edges::update_segments(
            &mut self.edge_segments,
            &self.edges,
            &self.nodes,
            t,
            self.config.edge_bow,
        );

        self.core.tick(t);

        if let Some(background) = &mut self.background {
            background.tick(t);
        }
    }

    /// Age existing ghosts, then maybe leave a new ghost behind each node
    ///
    /// Runs after `tick` so ghosts copy this frame's look. Does nothing
    /// when trails are disabled.
    pub fn tick_trails(&mut self, rng: &mut impl Rng) {
        let Some(trail_config) = self.config.trails else {
            return;
        };

        self.trails
            .age_all(trail_config.opacity_decay, trail_config.life_decay);

        for node in &self.nodes {
            if !node.visual.visible {
                continue;
            }

            let snapshot = TrailSnapshot {
                position: node.position,
                scale: node.scale,
                rotation_y: node.visual.rotation_y,
                color: node.visual.shell_color.truncate(),
            };
            self.trails.spawn_maybe(
                snapshot,
                trail_config.spawn_probability,
                trail_config.start_opacity,
                rng,
            );
        }
    }

    /// Nearest visible node under a world-space ray
    pub fn pick(&self, origin: Vec3, direction: Vec3) -> Option<(PickHit, &NodeEntity)> {
        let targets = self
            .nodes
            .iter()
            .filter(|node| node.visual.visible)
            .map(|node| PickTarget {
                node: node.id,
                center: node.position,
                radius: node.hit_radius(),
            });

        let hit = pick_nearest(origin, direction, targets)?;
        Some((hit, &self.nodes[hit.node.index()]))
    }

    pub fn nodes(&self) -> &[NodeEntity] {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn edge_segments(&self) -> &[[Vec3; 2]] {
        &self.edge_segments
    }

    pub fn core(&self) -> &CoreKnot {
        &self.core
    }

    pub fn background(&self) -> Option<&BackgroundWeb> {
        self.background.as_ref()
    }

    pub fn trails(&self) -> &TrailManager {
        &self.trails
    }

    pub fn trails_mut(&mut self) -> &mut TrailManager {
        &mut self.trails
    }
}
