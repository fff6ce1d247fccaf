use bevy::math::{Vec3, Vec4};
use rand::Rng;

use crate::graph::{NodeCatalog, NodeCategory, NodeId};
use crate::network::color::{hsla, shell_hue};

/// Circumradius of the inner solid body
pub const NODE_BODY_RADIUS: f32 = 0.6;

/// The wireframe shell is the body scaled up by this factor
pub const SHELL_SCALE: f32 = 1.4;

/// Phase offsets are drawn from [0, PHASE_OFFSET_RANGE)
pub const PHASE_OFFSET_RANGE: f32 = 10.0;

pub const SHELL_OPACITY: f32 = 0.85;
pub const SHELL_SATURATION: f32 = 1.0;
pub const SHELL_LIGHTNESS: f32 = 0.6;

/// Visual animation state of a node's shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisual {
    /// Shell color, RGB + opacity
    pub shell_color: Vec4,
    /// Accumulated rotation about Y (spinning categories only)
    pub rotation_y: f32,
    pub visible: bool,
}

/// A node of the network: category-tagged, desynchronised by its phase
#[derive(Debug, Clone)]
pub struct NodeEntity {
    pub id: NodeId,
    pub position: Vec3,
    pub category: NodeCategory,
    pub phase_offset: f32,
    pub scale: f32,
    pub visual: NodeVisual,
}

impl NodeEntity {
    /// Radius of the pick sphere at the current pulse scale
    pub fn hit_radius(&self) -> f32 {
        NODE_BODY_RADIUS * self.scale
    }

    pub fn label(&self) -> &str {
        &self.category.label
    }
}

/// Build node `index` at `position`, with its category picked round-robin
/// from the catalog and a fresh random phase offset
pub fn build_node(
    index: usize,
    position: Vec3,
    catalog: &NodeCatalog,
    rng: &mut impl Rng,
) -> NodeEntity {
    let category = catalog.category_for(index).clone();
    let phase_offset = rng.random_range(0.0..PHASE_OFFSET_RANGE);
    let hue = shell_hue(category.base_hue, 0.0, index);

    NodeEntity {
        id: NodeId(index),
        position,
        category,
        phase_offset,
        scale: 1.0,
        visual: NodeVisual {
            shell_color: hsla(hue, SHELL_SATURATION, SHELL_LIGHTNESS, SHELL_OPACITY),
            rotation_y: 0.0,
            visible: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_build_node_assigns_category_round_robin() {
        let catalog = NodeCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(11);

        let nodes: Vec<_> = (0..20)
            .map(|i| build_node(i, Vec3::ZERO, &catalog, &mut rng))
            .collect();

        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.id, NodeId(i));
            assert_eq!(&node.category, catalog.category_for(i));
        }

        let ai = nodes.iter().filter(|n| n.label() == "AI").count();
        let human = nodes.iter().filter(|n| n.label() == "Human").count();
        let sensor = nodes.iter().filter(|n| n.label() == "Sensor").count();
        assert_eq!((ai, human, sensor), (7, 7, 6));
    }

    #[test]
    fn test_phase_offsets_in_range_and_distinct() {
        let catalog = NodeCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(12);

        let phases: Vec<f32> = (0..50)
            .map(|i| build_node(i, Vec3::ZERO, &catalog, &mut rng).phase_offset)
            .collect();

        assert!(phases.iter().all(|p| (0.0..PHASE_OFFSET_RANGE).contains(p)));
        assert!(
            phases.windows(2).any(|w| w[0] != w[1]),
            "phase offsets should differ between nodes"
        );
    }

    #[test]
    fn test_initial_visual_state() {
        let catalog = NodeCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(13);
        let node = build_node(0, Vec3::new(1.0, 2.0, 3.0), &catalog, &mut rng);

        assert_eq!(node.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.scale, 1.0);
        assert!(node.visual.visible);
        assert_eq!(node.visual.shell_color.w, SHELL_OPACITY);
        assert!((node.hit_radius() - NODE_BODY_RADIUS).abs() < f32::EPSILON);
    }
}
