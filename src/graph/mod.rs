mod catalog;
mod edge;
mod generator;
mod node_id;

pub use catalog::{Behavior, CatalogError, NodeCatalog, NodeCategory};
pub use edge::{Edge, EdgeSet};
pub use generator::{
    EdgeRule, SpatialGraph, clamp_probability, connect, generate, sample_positions,
};
pub use node_id::NodeId;
