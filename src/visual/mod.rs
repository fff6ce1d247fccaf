pub mod core_knot;
pub mod edges;
pub mod interactions;
pub mod meshes;
pub mod nodes;
pub mod plugin;
pub mod setup;
