pub mod pointer;
pub mod tooltip;
pub mod trail_effects;

pub use pointer::{HoverState, pick_hovered_node};
pub use tooltip::{spawn_tooltip, update_tooltip};
pub use trail_effects::{TrailEntities, sync_ghost_trails};
