pub mod scene;

pub use scene::{SceneMeshes, SceneRng, line_material, setup_network, setup_scene};
