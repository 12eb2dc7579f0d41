/// Viewer settings resolved from the command line
use std::path::PathBuf;

use cel3d_core::LoaderConfig;

use crate::scene::SceneKind;

/// Mesh file shown in the mesh scene when none is given
pub const DEFAULT_MESH_PATH: &str = "models/concept-sedan-02-sport.raw";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mesh_path: PathBuf,
    pub start_scene: SceneKind,
    pub target_fps: u32,
    /// Cells an outline stroke reaches on each side of an edge, so strokes are `2 * w + 1` wide
    pub outline_width: usize,
    pub loader: LoaderConfig,
}

impl AppConfig {
    /// Target time per frame, never shorter than one millisecond
    pub fn frame_millis(&self) -> u64 {
        (1000 / self.target_fps.max(1) as u64).max(1)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::from(DEFAULT_MESH_PATH),
            start_scene: SceneKind::Basic,
            target_fps: 30,
            outline_width: 1,
            loader: LoaderConfig::default(),
        }
    }
}
