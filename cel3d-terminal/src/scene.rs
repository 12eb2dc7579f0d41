/// Demo scenes: built-in solids and the loaded raw mesh
use std::path::{Path, PathBuf};

use cel3d_core::{primitives, LoaderConfig, Mesh, MeshLoader, Transform, Vector3f};
use clap::ValueEnum;
use log::{info, warn};
use nalgebra::{Matrix4, Vector3};

/// Which scene is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// A single torus
    Basic,
    /// Cube, sphere, cone and a double-sided plane
    Primitives,
    /// The mesh read from the raw file
    Mesh,
}

impl SceneKind {
    /// The scene after this one, wrapping around
    pub fn next(self) -> Self {
        match self {
            SceneKind::Basic => SceneKind::Primitives,
            SceneKind::Primitives => SceneKind::Mesh,
            SceneKind::Mesh => SceneKind::Basic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Basic => "torus",
            SceneKind::Primitives => "primitives",
            SceneKind::Mesh => "mesh",
        }
    }
}

/// A mesh placed in the world
pub struct SceneObject {
    pub mesh: Mesh,
    pub model: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(mesh: Mesh, model: Matrix4<f32>) -> Self {
        Self { mesh, model }
    }
}

fn rgb(r: f32, g: f32, b: f32) -> Vector3f {
    Vector3f::from_array([r, g, b])
}

fn basic_scene() -> Vec<SceneObject> {
    vec![SceneObject::new(
        primitives::torus(2.0, 5.0, 20, 40).with_color(rgb(0.0, 1.0, 0.0)),
        Transform::rotation_degrees(Vector3::x(), 115.0),
    )]
}

fn primitives_scene() -> Vec<SceneObject> {
    vec![
        SceneObject::new(
            primitives::cube(4.0).with_color(rgb(1.0, 0.0, 0.0)),
            Transform::rotation_degrees(Vector3::y(), 45.0),
        ),
        SceneObject::new(
            primitives::uv_sphere(3.0, 32, 16).with_color(rgb(0.0, 1.0, 0.0)),
            Transform::translation_matrix(-10.0, 0.0, 0.0),
        ),
        SceneObject::new(
            primitives::cone(5.0, 8.0, 20, 20).with_color(rgb(0.75, 0.5, 0.0)),
            Transform::translation_matrix(10.0, -5.0, 0.0)
                * Transform::rotation_degrees(Vector3::x(), -90.0),
        ),
        SceneObject::new(
            primitives::plane(10.0).with_color(rgb(0.0, 0.5, 0.75)),
            Transform::translation_matrix(-5.0, -10.0, 0.0)
                * Transform::rotation_degrees(Vector3::x(), -45.0),
        ),
    ]
}

/// All scenes, with the raw mesh loaded the first time its scene is shown
pub struct SceneLibrary {
    basic: Vec<SceneObject>,
    primitives: Vec<SceneObject>,
    loaded: Vec<SceneObject>,
    loader: MeshLoader,
    mesh_path: PathBuf,
    load_attempted: bool,
}

impl SceneLibrary {
    pub fn new(mesh_path: impl Into<PathBuf>, loader_config: LoaderConfig) -> Self {
        Self {
            basic: basic_scene(),
            primitives: primitives_scene(),
            loaded: Vec::new(),
            loader: MeshLoader::with_config(loader_config),
            mesh_path: mesh_path.into(),
            load_attempted: false,
        }
    }

    pub fn mesh_path(&self) -> &Path {
        &self.mesh_path
    }

    /// Objects to draw for a scene. An unreadable mesh file gives an empty scene.
    pub fn objects(&mut self, kind: SceneKind) -> &[SceneObject] {
        match kind {
            SceneKind::Basic => &self.basic,
            SceneKind::Primitives => &self.primitives,
            SceneKind::Mesh => {
                self.ensure_mesh_loaded();
                &self.loaded
            }
        }
    }

    fn ensure_mesh_loaded(&mut self) {
        if self.load_attempted {
            return;
        }
        self.load_attempted = true;

        info!("loading {} ...", self.mesh_path.display());
        let count = self.loader.load(&self.mesh_path);
        if count == 0 {
            warn!("no mesh to show for {}", self.mesh_path.display());
            return;
        }

        self.loaded = vec![SceneObject::new(self.loader.to_mesh(), Matrix4::identity())];
        info!("vertices = {}", count);

        // Triangles now own their copy of the data
        self.loader.release_arrays();
    }
}
