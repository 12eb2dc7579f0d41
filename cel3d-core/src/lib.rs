/// cel3d Core Library - Shared geometry, mesh loading and shading logic
/// 
/// This library provides the stateless core functionality for the cel-shaded
/// viewer: the `VectorN` math type, the raw mesh loader, built-in solids,
/// camera transforms and toon shading.

pub mod error;
pub mod geometry;
pub mod light;
pub mod mesh_loader;
pub mod primitives;
pub mod projection;
pub mod shading;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use error::{GeometryError, GeometryResult, MeshError, MeshResult};
pub use geometry::{Mesh, Triangle, Vertex};
pub use light::OrbitingLight;
pub use mesh_loader::{LoaderConfig, MeshLoader};
pub use projection::{Camera, ScreenPoint};
pub use transform::{Transform, ViewState};
pub use vector::{
    Scalar, Vector2d, Vector2f, Vector2i, Vector3d, Vector3f, Vector3i, Vector4d, Vector4f,
    Vector4i, VectorN,
};
