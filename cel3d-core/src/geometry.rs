/// Geometry primitives for 3D rendering
use crate::vector::{Vector2f, Vector3f};

/// A 3D vertex with position, normal, colour and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vector3f,
    pub normal: Vector3f,
    pub color: Vector3f,
    pub uv: Vector2f,
}

impl Vertex {
    pub fn new(position: Vector3f, normal: Vector3f, color: Vector3f, uv: Vector2f) -> Self {
        Self {
            position,
            normal,
            color,
            uv,
        }
    }

    /// Vertex with a neutral grey colour and no texture coordinate
    pub fn with_normal(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Vector3f::from_array([x, y, z]),
            normal: Vector3f::from_array([nx, ny, nz]),
            color: Vector3f::from_array([0.5, 0.5, 0.5]),
            uv: Vector2f::zero(),
        }
    }
}

/// A triangle face defined by three vertices, counter-clockwise when front facing
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices.
    ///
    /// Degenerate triangles yield the zero vector.
    pub fn face_normal(&self) -> Vector3f {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let mut normal = (v1 - v0).cross(&(v2 - v0));
        if normal.unitize().is_err() {
            return Vector3f::zero();
        }
        normal
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Build a mesh from a flat vertex list, one triangle per three vertices.
    /// A trailing incomplete triple is ignored.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut mesh = Self::with_capacity(vertices.len() / 3);
        for tri in vertices.chunks_exact(3) {
            mesh.add_triangle(Triangle::new(tri[0], tri[1], tri[2]));
        }
        mesh
    }

    /// Flatten back into a vertex list, three vertices per triangle
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Paint every vertex with a single colour
    pub fn with_color(mut self, color: Vector3f) -> Self {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                vertex.color = color;
            }
        }
        self
    }
}
