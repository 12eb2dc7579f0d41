/// Built-in solids
///
/// Every generator emits counter-clockwise front faces with smooth
/// per-vertex normals and a neutral grey colour; recolour with
/// `Mesh::with_color`.
use std::f32::consts::{PI, TAU};

use crate::geometry::{Mesh, Triangle, Vertex};
use crate::vector::{Vector2f, Vector3f};

const GREY: [f32; 3] = [0.5, 0.5, 0.5];

fn vertex(position: Vector3f, normal: Vector3f, uv: [f32; 2]) -> Vertex {
    Vertex::new(position, normal, Vector3f::from_array(GREY), Vector2f::from_array(uv))
}

fn v3(x: f32, y: f32, z: f32) -> Vector3f {
    Vector3f::from_array([x, y, z])
}

/// Axis-aligned cube centred on the origin
pub fn cube(size: f32) -> Mesh {
    let half = size / 2.0;
    let x = v3(1.0, 0.0, 0.0);
    let y = v3(0.0, 1.0, 0.0);
    let z = v3(0.0, 0.0, 1.0);

    // (normal, u, v) with u x v == normal
    let faces = [(z, x, y), (-z, y, x), (y, z, x), (-y, x, z), (x, y, z), (-x, z, y)];

    let mut mesh = Mesh::with_capacity(12);
    for (normal, u, v) in faces {
        let centre = normal * half;
        let corner = |su: f32, sv: f32| {
            vertex(
                centre + u * (su * half) + v * (sv * half),
                normal,
                [(su + 1.0) / 2.0, (sv + 1.0) / 2.0],
            )
        };
        let quad = [
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ];
        mesh.add_triangle(Triangle::new(quad[0], quad[1], quad[2]));
        mesh.add_triangle(Triangle::new(quad[0], quad[2], quad[3]));
    }
    mesh
}

/// UV sphere around the Y axis
pub fn uv_sphere(radius: f32, slices: usize, stacks: usize) -> Mesh {
    let point = |i: usize, j: usize| {
        let phi = PI * i as f32 / stacks as f32;
        let theta = TAU * j as f32 / slices as f32;
        let normal = v3(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
        vertex(
            normal * radius,
            normal,
            [j as f32 / slices as f32, i as f32 / stacks as f32],
        )
    };

    let mut mesh = Mesh::with_capacity(slices * stacks * 2);
    for i in 0..stacks {
        for j in 0..slices {
            let a = point(i, j);
            let b = point(i + 1, j);
            let c = point(i + 1, j + 1);
            let d = point(i, j + 1);

            // Skip degenerate triangles at poles
            if i != 0 {
                mesh.add_triangle(Triangle::new(a, d, b));
            }
            if i != stacks - 1 {
                mesh.add_triangle(Triangle::new(d, c, b));
            }
        }
    }
    mesh
}

/// Torus lying in the XY plane, centred on the origin.
///
/// `inner` is the tube radius, `outer` the distance from the centre to the tube axis.
pub fn torus(inner: f32, outer: f32, sides: usize, rings: usize) -> Mesh {
    let point = |i: usize, j: usize| {
        let theta = TAU * i as f32 / rings as f32;
        let phi = TAU * j as f32 / sides as f32;
        let normal = v3(phi.cos() * theta.cos(), phi.cos() * theta.sin(), phi.sin());
        let axis = v3(outer * theta.cos(), outer * theta.sin(), 0.0);
        vertex(
            axis + normal * inner,
            normal,
            [i as f32 / rings as f32, j as f32 / sides as f32],
        )
    };

    let mut mesh = Mesh::with_capacity(sides * rings * 2);
    for i in 0..rings {
        for j in 0..sides {
            let a = point(i, j);
            let b = point(i + 1, j);
            let c = point(i + 1, j + 1);
            let d = point(i, j + 1);
            mesh.add_triangle(Triangle::new(a, b, d));
            mesh.add_triangle(Triangle::new(b, c, d));
        }
    }
    mesh
}

/// Cone with its base on the XY plane and apex at `(0, 0, height)`
pub fn cone(base: f32, height: f32, slices: usize, stacks: usize) -> Mesh {
    let slant = (base * base + height * height).sqrt();
    let point = |k: usize, j: usize| {
        let t = k as f32 / stacks as f32;
        let theta = TAU * j as f32 / slices as f32;
        let r = base * (1.0 - t);
        vertex(
            v3(r * theta.cos(), r * theta.sin(), height * t),
            v3(height * theta.cos() / slant, height * theta.sin() / slant, base / slant),
            [j as f32 / slices as f32, t],
        )
    };

    let mut mesh = Mesh::with_capacity(slices * (stacks * 2 + 1));
    for k in 0..stacks {
        for j in 0..slices {
            let a = point(k, j);
            let b = point(k, j + 1);
            let c = point(k + 1, j + 1);
            let d = point(k + 1, j);
            mesh.add_triangle(Triangle::new(a, b, d));
            // The top ring collapses into the apex
            if k != stacks - 1 {
                mesh.add_triangle(Triangle::new(b, c, d));
            }
        }
    }

    let down = v3(0.0, 0.0, -1.0);
    let centre = vertex(Vector3f::zero(), down, [0.5, 0.5]);
    let rim = |j: usize| Vertex {
        normal: down,
        ..point(0, j)
    };
    for j in 0..slices {
        mesh.add_triangle(Triangle::new(centre, rim(j + 1), rim(j)));
    }
    mesh
}

/// Square in the XY plane, with separate front (+Z) and back (-Z) faces
pub fn plane(size: f32) -> Mesh {
    let h = size / 2.0;
    let front = v3(0.0, 0.0, 1.0);
    let corners = [v3(h, h, 0.0), v3(-h, h, 0.0), v3(-h, -h, 0.0), v3(h, -h, 0.0)];
    let uvs = [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

    let f: Vec<Vertex> = (0..4).map(|i| vertex(corners[i], front, uvs[i])).collect();
    let b: Vec<Vertex> = (0..4).rev().map(|i| vertex(corners[i], -front, uvs[i])).collect();

    let mut mesh = Mesh::with_capacity(4);
    for quad in [f, b] {
        mesh.add_triangle(Triangle::new(quad[0], quad[1], quad[2]));
        mesh.add_triangle(Triangle::new(quad[0], quad[2], quad[3]));
    }
    mesh
}
