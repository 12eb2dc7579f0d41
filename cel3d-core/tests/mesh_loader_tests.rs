/// Integration tests for the raw mesh loader

use std::fs;
use std::path::PathBuf;

use cel3d_core::mesh_loader::{write_raw_mesh, LoaderConfig, MeshLoader, RECORD_SIZE};
use cel3d_core::{primitives, MeshError, Vector2f, Vector3f, Vertex};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cel3d-{}-{}.raw", std::process::id(), name))
}

fn record(i: usize) -> Vertex {
    let f = i as f32;
    Vertex::new(
        Vector3f::from_array([f, -f, f * 0.25]),
        Vector3f::from_array([0.0, 0.0, 1.0]),
        Vector3f::from_array([f / 10.0, 0.5, 1.0 - f / 10.0]),
        Vector2f::from_array([f / 4.0, 1.0 / (f + 1.0)]),
    )
}

fn write_file(name: &str, vertices: &[Vertex]) -> PathBuf {
    let mut data = Vec::new();
    write_raw_mesh(&mut data, vertices).unwrap();
    let path = temp_path(name);
    fs::write(&path, data).unwrap();
    path
}

// ─── Round trip ───────────────────────────────────────────────

#[test]
fn round_trip_reproduces_every_float() {
    let vertices: Vec<Vertex> = (0..6).map(record).collect();
    let path = write_file("round-trip", &vertices);

    let mut loader = MeshLoader::new();
    assert_eq!(loader.load(&path), 6);
    assert_eq!(loader.size(), 6);
    assert_eq!(loader.complete_count(), 6);

    for (i, v) in vertices.iter().enumerate() {
        assert_eq!(loader.positions()[i], *v.position.as_array());
        assert_eq!(loader.normals()[i], *v.normal.as_array());
        assert_eq!(loader.colours()[i], *v.color.as_array());
        assert_eq!(loader.uvs()[i], *v.uv.as_array());
        assert_eq!(loader.vertex(i), Some(*v));
    }
    assert_eq!(loader.vertex_array().len(), 18);
    assert_eq!(loader.normal_array().len(), 18);
    assert_eq!(loader.colour_array().len(), 18);
    assert_eq!(loader.uv_array().len(), 12);

    fs::remove_file(path).unwrap();
}

#[test]
fn loaded_primitive_converts_back_to_triangles() {
    let cube = primitives::cube(2.0);
    let vertices: Vec<Vertex> = cube.vertices().copied().collect();
    let path = write_file("cube", &vertices);

    let mut loader = MeshLoader::new();
    assert_eq!(loader.load(&path), 36);
    assert_eq!(loader.to_mesh(), cube);

    fs::remove_file(path).unwrap();
}

// ─── Ownership ────────────────────────────────────────────────

#[test]
fn reload_replaces_previous_buffers() {
    let first = write_file("reload-a", &(0..9).map(record).collect::<Vec<_>>());
    let second = write_file("reload-b", &(3..6).map(record).collect::<Vec<_>>());

    let mut loader = MeshLoader::new();
    assert_eq!(loader.load(&first), 9);
    assert_eq!(loader.load(&second), 3);
    assert_eq!(loader.size(), 3);
    assert_eq!(loader.vertex_array().len(), 9);
    assert_eq!(loader.positions()[0], *record(3).position.as_array());

    fs::remove_file(first).unwrap();
    fs::remove_file(second).unwrap();
}

#[test]
fn release_is_idempotent() {
    let path = write_file("release", &[record(1), record(2), record(3)]);

    let mut loader = MeshLoader::new();
    loader.load(&path);
    loader.release_arrays();
    assert_eq!(loader.size(), 0);
    assert!(loader.vertex_array().is_empty());
    assert!(loader.to_mesh().triangles.is_empty());
    loader.release_arrays();
    assert!(!loader.is_loaded());

    fs::remove_file(path).unwrap();
}

// ─── Failure modes ────────────────────────────────────────────

#[test]
fn missing_file_returns_zero() {
    let mut loader = MeshLoader::new();
    assert_eq!(loader.load("/nonexistent/cel3d/mesh.raw"), 0);
    assert_eq!(loader.size(), 0);
    assert!(matches!(
        loader.try_load("/nonexistent/cel3d/mesh.raw"),
        Err(MeshError::Io(_))
    ));
}

#[test]
fn missing_file_keeps_previous_mesh() {
    let path = write_file("keep", &[record(1), record(2), record(3)]);

    let mut loader = MeshLoader::new();
    assert_eq!(loader.load(&path), 3);
    assert_eq!(loader.load("/nonexistent/cel3d/mesh.raw"), 0);
    assert_eq!(loader.size(), 3);
    assert_eq!(loader.positions()[2], *record(3).position.as_array());

    fs::remove_file(path).unwrap();
}

#[test]
fn truncated_file_is_bounded_by_declared_count() {
    let mut data = Vec::new();
    write_raw_mesh(&mut data, &(0..5).map(record).collect::<Vec<_>>()).unwrap();
    // Two full records plus a partial third
    data.truncate(4 + 2 * RECORD_SIZE + 20);
    let path = temp_path("truncated");
    fs::write(&path, data).unwrap();

    let mut loader = MeshLoader::new();
    let count = loader.load(&path);
    assert!(count > 0 && count <= 5);
    assert_eq!(count, 3);
    assert_eq!(loader.effective_count(), count);
    assert_eq!(loader.size(), 5);
    assert_eq!(loader.complete_count(), 2);

    // Buffers keep the declared capacity and are fully addressable
    assert_eq!(loader.positions().len(), 5);
    assert_eq!(loader.uvs().len(), 5);
    for i in 0..loader.size() {
        assert!(loader.vertex(i).is_some());
    }
    assert!(loader.vertex(5).is_none());

    fs::remove_file(path).unwrap();
}

#[test]
fn header_only_file() {
    let vertices: Vec<Vertex> = primitives::cube(2.0).vertices().copied().collect();
    let cube = write_file("header-only-prev", &vertices);
    let path = temp_path("header-only");
    fs::write(&path, 5u32.to_le_bytes()).unwrap();

    let mut loader = MeshLoader::new();
    assert_eq!(loader.load(&cube), 36);
    let count = loader.load(&path);
    assert_eq!(count, 1);
    assert_eq!(loader.effective_count(), 1);
    assert_eq!(loader.complete_count(), 0);
    assert_eq!(loader.size(), 5);
    assert_eq!(loader.vertex_array().len(), 15);
    assert!(loader.vertex_array().iter().all(|&v| v == 0.0));

    fs::remove_file(cube).unwrap();
    fs::remove_file(path).unwrap();
}

#[test]
fn oversized_header_is_rejected() {
    let path = temp_path("oversized");
    fs::write(&path, 1_000u32.to_le_bytes()).unwrap();

    let mut loader = MeshLoader::with_config(LoaderConfig { max_vertices: 10 });
    assert_eq!(loader.load(&path), 0);
    assert!(matches!(
        loader.try_load(&path),
        Err(MeshError::TooManyVertices { declared: 1000, limit: 10 })
    ));
    assert!(!loader.is_loaded());

    fs::remove_file(path).unwrap();
}

#[test]
fn empty_file_leaves_empty_loader() {
    let path = temp_path("empty");
    fs::write(&path, b"").unwrap();

    let mut loader = MeshLoader::new();
    assert_eq!(loader.load(&path), 0);
    assert_eq!(loader.size(), 0);
    assert!(loader.vertex_array().is_empty());
    assert!(!loader.is_loaded());

    fs::remove_file(path).unwrap();
}
