/// Loader for the raw triangle mesh format
///
/// The file is a little-endian `u32` vertex count followed by up to that many
/// 44-byte records: position (3 x f32), normal (3 x f32), colour (3 x f32)
/// and uv (2 x f32). Consecutive vertex triples form triangles.
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info, warn};
use nom::{
    number::complete::{le_f32, le_u32},
    sequence::tuple,
    IResult,
};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Mesh, Vertex};
use crate::vector::{Vector2f, Vector3f};

/// Size in bytes of one vertex record
pub const RECORD_SIZE: usize = 11 * 4;

/// Loader settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Largest declared vertex count the loader will allocate for
    pub max_vertices: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_vertices: 1 << 24,
        }
    }
}

/// The four parallel vertex attribute buffers of a loaded mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    normals: Vec<f32>,
    colours: Vec<f32>,
    uvs: Vec<f32>,
}

impl MeshBuffers {
    /// Zero-filled buffers with room for `count` vertices
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            normals: vec![0.0; count * 3],
            colours: vec![0.0; count * 3],
            uvs: vec![0.0; count * 2],
        }
    }

    /// Number of vertex slots allocated
    pub fn capacity(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn colours(&self) -> &[f32] {
        &self.colours
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    fn vertex(&self, index: usize) -> Option<Vertex> {
        if index >= self.capacity() {
            return None;
        }
        let v3 = index * 3..index * 3 + 3;
        let v2 = index * 2..index * 2 + 2;
        Some(Vertex::new(
            Vector3f::try_from_slice(&self.positions[v3.clone()]).ok()?,
            Vector3f::try_from_slice(&self.normals[v3.clone()]).ok()?,
            Vector3f::try_from_slice(&self.colours[v3]).ok()?,
            Vector2f::try_from_slice(&self.uvs[v2]).ok()?,
        ))
    }
}

/// Result of parsing a raw mesh image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    /// Vertex count from the header
    pub declared: u32,
    /// Slots reading was attempted for, at least one when the header is non-zero
    pub effective: usize,
    /// Slots whose record was present in full
    pub complete: usize,
    pub buffers: MeshBuffers,
}

fn vec3(input: &[u8]) -> IResult<&[u8], [f32; 3]> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, [x, y, z]))
}

fn vec2(input: &[u8]) -> IResult<&[u8], [f32; 2]> {
    let (input, (u, v)) = tuple((le_f32, le_f32))(input)?;
    Ok((input, [u, v]))
}

/// Read the declared vertex count, if the data is long enough to hold one
pub fn declared_count(data: &[u8]) -> Option<u32> {
    le_u32::<_, nom::error::Error<&[u8]>>(data)
        .ok()
        .map(|(_, count)| count)
}

/// Parse a raw mesh image.
///
/// Buffers are sized from the header. Record parts that the data does not
/// cover stay zero, and reading never runs past the declared count.
pub fn parse_raw_mesh(data: &[u8], max_vertices: u32) -> MeshResult<RawMesh> {
    let (mut input, declared) = match le_u32::<_, nom::error::Error<&[u8]>>(data) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(RawMesh::default()),
    };

    if declared > max_vertices {
        return Err(MeshError::TooManyVertices {
            declared,
            limit: max_vertices,
        });
    }

    let mut buffers = MeshBuffers::zeroed(declared as usize);
    let mut effective = 0;
    let mut complete = 0;

    for i in 0..declared as usize {
        // The first slot is always attempted, so a header-only file reads one empty slot
        if input.is_empty() && i > 0 {
            break;
        }
        effective += 1;

        // A short part means the stream is exhausted; the rest of the slot stays zero.
        let (rest, position) = match vec3(input) {
            Ok(parsed) => parsed,
            Err(_) => break,
        };
        buffers.positions[i * 3..i * 3 + 3].copy_from_slice(&position);

        let (rest, normal) = match vec3(rest) {
            Ok(parsed) => parsed,
            Err(_) => break,
        };
        buffers.normals[i * 3..i * 3 + 3].copy_from_slice(&normal);

        let (rest, colour) = match vec3(rest) {
            Ok(parsed) => parsed,
            Err(_) => break,
        };
        buffers.colours[i * 3..i * 3 + 3].copy_from_slice(&colour);

        let (rest, uv) = match vec2(rest) {
            Ok(parsed) => parsed,
            Err(_) => break,
        };
        buffers.uvs[i * 2..i * 2 + 2].copy_from_slice(&uv);

        complete += 1;
        input = rest;
    }

    if !input.is_empty() && complete == declared as usize {
        debug!("{} trailing bytes after {} records", input.len(), declared);
    }

    Ok(RawMesh {
        declared,
        effective,
        complete,
        buffers,
    })
}

/// Write vertices in the raw mesh format, declaring exactly `vertices.len()`
pub fn write_raw_mesh<'a, W, I>(writer: &mut W, vertices: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Vertex>,
    I::IntoIter: ExactSizeIterator,
{
    let vertices = vertices.into_iter();
    let count = u32::try_from(vertices.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many vertices"))?;
    writer.write_all(&count.to_le_bytes())?;

    for vertex in vertices {
        let parts = [
            vertex.position.as_slice(),
            vertex.normal.as_slice(),
            vertex.color.as_slice(),
            vertex.uv.as_slice(),
        ];
        for value in parts.into_iter().flatten() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Owner of the vertex buffers read from a raw mesh file
///
/// Loaded buffers live until the next `load`, `release_arrays`, or drop.
#[derive(Debug, Default)]
pub struct MeshLoader {
    config: LoaderConfig,
    buffers: Option<MeshBuffers>,
    size: u32,
    effective: usize,
    complete: usize,
}

impl MeshLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Load a mesh file and return the number of vertex slots read.
    ///
    /// Returns 0 if the file cannot be read, leaving any previous mesh in place.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> usize {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(count) => count,
            Err(err) => {
                warn!("failed to load mesh {}: {}", path.display(), err);
                0
            }
        }
    }

    /// Like `load`, but reports why a load failed
    pub fn try_load<P: AsRef<Path>>(&mut self, path: P) -> MeshResult<usize> {
        let path = path.as_ref();
        let data = fs::read(path)?;

        let Some(declared) = declared_count(&data) else {
            warn!("mesh {} has no vertex count header", path.display());
            self.release_arrays();
            return Ok(0);
        };
        // Checked before release so a rejected file keeps the previous mesh
        if declared > self.config.max_vertices {
            return Err(MeshError::TooManyVertices {
                declared,
                limit: self.config.max_vertices,
            });
        }

        self.release_arrays();
        let raw = parse_raw_mesh(&data, self.config.max_vertices)?;

        if raw.complete < raw.declared as usize {
            warn!(
                "mesh {} truncated: {} of {} records complete",
                path.display(),
                raw.complete,
                raw.declared
            );
        }
        info!(
            "loaded mesh {} ({} vertices, {} bytes)",
            path.display(),
            raw.effective,
            data.len()
        );

        self.size = raw.declared;
        self.effective = raw.effective;
        self.complete = raw.complete;
        self.buffers = Some(raw.buffers);
        Ok(self.effective)
    }

    /// Drop all four buffers. Safe to call on an empty loader.
    pub fn release_arrays(&mut self) {
        if self.buffers.take().is_some() {
            debug!("released mesh buffers ({} vertices)", self.size);
        }
        self.size = 0;
        self.effective = 0;
        self.complete = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.buffers.is_some()
    }

    /// Declared vertex count of the current mesh
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Vertex slots the last load touched
    pub fn effective_count(&self) -> usize {
        self.effective
    }

    /// Vertex slots the last load filled completely
    pub fn complete_count(&self) -> usize {
        self.complete
    }

    pub fn vertex_array(&self) -> &[f32] {
        self.buffers.as_ref().map(MeshBuffers::positions).unwrap_or(&[])
    }

    pub fn normal_array(&self) -> &[f32] {
        self.buffers.as_ref().map(MeshBuffers::normals).unwrap_or(&[])
    }

    pub fn colour_array(&self) -> &[f32] {
        self.buffers.as_ref().map(MeshBuffers::colours).unwrap_or(&[])
    }

    pub fn uv_array(&self) -> &[f32] {
        self.buffers.as_ref().map(MeshBuffers::uvs).unwrap_or(&[])
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(self.vertex_array())
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(self.normal_array())
    }

    pub fn colours(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(self.colour_array())
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        bytemuck::cast_slice(self.uv_array())
    }

    /// Typed view of one vertex slot
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        self.buffers.as_ref()?.vertex(index)
    }

    /// Triangles over the slots the last load touched
    pub fn to_mesh(&self) -> Mesh {
        let vertices: Vec<Vertex> = (0..self.effective)
            .filter_map(|i| self.vertex(i))
            .collect();
        Mesh::from_vertices(&vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: f32) -> Vertex {
        Vertex::new(
            Vector3f::from_array([seed, seed + 1.0, seed + 2.0]),
            Vector3f::from_array([0.0, 1.0, 0.0]),
            Vector3f::from_array([0.25, 0.5, 0.75]),
            Vector2f::from_array([seed * 0.5, 1.0]),
        )
    }

    fn encode(vertices: &[Vertex]) -> Vec<u8> {
        let mut data = Vec::new();
        write_raw_mesh(&mut data, vertices).unwrap();
        data
    }

    #[test]
    fn test_record_size() {
        let data = encode(&[record(1.0)]);
        assert_eq!(data.len(), 4 + RECORD_SIZE);
        assert_eq!(&data[0..4], &1u32.to_le_bytes());
    }

    #[test]
    fn test_parse_complete_file() {
        let verts = [record(0.0), record(3.0), record(6.0)];
        let raw = parse_raw_mesh(&encode(&verts), u32::MAX).unwrap();
        assert_eq!(raw.declared, 3);
        assert_eq!(raw.effective, 3);
        assert_eq!(raw.complete, 3);
        assert_eq!(&raw.buffers.positions()[3..6], &[3.0, 4.0, 5.0]);
        assert_eq!(&raw.buffers.uvs()[4..6], &[3.0, 1.0]);
    }

    #[test]
    fn test_parse_header_only() {
        let raw = parse_raw_mesh(&5u32.to_le_bytes(), u32::MAX).unwrap();
        assert_eq!(raw.declared, 5);
        assert_eq!(raw.effective, 1);
        assert_eq!(raw.complete, 0);
        assert_eq!(raw.buffers.capacity(), 5);

        let raw = parse_raw_mesh(&0u32.to_le_bytes(), u32::MAX).unwrap();
        assert_eq!(raw.effective, 0);
    }

    #[test]
    fn test_parse_empty_input() {
        let raw = parse_raw_mesh(&[], u32::MAX).unwrap();
        assert_eq!(raw, RawMesh::default());
        assert_eq!(declared_count(&[1, 0]), None);
    }

    #[test]
    fn test_parse_truncated_mid_normal() {
        let mut data = encode(&[record(0.0), record(1.0)]);
        // Keep the second position and half of its normal
        data.truncate(4 + RECORD_SIZE + 12 + 6);
        let raw = parse_raw_mesh(&data, u32::MAX).unwrap();
        assert_eq!(raw.effective, 2);
        assert_eq!(raw.complete, 1);
        assert_eq!(&raw.buffers.positions()[3..6], &[1.0, 2.0, 3.0]);
        assert_eq!(&raw.buffers.normals()[3..6], &[0.0, 0.0, 0.0]);
        assert_eq!(&raw.buffers.uvs()[2..4], &[0.0, 0.0]);
    }

    #[test]
    fn test_parse_ignores_records_past_declared_count() {
        let mut data = encode(&[record(0.0), record(1.0)]);
        data[0..4].copy_from_slice(&1u32.to_le_bytes());
        let raw = parse_raw_mesh(&data, u32::MAX).unwrap();
        assert_eq!(raw.declared, 1);
        assert_eq!(raw.effective, 1);
        assert_eq!(raw.buffers.capacity(), 1);
    }

    #[test]
    fn test_parse_rejects_huge_header() {
        let data = u32::MAX.to_le_bytes();
        assert!(matches!(
            parse_raw_mesh(&data, 1000),
            Err(MeshError::TooManyVertices { declared: u32::MAX, limit: 1000 })
        ));
    }

    #[test]
    fn test_empty_loader() {
        let mut loader = MeshLoader::new();
        assert_eq!(loader.size(), 0);
        assert!(loader.vertex_array().is_empty());
        assert!(loader.uvs().is_empty());
        assert!(loader.vertex(0).is_none());
        loader.release_arrays();
        loader.release_arrays();
        assert!(!loader.is_loaded());
    }
}
