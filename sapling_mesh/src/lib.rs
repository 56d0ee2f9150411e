// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CS350 binary mesh loading.
//!
//! The `.cs350_binary` format is a flat little-endian layout:
//!
//! ```text
//! ["CS350"][vertex_count][index_count][has_positions][has_normals][has_uvs][vertex records][faces]
//!   5 bytes   u32           u32          1 byte         1 byte      1 byte
//! ```
//!
//! Each vertex record carries, in order and only when flagged: a position
//! (3 floats), a normal (3 floats), and a uv (2 floats). An `index_count`
//! of zero means the vertices form triangle triples directly; otherwise
//! `index_count / 3` faces of three `i32` indices follow.
//!
//! [`MeshData::triangles`] converts either layout into the triangle array
//! consumed by [`sapling_kd_tree`].
//!
//! # Example
//!
//! ```rust
//! use sapling_mesh::MeshData;
//!
//! // A one-triangle soup, positions only.
//! let mut bytes = b"CS350".to_vec();
//! bytes.extend_from_slice(&3u32.to_le_bytes());
//! bytes.extend_from_slice(&0u32.to_le_bytes());
//! bytes.extend_from_slice(&[1, 0, 0]);
//! for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
//!     for c in v {
//!         bytes.extend_from_slice(&c.to_le_bytes());
//!     }
//! }
//!
//! let mesh = MeshData::from_bytes(&bytes).unwrap();
//! assert_eq!(mesh.triangles().len(), 1);
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use glam::{Vec2, Vec3};
use sapling_kd_tree::Triangle;

/// The five signature bytes every mesh file starts with.
pub const SIGNATURE: &[u8; 5] = b"CS350";

/// Why a mesh failed to load.
#[derive(Debug)]
pub enum MeshError {
    /// The underlying file could not be read.
    Io(io::Error),
    /// The file does not start with [`SIGNATURE`].
    BadSignature,
    /// The file ended before the declared contents.
    Truncated,
    /// A face references a vertex outside the vertex table.
    BadFaceIndex {
        /// Which face.
        face: usize,
        /// The offending index.
        index: i32,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read mesh file: {err}"),
            Self::BadSignature => write!(f, "missing CS350 signature"),
            Self::Truncated => write!(f, "file ends before the declared contents"),
            Self::BadFaceIndex { face, index } => {
                write!(f, "face {face} references out-of-range vertex {index}")
            }
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MeshError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// A loaded mesh: vertex attributes, optional faces, and bounds.
///
/// Positions are always present. When `faces` is empty the positions form
/// triangle triples directly; otherwise each face indexes the vertex table.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals; empty when the file carries none.
    pub normals: Vec<Vec3>,
    /// Texture coordinates; empty when the file carries none.
    pub uvs: Vec<Vec2>,
    /// Index triples; empty for triangle soups.
    pub faces: Vec<[i32; 3]>,
    /// Componentwise minimum over all positions.
    pub bounds_min: Vec3,
    /// Componentwise maximum over all positions.
    pub bounds_max: Vec3,
}

impl MeshData {
    /// Read a mesh from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Parse a mesh from an in-memory byte stream.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MeshError> {
        let mut cursor = Cursor { bytes, pos: 0 };
        if cursor.take(SIGNATURE.len())? != SIGNATURE {
            return Err(MeshError::BadSignature);
        }

        let vertex_count = cursor.read_u32()? as usize;
        let index_count = cursor.read_u32()? as usize;
        let has_positions = cursor.read_bool()?;
        let has_normals = cursor.read_bool()?;
        let has_uvs = cursor.read_bool()?;

        let mut mesh = Self::default();
        for _ in 0..vertex_count {
            if has_positions {
                mesh.positions.push(cursor.read_vec3()?);
            }
            if has_normals {
                mesh.normals.push(cursor.read_vec3()?);
            }
            if has_uvs {
                mesh.uvs.push(cursor.read_vec2()?);
            }
        }

        for face in 0..index_count / 3 {
            let triple = [
                cursor.read_i32()?,
                cursor.read_i32()?,
                cursor.read_i32()?,
            ];
            for &index in &triple {
                if index < 0 || index as usize >= mesh.positions.len() {
                    return Err(MeshError::BadFaceIndex { face, index });
                }
            }
            mesh.faces.push(triple);
        }

        mesh.compute_bounds();
        Ok(mesh)
    }

    /// Whether faces index the vertex table rather than forming triples.
    pub fn is_indexed(&self) -> bool {
        !self.faces.is_empty()
    }

    /// The triangle array for tree building and queries.
    ///
    /// Leftover vertices that do not complete a triple are dropped.
    pub fn triangles(&self) -> Vec<Triangle> {
        if self.is_indexed() {
            self.faces
                .iter()
                .map(|&[a, b, c]| {
                    Triangle::new(
                        self.positions[a as usize],
                        self.positions[b as usize],
                        self.positions[c as usize],
                    )
                })
                .collect()
        } else {
            self.positions
                .chunks_exact(3)
                .map(|v| Triangle::new(v[0], v[1], v[2]))
                .collect()
        }
    }

    /// Mean of the vertices of [`triangles`](Self::triangles); useful for
    /// aiming query rays at the model.
    pub fn centroid(&self) -> Vec3 {
        let triangles = self.triangles();
        if triangles.is_empty() {
            return Vec3::ZERO;
        }
        let mut sum = Vec3::ZERO;
        for tri in &triangles {
            sum += tri.v0 + tri.v1 + tri.v2;
        }
        sum / (triangles.len() as f32 * 3.0)
    }

    fn compute_bounds(&mut self) {
        if self.positions.is_empty() {
            self.bounds_min = Vec3::ZERO;
            self.bounds_max = Vec3::ZERO;
            return;
        }
        let mut min = self.positions[0];
        let mut max = self.positions[0];
        for &p in &self.positions {
            min = min.min(p);
            max = max.max(p);
        }
        self.bounds_min = min;
        self.bounds_max = max;
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], MeshError> {
        let end = self.pos.checked_add(n).ok_or(MeshError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(MeshError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, MeshError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i32(&mut self) -> Result<i32, MeshError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_f32(&mut self) -> Result<f32, MeshError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_bool(&mut self) -> Result<bool, MeshError> {
        Ok(self.take(1)?[0] != 0)
    }

    fn read_vec3(&mut self) -> Result<Vec3, MeshError> {
        Ok(Vec3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    fn read_vec2(&mut self) -> Result<Vec2, MeshError> {
        Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
    }
}
