//! # Procedural Torus Geometry
//!
//! Generates the mesh for a torus from its two radii and a grid resolution.
//!
//! The surface is sampled on a `resolution × resolution` grid of angles
//! `(u, v)`. Both axes wrap, so there is no seam: the last row and column
//! connect back to the first. Vertex `(i, j)` is stored at flat index
//! `i * resolution + j` (see [`grid_index`]) in every buffer.
//!
//! ## Usage
//!
//! ```rust
//! use torus_viewer::gfx::geometry::{generate_torus, TorusParams};
//!
//! let params = TorusParams { minor_radius: 0.5, major_radius: 1.0, resolution: 40 };
//! let torus = generate_torus(&params).unwrap();
//!
//! assert_eq!(torus.vertex_count(), 40 * 40);
//! assert_eq!(torus.triangle_count(), 2 * 40 * 40);
//! ```

pub mod normals;
pub mod torus;

pub use normals::compute_normals;
pub use torus::{compute_torus_points, generate_indices, grid_index, TorusParams};

use crate::error::MeshError;
use crate::gfx::vertex::TexturedVertex;

/// Generated geometry data ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Unit normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding seen from outside)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions, normals and texture coordinates into the
    /// vertex format consumed by the render pipeline.
    pub fn to_vertices(&self) -> Vec<TexturedVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.tex_coords)
            .map(|((&position, &normal), &tex_coords)| TexturedVertex {
                position,
                normal,
                tex_coords,
            })
            .collect()
    }
}

/// Builds the complete torus mesh: positions and UVs, the wrapped index list,
/// and per-vertex normals accumulated from the triangles.
pub fn generate_torus(params: &TorusParams) -> Result<GeometryData, MeshError> {
    let (vertices, tex_coords) = compute_torus_points(
        params.minor_radius,
        params.major_radius,
        params.resolution,
    )?;
    let indices = generate_indices(params.resolution)?;
    let normals = compute_normals(&vertices, &indices)?;

    log::debug!(
        "generated torus: {} vertices, {} triangles (r={}, R={}, resolution={})",
        vertices.len(),
        indices.len() / 3,
        params.minor_radius,
        params.major_radius,
        params.resolution
    );

    Ok(GeometryData {
        vertices,
        tex_coords,
        normals,
        indices,
    })
}
