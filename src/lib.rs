// src/lib.rs
//! Torus Viewer
//!
//! Generates a textured torus mesh and renders it with wgpu and winit.
//!
//! The mesh generator in [`gfx::geometry`] is usable on its own:
//!
//! ```rust
//! use torus_viewer::gfx::geometry::{compute_normals, compute_torus_points, generate_indices};
//!
//! let (positions, uvs) = compute_torus_points(0.5, 1.0, 8).unwrap();
//! let indices = generate_indices(8).unwrap();
//! let normals = compute_normals(&positions, &indices).unwrap();
//!
//! assert_eq!(positions.len(), uvs.len());
//! assert_eq!(normals.len(), 64);
//! assert_eq!(indices.len(), 6 * 64);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod wgpu_utils;

pub use app::TorusApp;
pub use config::ViewerConfig;
pub use error::{AppError, MeshError, RenderError};
