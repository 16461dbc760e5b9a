//! # Graphics Module
//!
//! Everything between the torus parameters and pixels on screen.
//!
//! - **Geometry** ([`geometry`]) - Torus sampling, wrapped indices and smooth normals
//! - **Rendering** ([`rendering`]) - Surface, pipeline and the per-frame draw
//! - **Resources** ([`resources`]) - Depth buffer and surface texture
//! - **Shaders** ([`shader`]) - Shader description files with one section per stage
//! - **Camera** ([`camera`]) - Fixed viewpoint and the MVP uniform
//!
//! The geometry module is pure and has no GPU dependency; the rest is thin
//! glue over `wgpu`.

pub mod camera;
pub mod geometry;
pub mod mesh;
pub mod rendering;
pub mod resources;
pub mod shader;
pub mod vertex;

pub use camera::FixedCamera;
pub use geometry::{generate_torus, GeometryData, TorusParams};
pub use rendering::{RenderEngine, RenderSettings};
