// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles the depth buffer and the sampled surface texture.

pub mod texture_resource;

pub use texture_resource::{DepthTexture, TextureResource};
