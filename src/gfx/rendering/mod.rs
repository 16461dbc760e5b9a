// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles the render pipeline, GPU resources and frame rendering.

pub mod render_engine;

pub use render_engine::{RenderEngine, RenderSettings};
