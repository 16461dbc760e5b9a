// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers

pub mod binding_types;
pub mod error_scope;
pub mod uniform_buffer;

pub use error_scope::capture_validation;
pub use uniform_buffer::UniformBuffer;
