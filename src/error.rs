//! Error types for mesh generation, asset loading and rendering
//!
//! Mesh errors are precondition violations of the pure generators. Everything
//! else comes from the GPU/window glue and is treated as fatal by the binary.

use std::path::PathBuf;

use crate::gfx::shader::ShaderStage;

/// Precondition violations reported by the torus mesh generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("resolution must be at least 1")]
    InvalidResolution,

    #[error("resolution {0} is too large for 32-bit indices")]
    ResolutionTooLarge(u32),

    #[error("{name} radius must be {requirement}, got {value}")]
    InvalidRadius {
        name: &'static str,
        requirement: &'static str,
        value: f32,
    },

    #[error("index list length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Failures while reading or compiling a shader description file.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown shader stage '{name}' on line {line}")]
    UnknownStage { name: String, line: usize },

    #[error("{0} stage declared more than once")]
    DuplicateStage(ShaderStage),

    #[error("{0} stage is missing")]
    MissingStage(ShaderStage),

    #[error("{stage} stage does not declare `fn {entry_point}`")]
    MissingEntryPoint {
        stage: ShaderStage,
        entry_point: &'static str,
    },

    #[error("{stage} stage failed to compile: {message}")]
    Compile { stage: ShaderStage, message: String },
}

/// Failures while decoding a texture image.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture {path} is {width}x{height}, exceeding the device limit of {limit}")]
    TooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        limit: u32,
    },
}

/// Errors that can occur while setting up or driving the GPU.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    AdapterNotFound(#[from] wgpu::RequestAdapterError),

    #[error("device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface does not support any texture format")]
    NoSurfaceFormat,

    #[error("failed to acquire surface texture: {0}")]
    SurfaceTexture(#[from] wgpu::SurfaceError),

    #[error("render pipeline rejected the shader: {0}")]
    Pipeline(String),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Top level application failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
