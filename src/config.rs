//! Viewer configuration
//!
//! Defaults reproduce the classic demo: an 800x600 window showing a torus
//! with tube radius 0.5 and ring radius 1.0 sampled on a 40x40 grid.

use crate::{
    error::AppError,
    gfx::{geometry::TorusParams, rendering::RenderSettings},
};

/// Initial window properties
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Torus".to_string(),
        }
    }
}

/// Everything needed to build and show the torus
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub torus: TorusParams,
    pub render: RenderSettings,
}

impl ViewerConfig {
    /// Rejects settings that would fail later on the GPU or in the mesh
    /// generator.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(AppError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.torus.validate()?;
        Ok(())
    }
}
