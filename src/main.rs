use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use torus_viewer::{
    logging::{init_logging, LoggingConfig},
    TorusApp, ViewerConfig,
};

/// Render a textured torus.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid steps along each angular axis
    #[arg(short, long)]
    resolution: Option<u32>,

    /// Radius of the tube
    #[arg(long)]
    minor_radius: Option<f32>,

    /// Distance from the centre of the torus to the centre of the tube
    #[arg(long)]
    major_radius: Option<f32>,

    /// Shader description file with `#shader vertex` and `#shader fragment` sections
    #[arg(long)]
    shader: Option<PathBuf>,

    /// Texture image (PNG, JPEG or PNM)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long)]
    height: Option<u32>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Log filter, e.g. "debug" or "torus_viewer=debug,wgpu=warn"
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn into_config(self) -> ViewerConfig {
        let mut config = ViewerConfig::default();

        if let Some(resolution) = self.resolution {
            config.torus.resolution = resolution;
        }
        if let Some(minor_radius) = self.minor_radius {
            config.torus.minor_radius = minor_radius;
        }
        if let Some(major_radius) = self.major_radius {
            config.torus.major_radius = major_radius;
        }
        if let Some(shader) = self.shader {
            config.render.shader_path = shader;
        }
        if let Some(texture) = self.texture {
            config.render.texture_path = texture;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(title) = self.title {
            config.window.title = title;
        }

        config
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.take(),
    });

    let config = args.into_config();
    log::debug!("{:?}", config);

    let app = TorusApp::new(config).context("failed to set up the torus viewer")?;
    app.run().context("torus viewer stopped with an error")?;

    Ok(())
}
