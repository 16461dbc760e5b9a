//! Texture resource management for wgpu
//!
//! The depth attachment, and the sampled surface texture with a
//! CPU-generated mip chain.

use std::path::Path;

use image::{imageops::FilterType, RgbaImage};

use crate::error::TextureError;

/// Depth attachment sized to the surface. Only ever rendered into.
pub struct DepthTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }
}

/// Sampled color texture with its view and sampler
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Format of sampled color textures. Texels are passed through without
    /// sRGB decoding, matching the non-sRGB surface the engine renders to.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Decodes an image file and uploads it with a full mip chain.
    ///
    /// # Errors
    /// Returns [`TextureError`] if the file cannot be decoded or is larger
    /// than the device allows.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = load_image(path)?;

        let limit = device.limits().max_texture_dimension_2d;
        if image.width() > limit || image.height() > limit {
            return Err(TextureError::TooLarge {
                path: path.to_path_buf(),
                width: image.width(),
                height: image.height(),
                limit,
            });
        }

        log::info!(
            "loaded texture {} ({}x{}, {} mip levels)",
            path.display(),
            image.width(),
            image.height(),
            mip_level_count(image.width(), image.height())
        );

        Ok(Self::from_image(device, queue, &image, &path.display().to_string()))
    }

    /// Uploads an RGBA image with repeat addressing and linear filtering.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        let mip_level_count = mip_level_count(width, height);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for level in 0..mip_level_count {
            let (level_width, level_height) = mip_size(width, height, level);
            let level_image;
            let data = if level == 0 {
                image
            } else {
                level_image =
                    image::imageops::resize(image, level_width, level_height, FilterType::Triangle);
                &level_image
            };

            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_width),
                    rows_per_image: Some(level_height),
                },
                wgpu::Extent3d {
                    width: level_width,
                    height: level_height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Decodes an image file into 8-bit RGBA.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    image::open(path)
        .map(|image| image.to_rgba8())
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Number of mip levels down to 1x1 for a texture of the given size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

fn mip_size(width: u32, height: u32, level: u32) -> (u32, u32) {
    ((width >> level).max(1), (height >> level).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(16, 16), 5);
        assert_eq!(mip_level_count(800, 600), 10);
        assert_eq!(mip_level_count(1, 1024), 11);
    }

    #[test]
    fn test_mip_sizes_bottom_out_at_one() {
        let levels = mip_level_count(8, 2);
        let sizes: Vec<_> = (0..levels).map(|level| mip_size(8, 2, level)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn test_load_bundled_texture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/bands.ppm");
        let image = load_image(path).unwrap();

        assert_eq!(image.dimensions(), (16, 16));
        assert_eq!(image.get_pixel(0, 0).0, [201, 144, 98, 255]);
    }

    #[test]
    fn test_load_missing_texture_fails() {
        let err = load_image("missing/jupiter.jpg").unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("missing/jupiter.jpg"));
    }
}
