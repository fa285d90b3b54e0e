//! Image textures: decoding, upload and sampling state.
//!
//! [`TextureLoader`] owns the shared sampler and bind group layout. Each loaded
//! [`Texture`] carries a ready-to-bind [`wgpu::BindGroup`] built against that
//! layout, so renderers only need the loader's layout when building pipelines.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The file is missing, unreadable, or not a supported image.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Width or height is zero.
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    /// The image is larger than the device allows.
    #[error("texture {width}x{height} exceeds the device limit of {max}")]
    TooLarge { width: u32, height: u32, max: u32 },

    /// Pixel data length doesn't match `width * height * 4`.
    #[error("texture data is {actual} bytes, expected {expected} for {width}x{height}")]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

/// Decoded RGBA8 pixels, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// A single opaque white texel.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }
}

/// Decodes an image file into RGBA8 and flips it vertically.
///
/// The flip converts image row order (top row first) into texture-coordinate
/// order (`t = 0` at the bottom).
pub fn decode_rgba(path: &Path) -> Result<DecodedImage, TextureError> {
    let img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = img.flipv().to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// A GPU-resident texture with its view and bind group.
///
/// Dropping it releases the GPU objects.
pub struct Texture {
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
    dimensions: (u32, u32),
    label: String,
}

impl Texture {
    /// Width and height of the source image, in texels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("label", &self.label)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

/// Creates textures that share one sampler and one bind group layout.
pub struct TextureLoader {
    sampler: wgpu::Sampler,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl TextureLoader {
    /// Color format used for every uploaded image.
    ///
    /// Texels are sampled as stored, with no sRGB decode, so they modulate the
    /// lit color exactly like a plain RGBA upload.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(device: &wgpu::Device) -> Self {
        // Repeat on both axes, linear min/mag, no mipmaps.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("orrery texture sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            sampler,
            bind_group_layout,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Loads an image file into a texture.
    ///
    /// Failures are logged and reported as `None`; callers are expected to
    /// carry on without the texture.
    pub fn load_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Option<Texture> {
        let path = path.as_ref();
        match self.try_load_texture(device, queue, path) {
            Ok(texture) => {
                let (w, h) = texture.dimensions();
                log::info!("texture loaded: {} ({w}x{h})", path.display());
                Some(texture)
            }
            Err(err) => {
                log::error!("failed to load texture {}: {err}", path.display());
                None
            }
        }
    }

    /// Like [`load_texture`](Self::load_texture) but returns the error.
    pub fn try_load_texture(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Texture, TextureError> {
        let image = decode_rgba(path)?;
        self.upload(device, queue, &path.display().to_string(), &image)
    }

    /// A 1x1 white texture; sampling it leaves the lit color unchanged.
    pub fn white(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Texture {
        let image = DecodedImage::white();
        self.upload_unchecked(device, queue, "white", &image)
    }

    /// Uploads decoded pixels as a 2D texture.
    pub fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &DecodedImage,
    ) -> Result<Texture, TextureError> {
        validate(image, device.limits().max_texture_dimension_2d)?;
        Ok(self.upload_unchecked(device, queue, label, image))
    }

    fn upload_unchecked(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &DecodedImage,
    ) -> Texture {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        Texture {
            _texture: texture,
            _view: view,
            bind_group,
            dimensions: (image.width, image.height),
            label: label.to_string(),
        }
    }
}

fn validate(image: &DecodedImage, max_dimension: u32) -> Result<(), TextureError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    if width > max_dimension || height > max_dimension {
        return Err(TextureError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    let expected = width as usize * height as usize * 4;
    if image.rgba.len() != expected {
        return Err(TextureError::DataSizeMismatch {
            actual: image.rgba.len(),
            expected,
            width,
            height,
        });
    }
    Ok(())
}
