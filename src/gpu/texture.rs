//! CPU-written textures and the depth target.

use crate::glyph::PixelCanvas;

/// Depth buffer format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// An RGBA8 texture refreshed from a [`PixelCanvas`].
///
/// Created with `TEXTURE_BINDING | COPY_DST` usage so the canvas can be
/// re-uploaded every frame with `Queue::write_texture`.
pub struct DynamicTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl DynamicTexture {
    /// Allocate a texture of the given size. Pixels are stored as written,
    /// without sRGB decoding.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Allocate a texture sized to `canvas` and upload it once.
    #[must_use]
    pub fn from_canvas(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        canvas: &PixelCanvas,
        label: &str,
    ) -> Self {
        let texture = Self::new(device, canvas.width(), canvas.height(), label);
        texture.upload(queue, canvas);
        texture
    }

    /// Copy the canvas pixels into the texture. Canvases of a different
    /// size are skipped.
    pub fn upload(&self, queue: &wgpu::Queue, canvas: &PixelCanvas) {
        if canvas.width() != self.width || canvas.height() != self.height {
            log::warn!(
                "canvas {}x{} does not match texture {}x{}",
                canvas.width(),
                canvas.height(),
                self.width,
                self.height
            );
            return;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

/// Depth attachment matching the surface size.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Allocate a depth buffer of the given size.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}
