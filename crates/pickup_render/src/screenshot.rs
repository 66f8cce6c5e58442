//! Offscreen capture to PNG
//!
//! A screenshot renders the frame a second time into a texture that can be
//! copied to a buffer, reads the buffer back, and encodes it with `image`.
//! Buffer rows are padded to `COPY_BYTES_PER_ROW_ALIGNMENT` (256 bytes).

use std::path::Path;
use std::sync::mpsc;

use image::RgbaImage;

/// Failure while capturing or saving a screenshot
#[derive(Debug)]
pub enum ScreenshotError {
    /// Reading the texture back from the GPU failed
    Map(String),
    /// Building or writing the PNG failed
    Encode(String),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Map(msg) => write!(f, "Screenshot readback failed: {}", msg),
            ScreenshotError::Encode(msg) => write!(f, "Screenshot encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for ScreenshotError {}

/// Bytes per row of an RGBA8 image once padded for a texture copy
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip row padding, keeping `width * 4` bytes of every row
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_row: u32) -> Vec<u8> {
    let row = (width * 4) as usize;
    let padded_row = padded_row as usize;
    let mut pixels = Vec::with_capacity(row * height as usize);
    for chunk in data.chunks(padded_row).take(height as usize) {
        pixels.extend_from_slice(&chunk[..row.min(chunk.len())]);
    }
    pixels
}

/// True for 8-bit formats stored blue-first
pub fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

/// Swap blue and red in place
pub fn bgra_to_rgba(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

/// Write an image as PNG
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ScreenshotError> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ScreenshotError::Encode(e.to_string()))
}

/// Texture the frame is rendered into when a screenshot is requested
pub struct ScreenshotTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl ScreenshotTarget {
    /// Create a target matching the surface format and size
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Screenshot Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view, format, width, height }
    }

    /// View to render the frame into
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Copy the rendered texture back to the CPU as RGBA
    ///
    /// Blocks until the GPU has finished the copy.
    pub fn read_rgba(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<RgbaImage, ScreenshotError> {
        let padded_row = padded_bytes_per_row(self.width);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Screenshot Readback Buffer"),
            size: padded_row as u64 * self.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Screenshot Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| ScreenshotError::Map(e.to_string()))?
            .map_err(|e| ScreenshotError::Map(e.to_string()))?;

        let mut pixels = {
            let data = slice.get_mapped_range();
            unpad_rows(&data, self.width, self.height, padded_row)
        };
        buffer.unmap();

        if is_bgra(self.format) {
            bgra_to_rgba(&mut pixels);
        }

        RgbaImage::from_raw(self.width, self.height, pixels).ok_or_else(|| {
            ScreenshotError::Encode(format!(
                "pixel buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }
}
