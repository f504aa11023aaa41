use image::RgbaImage;

use crate::error::Result;

/// One decoded frame of the rotation sequence, ready to draw.
#[derive(Debug, Clone)]
pub struct Frame {
    pixels: RgbaImage,
}

impl Frame {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode raw fetched bytes into a drawable frame.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self {
            pixels: decoded.to_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGBA bytes, row-major, `width * 4` bytes per row.
    pub fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}
