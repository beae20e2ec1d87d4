use image::RgbaImage;

use crate::error::{MatchViewError, Result};
use crate::geometry::Size2;

/// Upper bound on a served image payload.
pub const MAX_IMAGE_BYTES: u64 = 256 * 1024 * 1024;

/// A decoded panel image. Its pixel size drives viewport fitting.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub rgba: RgbaImage,
}

impl DecodedImage {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(MatchViewError::InvalidGeometry(format!(
                "decoded image is {}x{}",
                rgba.width(),
                rgba.height()
            )));
        }
        Ok(Self { rgba })
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn size(&self) -> Size2 {
        Size2::new(self.rgba.width() as f64, self.rgba.height() as f64)
    }
}
