//! Logo image asset

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("failed to load logo image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded logo bitmap, RGBA, row-major
#[derive(Debug, Clone)]
pub struct Logo {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Logo {
    /// Decode the image at `path`.
    ///
    /// A failure here disables the logo subsystem only; the caller logs
    /// and carries on with the text overlay.
    pub fn load(path: &Path) -> Result<Self, LogoError> {
        let image = image::open(path)?.into_rgba8();
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Construct from raw RGBA pixels (used by tests and blit code)
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Pixel at (x, y); out-of-range coordinates read as transparent
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        assert!(Logo::load(Path::new("/nonexistent/logo.png")).is_err());
    }

    #[test]
    fn pixel_lookup_and_bounds() {
        let logo = Logo::from_rgba(
            2,
            1,
            vec![[255, 0, 0, 255], [0, 255, 0, 128]],
        );
        assert_eq!(logo.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(logo.pixel(1, 0), [0, 255, 0, 128]);
        assert_eq!(logo.pixel(2, 0), [0, 0, 0, 0]);
        assert_eq!(logo.pixel(0, 1), [0, 0, 0, 0]);
    }
}
