/*!
PNG dumps of the PPU framebuffer (feature `screenshot`).
*/

use std::path::Path;

use image::{ImageError, RgbaImage};

use crate::ppu::{NES_HEIGHT, NES_WIDTH};

/// ARGB8888 pixels to an RGBA image. Returns None if the buffer is not
/// exactly 256x240.
pub fn framebuffer_to_image(framebuffer: &[u32]) -> Option<RgbaImage> {
    if framebuffer.len() != NES_WIDTH * NES_HEIGHT {
        return None;
    }
    let mut raw = Vec::with_capacity(framebuffer.len() * 4);
    for &px in framebuffer {
        raw.extend_from_slice(&[(px >> 16) as u8, (px >> 8) as u8, px as u8, (px >> 24) as u8]);
    }
    RgbaImage::from_raw(NES_WIDTH as u32, NES_HEIGHT as u32, raw)
}

pub fn save_png<P: AsRef<Path>>(framebuffer: &[u32], path: P) -> Result<(), ImageError> {
    match framebuffer_to_image(framebuffer) {
        Some(img) => img.save(path),
        None => Err(ImageError::Parameter(image::error::ParameterError::from_kind(
            image::error::ParameterErrorKind::DimensionMismatch,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_channels_land_in_rgba_order() {
        let mut fb = vec![0xFF00_0000; NES_WIDTH * NES_HEIGHT];
        fb[NES_WIDTH + 2] = 0xFF12_3456;
        let img = framebuffer_to_image(&fb).expect("full frame");
        assert_eq!(img.dimensions(), (256, 240));
        assert_eq!(img.get_pixel(2, 1).0, [0x12, 0x34, 0x56, 0xFF]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0xFF]);
    }

    #[test]
    fn wrong_size_is_rejected() {
        assert!(framebuffer_to_image(&[0; 16]).is_none());
    }
}
