use std::path::Path;

use log::info;

use crate::colors;
use crate::error::LoadError;
use crate::math::fixed::{Fixed, FIXED_SHIFT};

/// Side length exponent of the default 128x128 texture.
pub const DEFAULT_TEXTURE_SIZE_LOG2: u32 = 7;

/// Largest side exponent the Q12 texel addressing can express.
pub const MAX_TEXTURE_SIZE_LOG2: u32 = FIXED_SHIFT;

/// A square, power-of-two texture holding one RGB332 byte per texel.
///
/// Texture coordinates are Q12 with `FIXED_ONE` spanning the texture once.
/// Sampling wraps in both directions, so textures tile without clamping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    texels: Vec<u8>, // Row-major, `size * size` RGB332 texels.
    size_log2: u32,
}

impl Texture {
    /// Wraps a raw RGB332 buffer of `2^size_log2` squared texels.
    pub fn new(size_log2: u32, texels: Vec<u8>) -> Result<Self, LoadError> {
        if size_log2 > MAX_TEXTURE_SIZE_LOG2 {
            return Err(LoadError::TextureTooLarge { size_log2 });
        }
        let expected = 1usize << (2 * size_log2);
        if texels.len() != expected {
            return Err(LoadError::TextureSize {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self { texels, size_log2 })
    }

    /// A single-color texture.
    pub fn solid(size_log2: u32, color: u8) -> Self {
        let size_log2 = size_log2.min(MAX_TEXTURE_SIZE_LOG2);
        Self {
            texels: vec![color; 1 << (2 * size_log2)],
            size_log2,
        }
    }

    /// A two-color checkerboard with `1 << cell_log2` texel cells.
    pub fn checkerboard(size_log2: u32, cell_log2: u32, a: u8, b: u8) -> Self {
        let size_log2 = size_log2.min(MAX_TEXTURE_SIZE_LOG2);
        let size = 1usize << size_log2;
        let texels = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if ((x >> cell_log2) ^ (y >> cell_log2)) & 1 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect();
        Self { texels, size_log2 }
    }

    /// Converts a decoded 24-bit RGB image (3 bytes per pixel) to RGB332.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self, LoadError> {
        if width != height || !width.is_power_of_two() {
            return Err(LoadError::NotPowerOfTwo { width, height });
        }
        let texels = rgb
            .chunks_exact(3)
            .map(|p| colors::pack_rgb332(p[0], p[1], p[2]))
            .collect();
        Self::new(width.trailing_zeros(), texels)
    }

    /// Load a texture from an image file (BMP, PNG, etc.)
    ///
    /// The image is converted to RGB332 once, here.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        let texture = Self::from_rgb(width, height, img.as_raw())?;
        info!("loaded texture {} ({width}x{height})", path.display());
        Ok(texture)
    }

    pub fn size(&self) -> u32 {
        1 << self.size_log2
    }

    pub fn size_log2(&self) -> u32 {
        self.size_log2
    }

    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Nearest-neighbor lookup with wrap-around addressing.
    #[inline]
    pub fn sample(&self, u: Fixed, v: Fixed) -> u8 {
        let shift = FIXED_SHIFT - self.size_log2;
        let mask = (1 << self.size_log2) - 1;
        let x = (u >> shift) & mask;
        let y = (v >> shift) & mask;
        self.texels[((y << self.size_log2) + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{int_to_fixed, FIXED_HALF, FIXED_ONE};

    fn gradient(size_log2: u32) -> Texture {
        let size = 1usize << size_log2;
        let texels = (0..size * size).map(|i| i as u8).collect();
        Texture::new(size_log2, texels).unwrap()
    }

    #[test]
    fn sample_addresses_rows_by_v() {
        let tex = gradient(2); // 4x4
        assert_eq!(tex.sample(0, 0), 0);
        assert_eq!(tex.sample(FIXED_ONE / 4, 0), 1);
        assert_eq!(tex.sample(0, FIXED_ONE / 4), 4);
        assert_eq!(tex.sample(FIXED_HALF, FIXED_HALF), 10);
    }

    #[test]
    fn sample_wraps_outside_unit_square() {
        let tex = gradient(2);
        assert_eq!(tex.sample(int_to_fixed(3), int_to_fixed(-2)), tex.sample(0, 0));
        // Just below zero wraps to the last texel.
        assert_eq!(tex.sample(-1, -1), 15);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            Texture::from_rgb(4, 2, &[0; 24]),
            Err(LoadError::NotPowerOfTwo { width: 4, height: 2 })
        ));
        assert!(matches!(
            Texture::from_rgb(3, 3, &[0; 27]),
            Err(LoadError::NotPowerOfTwo { .. })
        ));
        assert!(matches!(
            Texture::new(2, vec![0; 15]),
            Err(LoadError::TextureSize { expected: 16, actual: 15 })
        ));
        assert!(matches!(
            Texture::new(13, vec![]),
            Err(LoadError::TextureTooLarge { size_log2: 13 })
        ));
    }

    #[test]
    fn from_rgb_packs_to_rgb332() {
        let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let tex = Texture::from_rgb(2, 2, &rgb).unwrap();
        assert_eq!(tex.texels(), &[0xE0, 0x1C, 0x03, 0xFF]);
        assert_eq!(tex.size(), 2);
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = Texture::checkerboard(3, 1, 1, 2);
        assert_eq!(tex.texels()[0], 1);
        assert_eq!(tex.texels()[2], 2);
        assert_eq!(tex.texels()[2 * 8], 2);
        assert_eq!(tex.texels()[2 * 8 + 2], 1);
    }
}
