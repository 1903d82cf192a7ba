//! Packed RGB332 colors.
//!
//! One byte per pixel: `rrrgggbb`, matching `GL_UNSIGNED_BYTE_3_3_2`.

use crate::math::fixed::{fixed_mul, fixed_round_to_int, int_to_fixed, Fixed};

pub const BLACK: u8 = pack_rgb332(0, 0, 0);
pub const WHITE: u8 = pack_rgb332(255, 255, 255);
pub const SKY: u8 = pack_rgb332(96, 160, 255);

/// Reserved for overlay blits: pixels of this color are not copied.
/// The rasterizer itself does not interpret it.
pub const TRANSPARENT: u8 = pack_rgb332(0, 255, 0);

/// Packs 8-bit channels into RGB332 by keeping the top bits of each.
#[inline]
pub const fn pack_rgb332(r: u8, g: u8, b: u8) -> u8 {
    ((r >> 5) & 0x07) << 5 | ((g >> 5) & 0x07) << 2 | ((b >> 6) & 0x03)
}

/// Expands RGB332 back to full-range 8-bit channels.
#[inline]
pub const fn unpack_rgb332(color: u8) -> (u8, u8, u8) {
    let r = (color >> 5) & 0x07;
    let g = (color >> 2) & 0x07;
    let b = color & 0x03;
    (
        ((r as u16 * 255) / 7) as u8,
        ((g as u16 * 255) / 7) as u8,
        b * 85,
    )
}

#[inline]
fn scale_channel(color: u8, shift: u8, mask: u8, shade: Fixed) -> u8 {
    let channel = int_to_fixed(((color >> shift) & mask) as i32);
    ((fixed_round_to_int(fixed_mul(channel, shade)) as u8) & mask) << shift
}

/// Scales each channel by a Q12 shade in `[0, 1]`, rounding to nearest.
#[inline]
pub fn modulate(color: u8, shade: Fixed) -> u8 {
    scale_channel(color, 5, 0x07, shade)
        | scale_channel(color, 2, 0x07, shade)
        | scale_channel(color, 0, 0x03, shade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{FIXED_HALF, FIXED_ONE};

    #[test]
    fn packing_keeps_high_bits() {
        assert_eq!(pack_rgb332(255, 255, 255), 0xFF);
        assert_eq!(pack_rgb332(255, 0, 0), 0xE0);
        assert_eq!(pack_rgb332(0, 255, 0), 0x1C);
        assert_eq!(pack_rgb332(0, 0, 255), 0x03);
        assert_eq!(TRANSPARENT, 0x1C);
    }

    #[test]
    fn unpack_expands_to_full_range() {
        assert_eq!(unpack_rgb332(0xFF), (255, 255, 255));
        assert_eq!(unpack_rgb332(0x00), (0, 0, 0));
        for c in 0..=255u8 {
            let (r, g, b) = unpack_rgb332(c);
            assert_eq!(pack_rgb332(r, g, b), c);
        }
    }

    #[test]
    fn full_shade_is_identity() {
        for c in 0..=255u8 {
            assert_eq!(modulate(c, FIXED_ONE), c);
        }
    }

    #[test]
    fn half_shade_rounds_each_channel() {
        // r: 7 * 0.5 = 3.5 -> 4, g: same, b: 3 * 0.5 = 1.5 -> 2
        assert_eq!(modulate(0xFF, FIXED_HALF), (4 << 5) | (4 << 2) | 2);
        assert_eq!(modulate(0xFF, 0), 0);
    }
}
