//! Owned frame storage and image export.
//!
//! Provides the [`Renderer`] struct which owns the RGB332 color buffer, hands
//! out [`FrameBuffer`] views to the engine, and converts frames to RGB images.

use std::path::Path;

use image::{ImageResult, RgbImage};

use super::framebuffer::FrameBuffer;
use crate::colors;

pub const SCREEN_WIDTH: usize = 320;
pub const SCREEN_HEIGHT: usize = 200;

pub struct Renderer {
    color_buffer: Vec<u8>,
    width: usize,
    height: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            color_buffer: vec![colors::BLACK; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.color_buffer = vec![colors::BLACK; width * height];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: u8) {
        self.color_buffer.fill(color);
    }

    /// Raw RGB332 pixels, row 0 first.
    pub fn pixels(&self) -> &[u8] {
        &self.color_buffer
    }

    /// Number of pixels that differ from `background`.
    pub fn count_pixels_not(&self, background: u8) -> usize {
        self.color_buffer.iter().filter(|&&p| p != background).count()
    }

    /// Expands the frame to 24-bit RGB.
    ///
    /// Screen y grows upward (row 0 is the bottom of the picture, as when the
    /// buffer is uploaded with `glDrawPixels`), so rows are flipped for the
    /// top-down image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let row = self.height - 1 - y as usize;
            let (r, g, b) = colors::unpack_rgb332(self.color_buffer[row * self.width + x as usize]);
            image::Rgb([r, g, b])
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_rgb_image().save(path)
    }

    /// Get a mutable FrameBuffer view into the color buffer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_screen_sized() {
        let renderer = Renderer::default();
        assert_eq!(renderer.pixels().len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    }

    #[test]
    fn rgb_export_flips_rows() {
        let mut renderer = Renderer::new(2, 2);
        renderer.clear(colors::BLACK);
        renderer.as_framebuffer().set_pixel(1, 0, colors::WHITE);
        let img = renderer.to_rgb_image();
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(renderer.count_pixels_not(colors::BLACK), 1);
    }
}
