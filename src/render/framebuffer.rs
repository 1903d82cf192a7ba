//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view over an RGB332 color buffer with bounds-checked access.
//! There is no depth buffer: faces are drawn back to front.

/// A view into a color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass the buffer + dimensions together.
///
/// Row `y = 0` is the first row in memory, one byte per pixel.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a buffer slice and dimensions.
    pub fn new(color_buffer: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width * height,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
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

    /// Set a pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.color_buffer[y as usize * self.width + x as usize] = color;
        }
    }

    /// One row of pixels. `y` must be below the height.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.color_buffer[start..start + self.width]
    }

    pub fn pixels(&self) -> &[u8] {
        self.color_buffer
    }
}
