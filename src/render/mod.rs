//! Everything between transformed geometry and pixels.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod storage;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{Rasterizer, ScanlineRasterizer, Triangle};
pub use renderer::{Renderer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use storage::GeometryStorage;
