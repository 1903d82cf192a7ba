//! A fixed-point software rasterizer.
//!
//! All geometry is Q12 integer math: models are transformed to clip space,
//! near-clipped, depth-sorted back to front and filled with affine-textured,
//! flat-shaded scanlines into an 8-bit RGB332 frame buffer. A ray caster over
//! the same models serves hit-testing and line-of-sight queries.
//!
//! # Quick Start
//!
//! ```ignore
//! use fixraster::prelude::*;
//!
//! let mut models = vec![Model::cube("crate")];
//! models[0].set_texture(Rc::new(Texture::checkerboard(7, 4, 0xE0, 0x1C)));
//!
//! let mut engine = Engine::new();
//! engine.prepare_geometry_storage(&models);
//!
//! let mut renderer = Renderer::default();
//! let camera = FpsCamera::new(Vec3::new(0, 0, -5 << 12));
//! engine.rasterize(
//!     &mut renderer.as_framebuffer(),
//!     &models,
//!     &camera.view_matrix(),
//!     &Projection::default().matrix(),
//!     None,
//!     colors::SKY,
//! );
//! renderer.save_png("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod raytrace;
pub mod render;
pub mod sorting;
pub mod texture;
pub mod transform;
pub mod triangle;

// Internal modules - used within the crate only
pub(crate) mod clipper;

// Re-export commonly needed types at crate root for convenience
pub use config::{ArenaConfig, RenderConfig};
pub use engine::{Engine, FrameStats};
pub use error::LoadError;
pub use model::Model;
pub use projection::Projection;
pub use raytrace::RayHit;
pub use render::Renderer;
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use fixraster::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::FpsCamera;

    // Engine
    pub use crate::config::{ArenaConfig, RenderConfig};
    pub use crate::engine::{Engine, FrameStats};
    pub use crate::light::HemisphereLight;
    pub use crate::sorting::DepthOrder;

    // Model
    pub use crate::mesh::MeshData;
    pub use crate::model::Model;
    pub use crate::texture::Texture;
    pub use crate::triangle::Face;

    // Projection
    pub use crate::projection::Projection;

    // Transform
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::fixed::Fixed;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::raytrace::RayHit;
    pub use crate::render::{FrameBuffer, Renderer};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle};
}
