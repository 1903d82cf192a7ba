//! Errors raised while loading assets.
//!
//! Rendering itself never fails; only the model and texture loaders return these.

use std::fmt;

#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    Image(image::ImageError),
    /// Textures must be square with a power-of-two side.
    NotPowerOfTwo { width: u32, height: u32 },
    /// A raw texture buffer does not hold `size * size` texels.
    TextureSize { expected: usize, actual: usize },
    /// The side length does not fit the Q12 texel addressing.
    TextureTooLarge { size_log2: u32 },
    /// The OBJ file contained no triangles.
    EmptyMesh,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to load OBJ: {e}"),
            LoadError::Image(e) => write!(f, "failed to load image: {e}"),
            LoadError::NotPowerOfTwo { width, height } => write!(
                f,
                "texture must be square with a power-of-two side, got {width}x{height}"
            ),
            LoadError::TextureSize { expected, actual } => {
                write!(f, "texture buffer holds {actual} texels, expected {expected}")
            }
            LoadError::TextureTooLarge { size_log2 } => {
                write!(f, "texture side 2^{size_log2} exceeds 2^12")
            }
            LoadError::EmptyMesh => write!(f, "mesh contains no faces"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}
