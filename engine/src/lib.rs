//! CPU-side rendering primitives shared by the 360° screen components.
//!
//! Meshes are assembled here as plain buffers and handed to a
//! [`scene::RenderSurface`], which owns whatever GPU or headless storage
//! sits behind it.

#[macro_use]
pub mod macros;

pub mod logging;
pub mod scene;
pub mod texture_format;

pub use scene::{RecordingSurface, RenderSurface, SurfaceMesh};
pub use texture_format::{PixelFormat, RawTextureData};
