//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, bind groups) and
//! record into a [`RenderTarget`] provided by the frame context.
//!
//! Convention:
//! - world space is right-handed, +Y up
//! - matrices are `glam::Mat4`, column-major, uploaded as `[[f32; 4]; 4]`
//! - depth is standard `[0, 1]` with `Less` comparison

mod ctx;

pub mod camera;
pub mod mesh;
pub mod sphere;
pub mod texture;

pub use ctx::{ClearColor, RenderCtx, RenderTarget};
