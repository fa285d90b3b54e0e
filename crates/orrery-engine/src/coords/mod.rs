//! Screen-space geometry shared by the runtime and renderers.
//!
//! Sizes are physical pixels; the 3D scene itself lives in world units and is
//! mapped to the viewport by the projection in `render::camera`.

mod viewport;

pub use viewport::Viewport;
