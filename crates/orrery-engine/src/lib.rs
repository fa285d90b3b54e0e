//! Orrery engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the orrery binary:
//! the winit loop, the wgpu device, frame timing, logging and the sphere renderer.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
