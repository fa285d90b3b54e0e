use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary.
///
/// The runtime calls these in order: `on_gpu_ready` once, `on_resize` with the
/// initial size, then `on_frame` continuously with `on_resize` interleaved
/// whenever the window changes size.
pub trait App {
    /// Called once when the window's GPU context exists. One-time GPU setup
    /// (pipelines, texture uploads) belongs here.
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) {
        let _ = gpu;
    }

    /// Called when the drawable size changes, in physical pixels.
    ///
    /// Either dimension may be zero (e.g. a minimized window).
    fn on_resize(&mut self, width: u32, height: u32) -> AppControl {
        let _ = (width, height);
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
