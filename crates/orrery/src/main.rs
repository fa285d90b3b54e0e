//! Textured sun, earth and moon, animated from wall-clock time.
//!
//! Expects `sun.jpg`, `earth.jpg` and `moon.jpg` in the working directory;
//! a missing texture is logged and the sphere is drawn untextured.

mod app;
mod layout;
mod scene;

use winit::dpi::LogicalSize;

use orrery_engine::device::GpuInit;
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::window::{Runtime, RuntimeConfig};

use crate::app::{OrreryApp, WINDOW_TITLE};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    log::info!("starting: {}", config.title);
    Runtime::run(config, GpuInit::default(), OrreryApp::new())
}
