use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::DepthBuffer;

/// Surface and device options.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Encode output to sRGB on write.
    ///
    /// Off by default: texels and lit colors are combined as stored values and
    /// written unchanged, the way fixed-function modulate does. When off, an
    /// sRGB-only surface is rendered through its non-sRGB view format.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` (vsync, double-buffered) is always available.
    pub present_mode: wgpu::PresentMode,

    /// Preferred alpha mode; ignored when the surface does not list it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frame latency hint passed to the surface.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Device, queue and the window's swapchain with its depth attachment.
///
/// Borrows the window for `'w`; the runtime keeps both in one self-referencing
/// entry so the surface never outlives its window.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    _adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    /// Format frame views and pipelines render to.
    view_format: wgpu::TextureFormat,
    depth: DepthBuffer,

    /// Last size reported by the window; zero while minimized.
    size: PhysicalSize<u32>,
}

/// One acquired swapchain image plus the encoder recording into it.
///
/// Hold it only for the duration of a frame: the next acquire blocks until
/// the surface texture is presented or dropped.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the frame loop should do after a failed acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame can proceed.
    Reconfigured,
    /// Drop this frame only.
    SkipFrame,
    /// Stop the loop.
    Fatal,
}

impl<'w> Gpu<'w> {
    /// Creates the device and a surface for `window`.
    ///
    /// A window that starts with zero area gets its surface configured by the
    /// first non-zero [`resize`](Self::resize).
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("orrery device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let (format, view_format) = target_formats(&caps.formats, init.prefer_srgb)
            .context("surface reports no formats")?;
        let alpha_mode = choose_alpha_mode(init.alpha_mode, &caps.alpha_modes);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: if view_format == format {
                vec![]
            } else {
                vec![view_format]
            },
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        if is_drawable(size) {
            surface.configure(&device, &config);
        } else {
            log::debug!(
                "window starts at {}x{}; surface configured on first resize",
                size.width,
                size.height
            );
        }

        let depth = DepthBuffer::new(&device, size.width, size.height);

        let info = adapter.get_info();
        log::info!(
            "gpu ready: {} ({:?}), surface {format:?} as {view_format:?} {}x{}, {:?}",
            info.name,
            info.backend,
            size.width,
            size.height,
            config.present_mode,
        );

        Ok(Self {
            _instance: instance,
            _adapter: adapter,
            device,
            queue,
            surface,
            config,
            view_format,
            depth,
            size,
        })
    }

    /// Format of the frame views; pipelines must target this one.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.view_format
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.view
    }

    pub fn is_drawable(&self) -> bool {
        is_drawable(self.size)
    }

    /// Follows a window resize.
    ///
    /// A zero-area size is remembered but not applied; wgpu rejects 0x0
    /// surfaces. The next non-zero resize configures everything again.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if !self.is_drawable() {
            log::debug!(
                "surface {}x{}: not drawable, keeping old config",
                new_size.width,
                new_size.height
            );
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth.resize(&self.device, new_size.width, new_size.height);
    }

    /// Acquires the next swapchain image.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.view_format),
                ..Default::default()
            });

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("orrery frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents its image.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Recovers from a failed acquire where possible.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface_error_action(&err);
        if action == SurfaceErrorAction::Reconfigured && self.is_drawable() {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

fn surface_error_action(err: &SurfaceError) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

/// Picks the surface format and the view format frames are rendered through.
///
/// 8-bit formats in the requested encoding come first, then the surface's
/// first format. Without `prefer_srgb` the view always drops the sRGB suffix,
/// so output is never re-encoded.
fn target_formats(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<(wgpu::TextureFormat, wgpu::TextureFormat)> {
    use wgpu::TextureFormat as F;

    let wanted: [F; 2] = if prefer_srgb {
        [F::Bgra8UnormSrgb, F::Rgba8UnormSrgb]
    } else {
        [F::Bgra8Unorm, F::Rgba8Unorm]
    };

    let format = wanted
        .into_iter()
        .find(|f| formats.contains(f))
        .or_else(|| formats.first().copied())?;

    let view = if prefer_srgb {
        format
    } else {
        format.remove_srgb_suffix()
    };
    Some((format, view))
}

fn choose_alpha_mode(
    preferred: Option<wgpu::CompositeAlphaMode>,
    supported: &[wgpu::CompositeAlphaMode],
) -> wgpu::CompositeAlphaMode {
    preferred
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as F};

    #[test]
    fn default_output_is_not_srgb_encoded() {
        let init = GpuInit::default();
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm];
        assert_eq!(
            target_formats(&formats, init.prefer_srgb),
            Some((F::Bgra8Unorm, F::Bgra8Unorm))
        );
    }

    #[test]
    fn srgb_only_surface_renders_through_plain_view() {
        let (surface, view) = target_formats(&[F::Bgra8UnormSrgb], false).unwrap();
        assert_eq!(surface, F::Bgra8UnormSrgb);
        assert_eq!(view, F::Bgra8Unorm);
        assert!(!view.is_srgb());
    }

    #[test]
    fn srgb_output_on_request() {
        let formats = [F::Bgra8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(
            target_formats(&formats, true),
            Some((F::Rgba8UnormSrgb, F::Rgba8UnormSrgb))
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(
            target_formats(&[F::Rgb10a2Unorm], false),
            Some((F::Rgb10a2Unorm, F::Rgb10a2Unorm))
        );
        assert_eq!(target_formats(&[], false), None);
    }

    #[test]
    fn zero_sized_window_is_not_drawable() {
        assert!(!is_drawable(PhysicalSize::new(0, 0)));
        assert!(!is_drawable(PhysicalSize::new(800, 0)));
        assert!(!is_drawable(PhysicalSize::new(0, 600)));
        assert!(is_drawable(PhysicalSize::new(1, 1)));
    }

    #[test]
    fn alpha_mode_respects_support() {
        let supported = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(choose_alpha_mode(Some(Alpha::PreMultiplied), &supported), Alpha::PreMultiplied);
        assert_eq!(choose_alpha_mode(Some(Alpha::PostMultiplied), &supported), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(None, &[]), Alpha::Auto);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(surface_error_action(&SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }

    #[test]
    fn default_init_is_double_buffered() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert!(!init.prefer_srgb);
    }
}
