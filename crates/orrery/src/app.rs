use glam::{Mat4, Vec3};

use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::device::Gpu;
use orrery_engine::render::camera::{Camera, Projection};
use orrery_engine::render::sphere::{Lighting, SphereDraw, SphereRenderer};
use orrery_engine::render::texture::{Texture, TextureLoader};
use orrery_engine::render::ClearColor;

use crate::layout::{self, BodyPose};
use crate::scene::{Body, SceneState};

pub const WINDOW_TITLE: &str = "Textured Earth and Moon Orbiting the Sun";

const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 50.0;

/// Fixed viewpoint: ten units down +Z, looking at the sun.
pub const CAMERA: Camera = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);

/// GPU resources created once the device exists.
struct SceneGpu {
    renderer: SphereRenderer,
    /// Indexed like [`Body::ALL`]; `None` when the file failed to load.
    textures: [Option<Texture>; 3],
    // Keeps the shared sampler and layout alive alongside the textures.
    _loader: TextureLoader,
}

impl SceneGpu {
    fn new(gpu: &Gpu<'_>) -> Self {
        let device = gpu.device();
        let queue = gpu.queue();

        let loader = TextureLoader::new(device);
        let renderer = SphereRenderer::new(
            device,
            queue,
            gpu.surface_format(),
            &loader,
            Lighting::default(),
        );

        let textures =
            Body::ALL.map(|body| loader.load_texture(device, queue, body.texture_path()));

        let loaded = textures.iter().filter(|t| t.is_some()).count();
        log::info!("scene ready: {loaded}/{} textures loaded", textures.len());

        Self {
            renderer,
            textures,
            _loader: loader,
        }
    }
}

/// The orbital scene as a runtime application.
pub struct OrreryApp {
    camera: Camera,
    projection: Projection,
    gpu: Option<SceneGpu>,
}

impl OrreryApp {
    pub fn new() -> Self {
        Self {
            camera: CAMERA,
            projection: Projection::new(FOV_Y_DEGREES, Z_NEAR, Z_FAR),
            gpu: None,
        }
    }

    /// View and projection matrices for the current window size.
    pub fn matrices(&self) -> (Mat4, Mat4) {
        (self.camera.view_matrix(), self.projection.matrix())
    }
}

impl Default for OrreryApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One draw per pose, in pose order, with the body's radius and texture.
fn sphere_draws<'t>(
    poses: &[BodyPose],
    texture: impl Fn(Body) -> Option<&'t Texture>,
) -> Vec<SphereDraw<'t>> {
    poses
        .iter()
        .map(|pose| SphereDraw {
            label: pose.body.name(),
            model: pose.world,
            radius: pose.body.radius(),
            texture: texture(pose.body),
        })
        .collect()
}

impl App for OrreryApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) {
        self.gpu = Some(SceneGpu::new(gpu));
    }

    fn on_resize(&mut self, width: u32, height: u32) -> AppControl {
        self.projection.reshape(width, height);
        log::debug!(
            "resize {width}x{height}, aspect {:.3}",
            self.projection.aspect_ratio()
        );
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (view, projection) = self.matrices();
        let Some(scene) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        let state = SceneState::at(ctx.time.elapsed);
        let poses = layout::compose(&state);

        ctx.render(ClearColor::BLACK, |rctx, target| {
            let SceneGpu {
                renderer, textures, ..
            } = scene;
            let textures: &[Option<Texture>; 3] = textures;
            let draws = sphere_draws(&poses, |body| textures[body.index()].as_ref());
            renderer.render(rctx, target, view, projection, &draws);
        })
    }
}
