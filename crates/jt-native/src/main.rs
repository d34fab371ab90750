use instant::Instant;
use jt_core::geometry::{idle_orientation, scene_instances, OctahedronPose, SceneInstance};
use jt_core::lifecycle::Lifecycle;
use jt_core::render::SceneGpu;
use jt_core::{
    Camera, ControlAction, Controller, SceneLighting, SmoothedDistortion, VisualizerConfig,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

struct GpuState<'w> {
    window: &'w Window,
    lifecycle: Lifecycle,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneGpu,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window) -> anyhow::Result<Self> {
        let mut lifecycle = Lifecycle::default();
        lifecycle.begin_mount();
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let mut scene = SceneGpu::new(&device, format, width, height);
        scene.set_clear_color(wgpu::Color {
            r: 0.02,
            g: 0.02,
            b: 0.04,
            a: 1.0,
        });
        log::info!("[gpu] {:?} {}x{} {:?}", adapter.get_info().backend, width, height, format);
        lifecycle.finish_mount();

        Ok(Self {
            window,
            lifecycle,
            surface,
            device,
            queue,
            config,
            scene,
        })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if !self.lifecycle.is_mounted() || size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.scene.resize(&self.device, size.width, size.height);
    }

    fn render(
        &mut self,
        camera: &Camera,
        lighting: &SceneLighting,
        instances: &[SceneInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.scene
            .render(&self.device, &self.queue, &view, camera, lighting, instances);
        frame.present();
        Ok(())
    }

    /// Release GPU resources once; the surface must not be drawn afterwards.
    fn destroy(&mut self) {
        if !self.lifecycle.dispose() {
            return;
        }
        self.scene.destroy();
        self.device.destroy();
        log::info!("[gpu] released");
    }
}

/// Native bindings for the shared control actions.
fn action_for_key(key: &Key) -> Option<ControlAction> {
    match key {
        Key::Named(NamedKey::Space) => Some(ControlAction::ToggleAutoScan),
        Key::Named(NamedKey::ArrowRight | NamedKey::ArrowUp) => {
            Some(ControlAction::DISTORTION_UP)
        }
        Key::Named(NamedKey::ArrowLeft | NamedKey::ArrowDown) => {
            Some(ControlAction::DISTORTION_DOWN)
        }
        Key::Character(c) => match c.as_str() {
            "]" => Some(ControlAction::COUPLING_UP),
            "[" => Some(ControlAction::COUPLING_DOWN),
            "r" | "R" => Some(ControlAction::Reset),
            _ => None,
        },
        _ => None,
    }
}

fn read_config() -> VisualizerConfig {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let pairs = args.iter().filter_map(|a| {
        let pair = a.split_once('=');
        if pair.is_none() {
            log::warn!("[config] ignoring argument `{}` (expected key=value)", a);
        }
        pair
    });
    match VisualizerConfig::from_pairs(pairs) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("[config] {}; using defaults", e);
            VisualizerConfig::default()
        }
    }
}

/// Minimum spacing between window title updates.
const TITLE_INTERVAL_MS: f64 = 250.0;

/// Rate-limits title changes; the auto scan would otherwise rewrite the
/// title every frame.
#[derive(Default)]
struct TitleThrottle {
    last_ms: Option<f64>,
    shown: String,
}

impl TitleThrottle {
    /// The title to show now, if it changed and the interval has elapsed.
    fn update(&mut self, now_ms: f64, title: String) -> Option<&str> {
        if title == self.shown {
            return None;
        }
        if let Some(last) = self.last_ms {
            if now_ms - last < TITLE_INTERVAL_MS {
                return None;
            }
        }
        self.last_ms = Some(now_ms);
        self.shown = title;
        Some(&self.shown)
    }
}

fn window_title(controller: &Controller) -> String {
    format!(
        "Jahn-Teller visualizer | {} | {} | {}{}",
        controller.distortion_label(),
        controller.coupling_label(),
        controller.stabilization_label(),
        if controller.auto_play() { " | auto" } else { "" }
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = read_config();
    log::info!("[config] {:?}", config);

    let clock = Instant::now();
    let now_ms = move || clock.elapsed().as_secs_f64() * 1000.0;

    let mut controller = Controller::new(&config, now_ms());
    let mut smoothing =
        SmoothedDistortion::new(controller.distortion()).with_alpha(config.smoothing);
    let mut camera = Camera::default();
    let lighting = SceneLighting::default();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(&controller))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let size = window.inner_size();
    camera.set_viewport(size.width, size.height);
    let mut title = TitleThrottle::default();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            camera.set_viewport(size.width, size.height);
            state.resize(size);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if logical_key == Key::Named(NamedKey::Escape) {
                elwt.exit();
            } else if let Some(action) = action_for_key(&logical_key) {
                log::debug!("[keys] {:?}", action);
                if controller.apply(action, now_ms()) {
                    smoothing.set_target(controller.distortion());
                }
            }
        }
        // Still dispatched after `exit()` within the same iteration.
        Event::AboutToWait if !state.lifecycle.is_mounted() || elwt.exiting() => {}
        Event::AboutToWait => {
            let now = now_ms();
            if let Some(d) = controller.tick(now) {
                smoothing.set_target(d);
            }
            if let Some(t) = title.update(now, window_title(&controller)) {
                state.window.set_title(t);
            }

            let pose = OctahedronPose::from_progress(smoothing.step());
            let instances = scene_instances(&pose, idle_orientation(now));
            match state.render(&camera, &lighting, &instances) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit();
                }
                Err(e) => log::warn!("[gpu] skipped frame: {:?}", e),
            }
        }
        Event::LoopExiting => state.destroy(),
        _ => {}
    })?;
    Ok(())
}
