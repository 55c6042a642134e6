use anyhow::{Context, Result};
use clap::Parser;
use framekit_common::{EngineConfig, ShaderPolicy};
use framekit_demos::{DemoKind, FrameLoop, StopReason};
use framekit_input::{Key, KeyState};
use framekit_kernel::{FrameLimiter, MonotonicTimer, TimeSource};
use framekit_render_wgpu::WgpuRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "framekit-desktop", about = "Run a framekit demo in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Demo to run
    #[arg(short, long, default_value = "brick-breaker")]
    demo: DemoKind,

    /// YAML engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Throttle the loop to this many frames per second
    #[arg(long)]
    target_fps: Option<u32>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// fail-fast or degrade
    #[arg(long)]
    shader_policy: Option<ShaderPolicy>,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(fps) = self.target_fps {
            config.frame.target_fps = Some(fps);
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(policy) = self.shader_policy {
            config.shaders = policy;
        }
        config.validate().context("invalid engine configuration")?;
        Ok(config)
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::KeyD => Key::KeyD,
        _ => return None,
    })
}

/// GPU objects created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

impl Gpu {
    fn create(
        event_loop: &ActiveEventLoop,
        engine: &EngineConfig,
        frame_loop: &FrameLoop,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(engine.window.title.clone())
            .with_inner_size(PhysicalSize::new(engine.window.width, engine.window.height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs).context("creating window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("framekit_device"),
                required_features: adapter.features() & wgpu::Features::POLYGON_MODE_LINE,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            frame_loop.resources(),
            engine.shaders,
        )
        .context("initialising renderer")?;

        let degraded = renderer.degraded_shaders();
        if !degraded.is_empty() {
            tracing::warn!(?degraded, "running with flat-color fallback shaders");
        }
        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

struct GpuApp {
    engine: EngineConfig,
    frame_loop: FrameLoop,
    keys: KeyState,
    timer: MonotonicTimer,
    limiter: Option<FrameLimiter>,
    last_frame: Option<Instant>,
    gpu: Option<Gpu>,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(engine: EngineConfig, demo: DemoKind) -> Self {
        let frame_loop = FrameLoop::new(framekit_demos::build(demo, &engine), &engine);
        let limiter = engine.frame.target_fps.and_then(FrameLimiter::new);
        Self {
            engine,
            frame_loop,
            keys: KeyState::new(),
            timer: MonotonicTimer::start(),
            limiter,
            last_frame: None,
            gpu: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        self.last_frame = Some(Instant::now());
        let advanced = self.frame_loop.advance(self.timer.now(), &self.keys);
        self.keys.end_frame();
        let Some(submission) = advanced else {
            tracing::info!(reason = ?self.frame_loop.stop_reason(), "frame loop stopped");
            event_loop.exit();
            return Ok(());
        };
        if let Some(fps) = self.frame_loop.last_time().and_then(|time| time.fps()) {
            tracing::debug!(fps, "frame rate");
        }

        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(());
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return Ok(());
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let stats = gpu
            .renderer
            .render(&gpu.device, &gpu.queue, &view, &submission)
            .context("rendering frame")?;
        tracing::trace!(draws = stats.draw_calls, elements = stats.elements, "frame");
        output.present();
        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::create(event_loop, &self.engine, &self.frame_loop) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.frame_loop.set_aspect(size.width, size.height);
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.stop(StopReason::CloseRequested);
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                    self.frame_loop.set_aspect(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => self.keys.clear(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_key(code) {
                    match state {
                        ElementState::Pressed => self.keys.press(key),
                        ElementState::Released => self.keys.release(key),
                    };
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(event_loop) {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let wait = match (&self.limiter, self.last_frame) {
            (Some(limiter), Some(last)) => limiter.time_to_wait(last.elapsed()),
            _ => None,
        };
        if let Some(wait) = wait {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait));
            return;
        }
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let engine = cli.engine_config()?;
    tracing::info!(demo = %cli.demo, "framekit-desktop starting");

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(engine, cli.demo);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_quit_keys_are_mapped() {
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::ArrowLeft));
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::Space), Some(Key::Space));
        assert_eq!(map_key(KeyCode::F1), None);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "framekit-desktop",
            "--demo",
            "point-light",
            "--target-fps",
            "30",
            "--width",
            "640",
            "--shader-policy",
            "degrade",
        ]);
        let config = cli.engine_config().unwrap();
        assert_eq!(cli.demo, DemoKind::PointLight);
        assert_eq!(config.frame.target_fps, Some(30));
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.shaders, ShaderPolicy::Degrade);
    }

    #[test]
    fn zero_fps_flag_is_rejected() {
        let cli = Cli::parse_from(["framekit-desktop", "--target-fps", "0"]);
        assert!(cli.engine_config().is_err());
    }
}
