use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use mito_import::app_settings::AppSettings;
use mito_import::error::AppError;
use mito_import::layout::Layout;
use mito_import::rendering::RenderOptions;
use mito_import::scenario::Pathway;
use mito_import::simulation::{PhaseDriver, SimulationState};
use mito_import::ui::{Clock, Loop};
use mito_import::ui_renderer::{self, UiCommand};

struct State<'window> {
    window: Arc<Window>,
    surface: wgpu::Surface<'window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    layout: Layout,
    simulation: Option<SimulationState>,
    driver: PhaseDriver,
    rng: SmallRng,
    pathway_keys: Vec<Pathway>,
    pacing: Loop,
    render_clock: Clock,
    render_options: RenderOptions,
    show_about_window: bool,
    exit_requested: bool,
    frame_count: u32,
    last_fps_update: Instant,
}

impl<'window> State<'window> {
    async fn new(window: Arc<Window>, settings: AppSettings) -> Result<Self, AppError> {
        let pathway_keys = settings.pathway_bindings()?;
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // egui blends in gamma space and wants a non-sRGB target
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let rng = match settings.rng_seed {
            Some(seed) => {
                info!("Seeding jitter with {}", seed);
                SmallRng::seed_from_u64(seed)
            }
            None => SmallRng::from_entropy(),
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            egui_ctx,
            egui_state,
            egui_renderer,
            layout: Layout::default(),
            simulation: None,
            driver: PhaseDriver::new(settings.driver.clone()),
            rng,
            pathway_keys,
            pacing: Loop::new(settings.ticks_per_second),
            render_clock: Clock::new(settings.ticks_per_second),
            render_options: RenderOptions {
                show_trail: settings.show_trail,
            },
            show_about_window: false,
            exit_requested: false,
            frame_count: 0,
            last_fps_update: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Keyboard shortcuts. Returns true when the event was handled.
    fn input(&mut self, event: &WindowEvent) -> bool {
        let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(code),
                    repeat: false,
                    ..
                },
            ..
        } = event
        else {
            return false;
        };

        let command = match code {
            KeyCode::Space => UiCommand::TogglePause,
            _ => match digit_index(code).and_then(|i| self.pathway_keys.get(i)) {
                Some(&pathway) => UiCommand::SelectPathway(pathway),
                None => return false,
            },
        };
        self.apply(command);
        true
    }

    fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::SelectPathway(pathway) => {
                if let Some(simulation) = self.simulation.as_mut() {
                    simulation.select_pathway(pathway);
                }
            }
            UiCommand::TogglePause => self.pacing.toggle_pause(),
            UiCommand::Resize { width, height } => {
                let factor = self.layout.resize(width, height);
                if let Some(simulation) = self.simulation.as_mut() {
                    if let Some(factor) = factor {
                        simulation.rescale_horizontal(factor);
                    }
                } else if self.layout.is_ready() {
                    self.simulation = Some(SimulationState::new(&self.layout));
                }
            }
            UiCommand::Exit => self.exit_requested = true,
        }
    }

    fn update(&mut self) {
        let dt = self.render_clock.tick();
        let ticks = self.pacing.due_ticks(dt);
        if let Some(simulation) = self.simulation.as_mut() {
            for _ in 0..ticks {
                self.driver.tick(simulation, &self.layout, &mut self.rng);
            }
        }

        // Update FPS display every 500ms
        self.frame_count += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_update);
        if elapsed >= Duration::from_millis(500) {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.window
                .set_title(&format!("Mitochondrial Protein Import - FPS: {:.1}", fps));
            self.frame_count = 0;
            self.last_fps_update = now;
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let ctx = self.egui_ctx.clone();
        let mut commands = Vec::new();
        let full_output = ctx.run(raw_input, |ctx| {
            commands = ui_renderer::render_ui(
                ctx,
                self.simulation.as_ref(),
                &self.layout,
                self.pacing.pause,
                &self.render_clock,
                &self.pathway_keys,
                &mut self.show_about_window,
                &self.render_options,
            );
        });
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let clipped_primitives = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        let user_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(
            user_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();

        for command in commands {
            self.apply(command);
        }

        Ok(())
    }
}

/// Zero-based position of a `1`..`9` digit key.
fn digit_index(code: &KeyCode) -> Option<usize> {
    let index = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        _ => return None,
    };
    Some(index)
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let settings = AppSettings::load().unwrap_or_else(|e| {
        warn!("{}, using default settings", e);
        AppSettings::default()
    });

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Mitochondrial Protein Import")
            .with_inner_size(winit::dpi::LogicalSize::new(
                settings.window_width,
                settings.window_height,
            ))
            .build(&event_loop)?,
    );

    let mut state = pollster::block_on(State::new(window, settings)).map_err(|e| {
        error!("Failed to initialise graphics: {}", e);
        e
    })?;

    event_loop.run(move |event, target| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == state.window.id() => {
            let response = state.egui_state.on_window_event(&state.window, event);
            if response.consumed || state.input(event) {
                return;
            }
            match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            ..
                        },
                    ..
                } => target.exit(),
                WindowEvent::Resized(physical_size) => {
                    state.resize(*physical_size);
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let new_size = state.window.inner_size();
                    state.resize(new_size);
                }
                _ => {}
            }
        }
        Event::AboutToWait => {
            state.update();
            match state.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory");
                    target.exit();
                }
                Err(e) => warn!("{:?}", e),
            }
            if state.exit_requested {
                target.exit();
            }
            state.window.request_redraw();
        }
        _ => {}
    })?;

    Ok(())
}
