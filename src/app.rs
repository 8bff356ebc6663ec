use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::creature::Surface;
use crate::input::PointerInput;
use crate::overlay::timer::FramePhase;
use crate::overlay::{CreatureView, Overlay};
use crate::render::legs::LegBatch;
use crate::render::GpuState;
use crate::sim::{self, WorldState};

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// Initial window size in logical pixels.
const INITIAL_SIZE: (f64, f64) = (1024.0, 768.0);

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    overlay: Option<Overlay>,

    // Simulation
    world: WorldState,
    pointer: PointerInput,
    rng: fastrand::Rng,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,
    tick_count: u64,

    // Screen dimensions (physical pixels)
    screen_w: u32,
    screen_h: u32,

    // Reusable vertex buffer (avoid per-frame allocation)
    leg_batch: LegBatch,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            overlay: None,
            world: WorldState::new(),
            pointer: PointerInput::new(),
            rng: fastrand::Rng::new(),
            last_frame_time: None,
            accumulator: 0.0,
            tick_count: 0,
            screen_w: 0,
            screen_h: 0,
            leg_batch: LegBatch::new(),
        }
    }

    fn surface(&self) -> Surface {
        Surface::new(self.screen_w as f64, self.screen_h as f64)
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        // Sample the pointer once per frame (not per tick)
        let raw_pointer = self.pointer.read();
        let surface = self.surface();

        while self.accumulator >= TICK_RATE {
            let world = std::mem::take(&mut self.world);
            self.world = sim::tick(world, raw_pointer, &surface, &mut self.rng);

            self.accumulator -= TICK_RATE;
            self.tick_count += 1;
        }
    }

    fn init_graphics(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let attrs = WindowAttributes::default()
            .with_title("Tentacles")
            .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_SIZE.0, INITIAL_SIZE.1));

        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        self.screen_w = size.width;
        self.screen_h = size.height;
        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = GpuState::new(window.clone())?;
        log::info!("wgpu + leg pipeline initialized");

        self.overlay = Some(Overlay::new(&window, &gpu));
        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    fn render(&mut self) {
        let (Some(window), Some(gpu), Some(overlay)) =
            (&self.window, &mut self.gpu, &mut self.overlay)
        else {
            return;
        };

        overlay.phase_timers.begin();
        let vertices = self.leg_batch.build_vertices(&self.world.legs);
        overlay.phase_timers.end(FramePhase::BuildVertices);

        overlay.phase_timers.begin();
        gpu.update_legs(vertices);
        overlay.phase_timers.end(FramePhase::GpuUpload);

        overlay.phase_timers.begin();
        let Some(mut frame) = gpu.begin_frame() else {
            return;
        };
        gpu.draw_legs(&mut frame.encoder, &frame.view);

        let creature = CreatureView::from_world(&self.world);
        let (primitives, textures_delta, screen_descriptor) =
            overlay.run_frame(window, self.screen_w, self.screen_h, &creature);
        let extra = overlay.prepare_egui(
            &gpu.device,
            &gpu.queue,
            &mut frame.encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );
        {
            let mut pass = GpuState::begin_egui_pass(&mut frame.encoder, &frame.view);
            overlay.render_egui(&mut pass, &primitives, &screen_descriptor);
        }
        gpu.finish_frame(frame.encoder, frame.output, extra);
        overlay.free_textures(&textures_delta);
        overlay.phase_timers.end(FramePhase::RenderSubmit);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Failed to initialize graphics: {e}");
            event_loop.exit();
            return;
        }

        // Continuous animation loop
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(overlay)) = (&self.window, &mut self.overlay) {
            // The overlay never takes input focus, so its verdict is ignored.
            let _ = overlay.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.record(position.x, position.y);
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        log::info!("ESC pressed, exiting");
                        event_loop.exit();
                    }
                    Key::Named(NamedKey::F12) => {
                        if let Some(overlay) = &mut self.overlay {
                            overlay.toggle_hud();
                        }
                    }
                    _ => {}
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    if new_size.width > 0 && new_size.height > 0 {
                        gpu.resize(new_size.width, new_size.height);
                        self.screen_w = new_size.width;
                        self.screen_h = new_size.height;
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                // --- Timing ---
                let now = Instant::now();
                if let Some(last) = self.last_frame_time {
                    let dt = now.duration_since(last).as_secs_f64();

                    if let Some(overlay) = &mut self.overlay {
                        overlay.record_frame(dt);
                        overlay.phase_timers.begin();
                    }

                    // Fixed timestep sim
                    self.run_fixed_update(dt);

                    if let Some(overlay) = &mut self.overlay {
                        overlay.phase_timers.end(FramePhase::Simulate);
                        overlay.tick_count = self.tick_count;
                    }
                }
                self.last_frame_time = Some(now);

                // --- Render ---
                self.render();
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
