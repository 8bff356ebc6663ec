pub mod history;
pub mod timer;

use winit::window::Window;

use self::history::{FrameHistory, FrameSummary};
use self::timer::{FramePhase, PhaseTimers};
use crate::render::GpuState;
use crate::sim::WorldState;

/// Number of frame times to keep in the histogram.
const FRAME_HISTORY_LEN: usize = 300;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Mood glyph size in points.
const GLYPH_SIZE: f32 = 32.0;

/// What the overlay needs to know about the creature this frame.
#[derive(Debug, Clone)]
pub struct CreatureView {
    /// Anchor in physical pixels.
    pub anchor: [f32; 2],
    pub glyph: &'static str,
    pub mode: &'static str,
    pub time: u32,
    pub speed: f64,
    pub direction: f64,
    pub distance: f64,
}

impl CreatureView {
    pub fn from_world(world: &WorldState) -> Self {
        let p = &world.position;
        Self {
            anchor: [p.x as f32, p.y as f32],
            glyph: p.emotion.glyph(),
            mode: world.mode.label(),
            time: p.time,
            speed: p.speed,
            direction: p.direction,
            distance: p.distance,
        }
    }
}

/// egui layer: the mood glyph, plus the F12 debug HUD.
pub struct Overlay {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,

    pub hud_visible: bool,

    /// Rolling window of frame times (seconds).
    pub frame_times: FrameHistory,
    /// Per-phase timers (updated by the app each frame).
    pub phase_timers: PhaseTimers,
    pub tick_count: u64,

    // Periodic log accumulator.
    frame_count: u64,
    log_timer: f64,
    log_frame_count: u32,
    log_frame_sum: f64,
    log_frame_min: f64,
    log_frame_max: f64,
}

impl Overlay {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            hud_visible: false,
            frame_times: FrameHistory::new(FRAME_HISTORY_LEN),
            phase_timers: PhaseTimers::new(),
            tick_count: 0,
            frame_count: 0,
            log_timer: 0.0,
            log_frame_count: 0,
            log_frame_sum: 0.0,
            log_frame_min: f64::MAX,
            log_frame_max: 0.0,
        }
    }

    /// Record a frame time and periodically log a summary.
    pub fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frame_times.push(dt);

        self.log_frame_count += 1;
        self.log_frame_sum += dt;
        self.log_frame_min = self.log_frame_min.min(dt);
        self.log_frame_max = self.log_frame_max.max(dt);
        self.log_timer += dt;

        if self.log_timer >= FPS_LOG_INTERVAL {
            let avg_ms = (self.log_frame_sum / self.log_frame_count as f64) * 1000.0;
            let fps = self.log_frame_count as f64 / self.log_timer;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {} | ticks: {}",
                fps,
                avg_ms,
                self.log_frame_min * 1000.0,
                self.log_frame_max * 1000.0,
                self.frame_count,
                self.tick_count,
            );
            self.log_timer = 0.0;
            self.log_frame_count = 0;
            self.log_frame_sum = 0.0;
            self.log_frame_min = f64::MAX;
            self.log_frame_max = 0.0;
        }
    }

    pub fn toggle_hud(&mut self) {
        self.hud_visible = !self.hud_visible;
        log::info!("Debug HUD {}", if self.hud_visible { "shown" } else { "hidden" });
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the egui frame and produce paint output.
    /// Returns (clipped_primitives, textures_delta, screen_descriptor).
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
        creature: &CreatureView,
    ) -> (
        Vec<egui::epaint::ClippedPrimitive>,
        egui::TexturesDelta,
        egui_wgpu::ScreenDescriptor,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        let hud = HudSnapshot {
            visible: self.hud_visible,
            summary: self.frame_times.summary(),
            frame_times: self.frame_times.iter().collect(),
            phase_durations: self.phase_timers.durations_us,
            phase_total_us: self.phase_timers.total_us(),
            tick_count: self.tick_count,
        };

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            paint_glyph(ctx, creature);
            draw_hud(ctx, &hud, creature);
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_w, screen_h],
            pixels_per_point,
        };

        (clipped_primitives, full_output.textures_delta, screen_descriptor)
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare_egui(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor)
    }

    /// Render egui into the given render pass.
    pub fn render_egui(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        for &id in &textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}

// ---------------------------------------------------------------------------
// Painting (free functions avoid borrow conflicts with egui_ctx)
// ---------------------------------------------------------------------------

struct HudSnapshot {
    visible: bool,
    summary: FrameSummary,
    frame_times: Vec<f64>,
    phase_durations: [f64; 4],
    phase_total_us: f64,
    tick_count: u64,
}

/// Physical pixels to egui points.
fn to_points(anchor: [f32; 2], pixels_per_point: f32) -> egui::Pos2 {
    let ppp = if pixels_per_point > 0.0 { pixels_per_point } else { 1.0 };
    egui::pos2(anchor[0] / ppp, anchor[1] / ppp)
}

fn paint_glyph(ctx: &egui::Context, creature: &CreatureView) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let pos = to_points(creature.anchor, ctx.pixels_per_point());
    painter.text(
        pos,
        egui::Align2::CENTER_CENTER,
        creature.glyph,
        egui::FontId::proportional(GLYPH_SIZE),
        egui::Color32::WHITE,
    );
}

fn draw_hud(ctx: &egui::Context, s: &HudSnapshot, creature: &CreatureView) {
    if !s.visible {
        return;
    }

    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 220))
        .corner_radius(6.0)
        .inner_margin(10.0);

    egui::Window::new("Debug")
        .default_pos([10.0, 10.0])
        .default_width(300.0)
        .resizable(true)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::from_gray(220));

            // --- Creature ---
            ui.heading("Creature");
            ui.label(format!("{} {} for {} ticks", creature.glyph, creature.mode, creature.time));
            ui.label(
                egui::RichText::new(format!(
                    "at ({:.0}, {:.0}) | speed {:.3} | heading {:.2} rad",
                    creature.anchor[0], creature.anchor[1], creature.speed, creature.direction,
                ))
                .monospace(),
            );
            ui.label(format!("Pointer distance: {:.1}px", creature.distance));
            ui.add_space(4.0);

            // --- Performance ---
            ui.heading("Performance");
            ui.label(format!("FPS: {:.1}", s.summary.fps));
            ui.label(format!(
                "Frame: {:.2}ms avg | {:.2} min | {:.2} max",
                s.summary.avg * 1000.0,
                s.summary.min * 1000.0,
                s.summary.max * 1000.0,
            ));

            if !s.frame_times.is_empty() {
                let max_time = s
                    .frame_times
                    .iter()
                    .copied()
                    .fold(0.0f64, f64::max)
                    .max(0.020);

                let (response, painter) =
                    ui.allocate_painter(egui::vec2(280.0, 50.0), egui::Sense::hover());
                let rect = response.rect;
                let bar_width = rect.width() / s.frame_times.len() as f32;

                for (i, &t) in s.frame_times.iter().enumerate() {
                    let h = (t / max_time) as f32 * rect.height();
                    let x = rect.left() + i as f32 * bar_width;
                    let color = if t > 0.01667 {
                        egui::Color32::from_rgb(255, 100, 80)
                    } else {
                        egui::Color32::from_rgb(80, 200, 120)
                    };
                    painter.rect_filled(
                        egui::Rect::from_min_max(
                            egui::pos2(x, rect.bottom() - h),
                            egui::pos2(x + bar_width, rect.bottom()),
                        ),
                        0.0,
                        color,
                    );
                }
            }
            ui.add_space(4.0);

            // --- Phase timers ---
            ui.heading("Phase Timers");
            let total = s.phase_total_us.max(1.0);
            for phase in FramePhase::ALL {
                let us = s.phase_durations[phase as usize];
                ui.label(
                    egui::RichText::new(format!(
                        "{:<12}{:>6.0}us ({:>2.0}%)",
                        phase.label(),
                        us,
                        us / total * 100.0,
                    ))
                    .monospace(),
                );
            }
            ui.label(
                egui::RichText::new(format!("Total: {:.0}us ({:.2}ms)", total, total / 1000.0))
                    .monospace(),
            );
            ui.add_space(4.0);

            ui.label(format!("Ticks: {}", s.tick_count));
            ui.label("F12: Toggle | ESC: Quit");
        });
}
