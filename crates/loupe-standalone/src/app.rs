use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam::channel::Receiver;
use egui::RichText;
use loupe_capture::{CaptureError, FrameSlot, FrameSource, PatternBackend};
use loupe_core::{
    event_channel, map_key, InputEvent, InteractionStateMachine, KeyCode, ParameterStore,
    RedrawHandle, RenderScheduler,
};
use loupe_gui::draw_overlay;
use loupe_render::MagnifierRenderer;

use crate::settings::JsonSettingsStore;
use crate::voice;

#[derive(Clone, Copy)]
pub struct AppOptions {
    pub voice_stdin: bool,
    #[cfg(feature = "camera")]
    pub camera: Option<u32>,
}

/// Wakes the egui loop on scheduler demand. This is the only way a draw
/// ever happens; there is no fixed-rate repaint.
struct EguiRedraw {
    ctx: egui::Context,
}

impl RedrawHandle for EguiRedraw {
    fn redraw(&self) {
        self.ctx.request_repaint();
    }

    fn redraw_after(&self, delay: Duration) {
        self.ctx.request_repaint_after(delay);
    }
}

/// GL-side state shared with the paint callback. The renderer must be
/// created on the render context, so it is lazily initialized inside the
/// first callback (the mutex is only ever touched there).
struct SceneState {
    renderer: Option<MagnifierRenderer>,
}

pub struct LoupeApp {
    machine: InteractionStateMachine,
    params: Arc<ParameterStore>,
    scheduler: Arc<RenderScheduler>,
    events: Receiver<InputEvent>,
    source: FrameSource,
    slot: Arc<FrameSlot>,
    scene: Arc<Mutex<SceneState>>,
    camera_error: Option<String>,
}

impl LoupeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, options: AppOptions) -> Result<Self, CaptureError> {
        let scheduler = Arc::new(RenderScheduler::new());
        scheduler.attach(Box::new(EguiRedraw {
            ctx: cc.egui_ctx.clone(),
        }));

        let params = Arc::new(ParameterStore::new());
        params.bind_scheduler(scheduler.clone());

        let settings = Arc::new(JsonSettingsStore::at_default_location());
        let mut machine = InteractionStateMachine::new(params.clone(), settings);
        machine.touch(Instant::now());

        let (tx, events) = event_channel();
        if options.voice_stdin {
            voice::spawn_stdin_phrases(tx.clone());
        }

        // No rendering without a device: startup failure ends the session.
        let mut source = FrameSource::new(scheduler.clone());
        open_camera(&mut source, &options)?;
        let slot = source.slot();

        Ok(Self {
            machine,
            params,
            scheduler,
            events,
            source,
            slot,
            scene: Arc::new(Mutex::new(SceneState { renderer: None })),
            camera_error: None,
        })
    }

    fn drain_input(&mut self, ctx: &egui::Context, now: Instant) {
        for key in collect_keys(ctx) {
            self.machine.handle(map_key(key), now);
        }
        while let Ok(event) = self.events.try_recv() {
            self.machine.handle(event, now);
        }
    }
}

impl eframe::App for LoupeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.drain_input(ctx, now);

        if let Some(failure) = self.source.take_failure() {
            self.camera_error = Some(failure.to_string());
        }

        // This repaint is the draw the scheduler asked for; drain the
        // coalesced request.
        self.scheduler.take_pending();

        let params = self.params.snapshot();
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scene = self.scene.clone();
                let slot = self.slot.clone();

                let callback = egui_glow::CallbackFn::new(move |info, painter| {
                    let gl = painter.gl();
                    let vp = info.viewport_in_pixels();
                    let viewport = [vp.left_px, vp.from_bottom_px, vp.width_px, vp.height_px];

                    let mut scene = scene.lock().unwrap();
                    if scene.renderer.is_none() {
                        scene.renderer = Some(MagnifierRenderer::new(gl));
                        log::info!("magnifier renderer initialized");
                    }
                    let new_frame = slot.take();
                    if let Some(renderer) = &mut scene.renderer {
                        renderer.render(gl, new_frame.as_deref(), &params, viewport);
                    }
                });
                ui.painter().add(egui::PaintCallback {
                    rect,
                    callback: Arc::new(callback),
                });

                if let Some(error) = &self.camera_error {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("Camera stopped: {error}"))
                                .size(18.0)
                                .color(egui::Color32::LIGHT_RED),
                        );
                    });
                }
            });

        draw_overlay(ctx, &self.machine, &self.params, now);

        // Queue a wakeup for the auto-hide deadline so the menu disappears
        // without further input.
        if let Some(deadline) = self.machine.hide_deadline() {
            if deadline > now {
                ctx.request_repaint_after(deadline - now);
            }
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        self.source.close();
        if let Some(gl) = gl {
            if let Some(renderer) = self.scene.lock().unwrap().renderer.take() {
                renderer.destroy(gl);
            }
        }
    }
}

fn open_camera(source: &mut FrameSource, options: &AppOptions) -> Result<(), CaptureError> {
    #[cfg(feature = "camera")]
    if let Some(index) = options.camera {
        source.open(&loupe_capture::WebcamBackend::new(index))?;
        source.configure(1280, 720)?;
        source.start()?;
        return Ok(());
    }
    let _ = options;
    source.open(&PatternBackend)?;
    source.configure(1280, 720)?;
    source.start()?;
    Ok(())
}

fn collect_keys(ctx: &egui::Context) -> Vec<KeyCode> {
    ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key, pressed: true, ..
                } => translate_key(*key),
                _ => None,
            })
            .collect()
    })
}

fn translate_key(key: egui::Key) -> Option<KeyCode> {
    match key {
        egui::Key::ArrowUp => Some(KeyCode::Up),
        egui::Key::ArrowLeft => Some(KeyCode::Left),
        egui::Key::ArrowDown => Some(KeyCode::Down),
        egui::Key::ArrowRight => Some(KeyCode::Right),
        egui::Key::Enter => Some(KeyCode::Enter),
        egui::Key::Escape | egui::Key::Backspace => Some(KeyCode::Back),
        _ => None,
    }
}
