//! Single-editor egui app wiring history and hover lookup.

mod galley_mirror;
mod shortcuts;
mod surface;

use crossbeam_channel::Receiver;
use eframe::egui::{self, RichText, Stroke};
use galley_mirror::GalleyMirror;
use llore_core::{CaretResolver, Config, HistoryChange, HistoryManager, WordInfo};
use shortcuts::{take_history_commands, HistoryCommand};
use std::time::{Duration, Instant};
use surface::{editor_surface, to_egui_rect};
use tracing::{debug, info};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [960.0, 720.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [480.0, 320.0];
const EDITOR_FONT_SIZE: f32 = 15.0;
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_secs(1);
const COLOR_HOVER_UNDERLINE: egui::Color32 = egui::Color32::from_rgb(0xE5, 0x70, 0x00);

/// Desktop editor state.
pub(crate) struct LloreApp {
    config: Config,
    text: String,
    history: HistoryManager,
    history_events: Receiver<HistoryChange>,
    resolver: CaretResolver<GalleyMirror>,
    hovered: Option<WordInfo>,
    last_change: Option<HistoryChange>,
}

impl LloreApp {
    pub(crate) fn new(ctx: &egui::Context, config: Config) -> Self {
        let mut history = HistoryManager::with_limit(String::new(), config.history_limit);
        let history_events = history.subscribe();
        let mirror_ctx = ctx.clone();
        let force_fallback = config.force_monospace_mirror;
        if force_fallback {
            info!("galley mirror disabled; hover lookup uses monospace arithmetic");
        }
        let resolver = CaretResolver::from_config(&config, move || {
            GalleyMirror::new(mirror_ctx.clone(), force_fallback)
        });
        Self {
            config,
            text: String::new(),
            history,
            history_events,
            resolver,
            hovered: None,
            last_change: None,
        }
    }

    fn apply_history_commands(&mut self, ctx: &egui::Context) {
        let commands = ctx.input_mut(|input| take_history_commands(&mut input.events));
        for command in commands {
            // Typing still inside the debounce window becomes its own undo step.
            self.history.flush_pending();
            let changed = match command {
                HistoryCommand::Undo => self.history.undo(),
                HistoryCommand::Redo => self.history.redo(),
            };
            if changed {
                self.text = self.history.present().to_owned();
                self.resolver.clear_cache();
            }
        }
    }

    fn drain_history_events(&mut self) {
        for change in self.history_events.try_iter() {
            debug!(kind = ?change.kind, undo_len = change.undo_len, redo_len = change.redo_len, "history change");
            self.last_change = Some(change);
        }
    }

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "undo {} | redo {}",
                    self.history.undo_stack().len().saturating_sub(1),
                    self.history.redo_stack().len()
                ));
                if self.history.has_pending() {
                    ui.label(RichText::new("editing").weak());
                }
                if let Some(change) = &self.last_change {
                    ui.label(RichText::new(format!("{:?}", change.kind)).weak());
                }
                ui.separator();
                match &self.hovered {
                    Some(word) => ui.label(format!("\"{}\" @ {}", word.word, word.index)),
                    None => ui.label(RichText::new("no word under pointer").weak()),
                };
            });
        });
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let font = egui::FontId::monospace(EDITOR_FONT_SIZE);
            let line_height = ui.fonts_mut(|f| {
                f.layout_no_wrap("W".to_owned(), font.clone(), ui.visuals().text_color())
                    .size()
                    .y
                    .max(1.0)
            });

            let scroll = egui::ScrollArea::vertical()
                .id_salt("editor_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let rows_that_fit =
                        ((ui.available_height() / line_height).ceil() as usize).max(1);
                    egui::TextEdit::multiline(&mut self.text)
                        .font(font.clone())
                        .desired_width(f32::INFINITY)
                        .desired_rows(rows_that_fit)
                        .lock_focus(true)
                        .hint_text("Start writing...")
                        .show(ui)
                });
            let output = scroll.inner;

            if output.response.changed() {
                self.history
                    .record_debounced(self.text.clone(), self.config.debounce_delay());
                self.resolver.clear_cache();
            }

            let pointer = ctx.input(|input| input.pointer.hover_pos());
            self.hovered = match pointer {
                Some(pos) if scroll.inner_rect.contains(pos) => {
                    let surface = editor_surface(
                        self.text.as_str(),
                        scroll.inner_rect,
                        scroll.state.offset,
                        output.response.rect,
                        output.galley_pos,
                        &font,
                        line_height,
                    );
                    self.resolver.word_at_point(&surface, pos.x, pos.y)
                }
                _ => None,
            };

            if let Some(word) = &self.hovered {
                let rect = to_egui_rect(word.rect);
                ui.painter().with_clip_rect(scroll.inner_rect).line_segment(
                    [rect.left_bottom(), rect.right_bottom()],
                    Stroke::new(1.5, COLOR_HOVER_UNDERLINE),
                );
            }
        });
    }
}

impl eframe::App for LloreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_history_commands(ctx);
        self.render_status_bar(ctx);
        self.render_editor(ctx);
        self.history.tick();
        self.drain_history_events();

        let repaint_after = self
            .history
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_REPAINT_INTERVAL)
            .min(IDLE_REPAINT_INTERVAL);
        ctx.request_repaint_after(repaint_after);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.history.flush_pending() {
            info!("committed pending edit on exit");
        }
    }
}
