// ui.rs - egui front end: controls, board painting and click-to-toggle

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use crate::GameOfLife;
use conway_core::PATTERNS;

/// Maps a pointer offset from the board's top-left corner to a cell,
/// `(px / cell_size, py / cell_size)`, or `None` when it lands off the board.
pub fn cell_at(offset: Vec2, cell_size: f32, width: usize, height: usize) -> Option<(usize, usize)> {
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let x = (offset.x / cell_size) as usize;
    let y = (offset.y / cell_size) as usize;
    (x < width && y < height).then_some((x, y))
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.sim.is_paused() { "▶ Resume" } else { "⏸ Pause" };
                if ui.button(button_text).clicked() {
                    self.toggle_pause();
                }
                if ui.button("💾 Save").clicked() {
                    self.save();
                }
                if ui.button("📂 Load").clicked() {
                    self.load();
                }
                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }
                if ui.button("⏹ Clear").clicked() {
                    self.clear();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });
                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Interval:");
                let mut millis = self.update_interval.as_millis() as u64;
                if ui
                    .add(egui::Slider::new(&mut millis, 50..=2000).suffix(" ms"))
                    .changed()
                {
                    self.update_interval = std::time::Duration::from_millis(millis);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
                ui.checkbox(&mut self.config.show_grid_lines, "Grid lines");
            });

            ui.separator();

            // Board
            let (width, height) = self.sim.dimensions();
            let cell_size = self.config.cell_size;
            let (board_w, board_h) = self.board_size();
            let (response, painter) =
                ui.allocate_painter(Vec2::new(board_w, board_h), egui::Sense::click());
            let origin = response.rect.min;

            let grid = self.sim.grid();
            for (x, y, alive) in grid.cells() {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(x as f32 * cell_size, y as f32 * cell_size),
                    Vec2::splat(cell_size),
                );
                let color = if alive { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 0.0, color);
                if self.config.show_grid_lines {
                    painter.rect_stroke(rect, 0.0, Stroke::new(0.5, Color32::GRAY));
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((x, y)) = cell_at(pos - origin, cell_size, width, height) {
                        self.toggle_cell(x, y);
                    }
                }
            }

            ui.separator();

            let live = self.sim.grid().live_count();
            let total = width * height;
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", self.sim.generation()));
                ui.label(format!("Live cells: {live}"));
                ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
            });

            let mut dismissed = false;
            if let Some(status) = &self.status {
                ui.horizontal(|ui| {
                    ui.label(status.as_str());
                    dismissed = ui.small_button("✖").clicked();
                });
            }
            if dismissed {
                self.status = None;
            }
        });

        if !self.sim.is_paused() {
            ctx.request_repaint_after(self.until_next_tick(Instant::now()));
        }
    }
}
