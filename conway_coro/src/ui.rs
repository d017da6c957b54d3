// ui.rs - Draws the latest published generation and the run controls

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Sense, Vec2};
use crate::LifeApp;

// Stats overlay geometry, relative to the top-left of the board
const OVERLAY_MIN: Vec2 = Vec2::new(20.0, 30.0);
const OVERLAY_SIZE: Vec2 = Vec2::new(250.0, 70.0);
const OVERLAY_TEXT_X: f32 = 30.0;
const OVERLAY_BASELINES: [f32; 2] = [60.0, 90.0];
const OVERLAY_FONT_SIZE: f32 = 24.0;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let running = self.scheduler.is_running();
                let button_text = if running { "⏸ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    if running {
                        self.stop();
                    } else {
                        self.start();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.random_grid();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(conway::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in conway::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let cell_size = self.config.cell_size as f32;
            let frame = self.frames.borrow().clone();
            let grid = &frame.grid;

            let board_size = Vec2::new(
                grid.width() as f32 * cell_size,
                grid.height() as f32 * cell_size,
            );
            let (response, painter) = ui.allocate_painter(board_size, Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(Rect::from_min_size(origin, board_size), 0.0, self.dead_color);

            let radius = cell_size / 2.0;
            for (column, row, cell) in grid.cells() {
                let center = origin + Vec2::new(
                    column as f32 * cell_size + radius,
                    row as f32 * cell_size + radius,
                );
                let color = if cell.is_alive() { self.live_color } else { self.dead_color };
                painter.circle_filled(center, radius, color);
            }

            // Stats overlay
            painter.rect_filled(
                Rect::from_min_size(origin + OVERLAY_MIN, OVERLAY_SIZE),
                0.0,
                Color32::BLACK,
            );
            for (line, baseline) in conway::overlay_lines(&frame).iter().zip(OVERLAY_BASELINES) {
                painter.text(
                    origin + Vec2::new(OVERLAY_TEXT_X, baseline),
                    Align2::LEFT_BOTTOM,
                    line,
                    FontId::proportional(OVERLAY_FONT_SIZE),
                    Color32::WHITE,
                );
            }

            // Cells can only be toggled while stopped
            if response.clicked() && !self.scheduler.is_running() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - origin;
                    if offset.x >= 0.0 && offset.y >= 0.0 {
                        let column = (offset.x / cell_size) as usize;
                        let row = (offset.y / cell_size) as usize;
                        self.toggle_cell(column, row);
                    }
                }
            }
        });
    }
}
