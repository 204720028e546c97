// graphic.rs - Windowed plot of the grid, driven by the egui frame loop

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use crate::engine::{self, LifeEngine};
use crate::error::{LifeError, Result};
use crate::game::Game;
use crate::grid::LifeGrid;
use crate::{patterns, seed};

const MAX_BOX_SIZE: f32 = 15.0;
const MIN_BOX_SIZE: f32 = 2.0;
const SPACING: f32 = 0.5;
const GRID_AREA: f32 = 760.0;

/// Opens the window and blocks until it is closed.
pub fn run(game: Game) -> Result<()> {
    let app = GraphicApp::new(game);
    let side = app.box_size * app.grid.height().max(app.grid.width()) as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([(side + 40.0).max(800.0), side + 220.0]),
        ..Default::default()
    };

    log::info!("opening simulation window");
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| LifeError::Render(e.to_string()))
}

struct GraphicApp {
    grid: LifeGrid,
    initial: LifeGrid,
    engine: LifeEngine,
    is_running: bool,
    last_update: Instant,
    update_interval: Duration,
    generation: u64,
    max_steps: Option<u64>,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
    alive_probability: f64,
    random_seed: Option<u64>,
    box_size: f32,
}

impl GraphicApp {
    fn new(game: Game) -> Self {
        let (grid, engine, options) = game.into_parts();
        let cells = grid.height().max(grid.width()) as f32;
        let box_size = (GRID_AREA / cells - SPACING).clamp(MIN_BOX_SIZE, MAX_BOX_SIZE);

        Self {
            initial: grid.clone(),
            grid,
            engine,
            is_running: true,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(options.delay_ms.max(1)),
            generation: 0,
            max_steps: options.max_steps,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            alive_probability: options.alive_probability,
            random_seed: options.seed,
            box_size,
        }
    }

    /// Same limit as the console loop: exactly `max_steps` generations are
    /// computed, then stepping stops until the grid is reset.
    fn update_generation(&mut self) {
        if engine::step_limit_reached(self.generation, self.max_steps) {
            self.is_running = false;
            return;
        }

        self.grid = self.engine.step(&self.grid);
        self.generation += 1;
        log::debug!("generation {}: {} live cells", self.generation, self.grid.population());

        if engine::step_limit_reached(self.generation, self.max_steps) {
            log::info!("step limit reached after {} generations", self.generation);
            self.is_running = false;
        }
    }

    fn reset_to(&mut self, grid: LifeGrid) {
        self.is_running = false;
        self.grid = grid;
        self.generation = 0;
    }

    fn clear_grid(&mut self) {
        let mut grid = self.grid.clone();
        grid.clear();
        self.reset_to(grid);
    }

    fn apply_random(&mut self) {
        let (height, width) = (self.grid.height() as i64, self.grid.width() as i64);
        // Each press advances the seed so repeated presses give new grids
        let result = match self.random_seed {
            Some(s) => {
                self.random_seed = Some(s.wrapping_add(1));
                seed::generate_seeded(height, width, self.alive_probability, s)
            }
            None => seed::generate(height, width, self.alive_probability),
        };
        match result {
            Ok(grid) => self.reset_to(grid),
            Err(e) => log::warn!("random grid failed: {e}"),
        }
    }

    fn apply_selected_pattern(&mut self) {
        let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) else {
            return;
        };
        let mut grid = self.grid.clone();
        grid.clear();
        let origin = pattern.centered_origin(&grid);
        match pattern.stamp(&mut grid, origin) {
            Ok(()) => self.reset_to(grid),
            Err(e) => log::warn!("pattern {} does not fit: {e}", pattern.name),
        }
    }

    fn toggle_cell(&mut self, row: i64, col: i64) {
        if let Err(e) = self.grid.toggle(row, col) {
            log::debug!("ignored click: {e}");
        }
    }
}

impl eframe::App for GraphicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear_grid();
                }

                if ui.button("↺ Reset").clicked() {
                    self.reset_to(self.initial.clone());
                }

                if ui.button("🎲 Random").clicked() {
                    self.apply_random();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.generation));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();
            ui.label("Click cells to toggle them while paused.");
            ui.separator();

            let (rows, cols) = (self.grid.height(), self.grid.width());
            let pitch = self.box_size + SPACING;
            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * cols as f32 - SPACING, pitch * rows as f32 - SPACING);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for (row, cells) in self.grid.rows().enumerate() {
                for (col, &alive) in cells.iter().enumerate() {
                    let rect = Rect::from_min_size(
                        egui::pos2(start_pos.x + col as f32 * pitch, start_pos.y + row as f32 * pitch),
                        Vec2::splat(self.box_size),
                    );
                    let cell_color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, cell_color);
                    if self.box_size >= 6.0 {
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }

            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let row = ((pos.y - start_pos.y) / pitch).floor() as i64;
                    let col = ((pos.x - start_pos.x) / pitch).floor() as i64;
                    self.toggle_cell(row, col);
                }
            }

            ui.separator();

            let live_cells = self.grid.population();
            let total = rows * cols;
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", live_cells as f32 / total as f32 * 100.0));
            });
        });

        // Wake up for the next generation without spinning the event loop
        if self.is_running {
            ctx.request_repaint_after(self.update_interval.saturating_sub(self.last_update.elapsed()));
        }
    }
}
