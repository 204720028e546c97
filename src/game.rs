// game.rs - A configured simulation: grid, engine and presentation settings

use std::future::Future;
use std::time::Duration;

use crate::codec;
use crate::config::LifeOptions;
use crate::engine::{LifeEngine, RunSummary};
use crate::error::Result;
use crate::grid::LifeGrid;
use crate::render::{self, ConsoleRenderer, Renderer};

pub struct Game {
    grid: LifeGrid,
    engine: LifeEngine,
    options: LifeOptions,
    generation: u64,
}

impl Game {
    /// Validates `options` and builds the starting grid.
    pub fn new(options: LifeOptions) -> Result<Self> {
        options.validate()?;
        if options.graphic {
            render::require_graphic()?;
        }
        let grid = options.build_grid()?;
        log::info!(
            "new game: {}x{} grid, {} live cells",
            grid.height(),
            grid.width(),
            grid.population()
        );
        Ok(Self {
            grid,
            engine: LifeEngine::new(options.boundary),
            options,
            generation: 0,
        })
    }

    /// Game over an existing grid with default presentation settings.
    pub fn from_grid(grid: LifeGrid) -> Self {
        let options = LifeOptions {
            height: Some(grid.height() as i64),
            width: Some(grid.width() as i64),
            ..Default::default()
        };
        Self {
            grid,
            engine: LifeEngine::new(options.boundary),
            options,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn engine(&self) -> LifeEngine {
        self.engine
    }

    pub fn options(&self) -> &LifeOptions {
        &self.options
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sets one cell alive or dead.
    pub fn edit_state(&mut self, (row, col): (i64, i64), alive: bool) -> Result<()> {
        self.grid.set(row, col, alive)
    }

    pub fn toggle(&mut self, (row, col): (i64, i64)) -> Result<bool> {
        self.grid.toggle(row, col)
    }

    /// Replaces the grid and restarts the generation count.
    pub fn reset(&mut self, grid: LifeGrid) {
        self.grid = grid;
        self.generation = 0;
    }

    /// Console rendering of the current grid.
    pub fn view(&self) -> String {
        let (alive, dead) = self.options.display_chars();
        codec::render(&self.grid, alive, dead)
    }

    pub fn step(&mut self) {
        self.grid = self.engine.step(&self.grid);
        self.generation += 1;
    }

    /// Runs the loop with any renderer until the step limit or `shutdown`.
    pub async fn run_with<R, S>(&mut self, renderer: &mut R, shutdown: S) -> Result<RunSummary>
    where
        R: Renderer + ?Sized,
        S: Future<Output = ()>,
    {
        let delay = Duration::from_millis(self.options.delay_ms);
        let summary = self
            .engine
            .run(self.grid.clone(), renderer, delay, self.options.max_steps, shutdown)
            .await?;
        self.grid = summary.grid.clone();
        self.generation += summary.generations;
        Ok(summary)
    }

    /// Runs the loop printing each generation to the terminal.
    pub async fn run<S>(&mut self, shutdown: S) -> Result<RunSummary>
    where
        S: Future<Output = ()>,
    {
        let (alive, dead) = self.options.display_chars();
        let mut console = ConsoleRenderer::stdout(alive, dead);
        self.run_with(&mut console, shutdown).await
    }

    /// Opens the simulation window; returns when it is closed.
    #[cfg(feature = "graphic")]
    pub fn run_graphic(self) -> Result<()> {
        crate::graphic::run(self)
    }

    #[cfg(not(feature = "graphic"))]
    pub fn run_graphic(self) -> Result<()> {
        render::require_graphic()
    }

    #[cfg(feature = "graphic")]
    pub(crate) fn into_parts(self) -> (LifeGrid, LifeEngine, LifeOptions) {
        (self.grid, self.engine, self.options)
    }
}
