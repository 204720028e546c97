// engine.rs - Conway's transition rule and the step/render run loop

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::grid::{Boundary, LifeGrid};
use crate::render::Renderer;

/// Why a run loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    StepLimit,
    Cancelled,
}

/// Outcome of [`LifeEngine::run`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Generations computed during the run
    pub generations: u64,
    /// Grid as it stood when the loop exited
    pub grid: LifeGrid,
    pub stop: StopReason,
}

/// Applies B3/S23 to whole grids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeEngine {
    boundary: Boundary,
}

/// Next state of one cell from its current state and live-neighbor count
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// True once `generation` generations have been computed and the limit,
/// if any, allows no more.
pub fn step_limit_reached(generation: u64, max_steps: Option<u64>) -> bool {
    max_steps.is_some_and(|max| generation >= max)
}

impl LifeEngine {
    pub fn new(boundary: Boundary) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Computes the next generation. `current` is only read, so every
    /// neighbor count sees the pre-step state.
    pub fn step(&self, current: &LifeGrid) -> LifeGrid {
        current.map(|row, col, alive| next_state(alive, current.neighbors_unchecked(row, col, self.boundary)))
    }

    /// Applies `step` `generations` times.
    pub fn advance(&self, grid: &LifeGrid, generations: u64) -> LifeGrid {
        let mut grid = grid.clone();
        for _ in 0..generations {
            grid = self.step(&grid);
        }
        grid
    }

    /// Renders, waits `delay`, then steps, until `max_steps` generations have
    /// been computed or `shutdown` resolves. Cancellation is only observed
    /// between generations, never in the middle of one. Renderer errors end
    /// the loop and are returned.
    pub async fn run<R, S>(
        &self,
        mut grid: LifeGrid,
        renderer: &mut R,
        delay: Duration,
        max_steps: Option<u64>,
        shutdown: S,
    ) -> Result<RunSummary>
    where
        R: Renderer + ?Sized,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut generation = 0u64;

        log::info!(
            "starting run: {}x{} grid, {:?} boundary, delay {:?}, limit {:?}",
            grid.height(),
            grid.width(),
            self.boundary,
            delay,
            max_steps
        );

        loop {
            if step_limit_reached(generation, max_steps) {
                log::info!("step limit reached after {} generations", generation);
                return Ok(RunSummary { generations: generation, grid, stop: StopReason::StepLimit });
            }

            renderer.present(generation, &grid)?;

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    log::info!("run cancelled at generation {}", generation);
                    return Ok(RunSummary { generations: generation, grid, stop: StopReason::Cancelled });
                }
                _ = tokio::time::sleep(delay) => {}
            }

            grid = self.step(&grid);
            generation += 1;
            log::debug!("generation {}: {} live cells", generation, grid.population());

            tokio::task::yield_now().await; // Cooperative yielding
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use proptest::prelude::*;

    fn grid_with(height: i64, width: i64, cells: &[(i64, i64)]) -> LifeGrid {
        let mut grid = LifeGrid::new(height, width).unwrap();
        for &(row, col) in cells {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_rule_table() {
        for neighbors in 0..=8u8 {
            assert_eq!(next_state(true, neighbors), neighbors == 2 || neighbors == 3);
            assert_eq!(next_state(false, neighbors), neighbors == 3);
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        let engine = LifeEngine::default();
        let horizontal = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = engine.step(&horizontal);
        assert_eq!(vertical.live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(engine.step(&vertical), horizontal);
    }

    #[test]
    fn test_block_is_still() {
        let engine = LifeEngine::default();
        let block = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(engine.advance(&block, 10), block);
    }

    #[test]
    fn test_step_does_not_mutate_input() {
        let engine = LifeEngine::default();
        let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let before = grid.clone();
        let _ = engine.step(&grid);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_boundary_policies() {
        // Vertical blinker on the left edge of a 3x3 grid
        let grid = grid_with(3, 3, &[(0, 0), (1, 0), (2, 0)]);
        let bounded = LifeEngine::new(Boundary::Bounded).step(&grid);
        assert_eq!(bounded.live_cells(), vec![(1, 0), (1, 1)]);

        let glider_field = grid_with(6, 6, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let torus = LifeEngine::new(Boundary::Toroidal);
        // A glider returns to its shape shifted by (1, 1) every 4 generations
        let moved = torus.advance(&glider_field, 24);
        assert_eq!(moved, glider_field);

        // A full 2x2 torus: every cell sees its 3 distinct neighbors and survives
        let tiny = grid_with(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(torus.step(&tiny), tiny);
        let lone = grid_with(1, 1, &[(0, 0)]);
        assert_eq!(torus.step(&lone).population(), 0);
    }

    #[test]
    fn test_step_limit_reached() {
        assert!(!step_limit_reached(0, None));
        assert!(!step_limit_reached(u64::MAX, None));
        assert!(step_limit_reached(0, Some(0)));
        assert!(!step_limit_reached(2, Some(3)));
        assert!(step_limit_reached(3, Some(3)));
    }

    struct Recorder {
        seen: Vec<(u64, usize)>,
        fail_at: Option<u64>,
    }

    impl Renderer for Recorder {
        fn present(&mut self, generation: u64, grid: &LifeGrid) -> Result<()> {
            if self.fail_at == Some(generation) {
                return Err(LifeError::Render("display went away".into()));
            }
            self.seen.push((generation, grid.population()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_stops_at_step_limit() {
        let engine = LifeEngine::default();
        let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let mut recorder = Recorder { seen: Vec::new(), fail_at: None };
        let summary = engine
            .run(grid.clone(), &mut recorder, Duration::ZERO, Some(3), std::future::pending())
            .await
            .unwrap();
        assert_eq!(summary.stop, StopReason::StepLimit);
        assert_eq!(summary.generations, 3);
        assert_eq!(summary.grid, engine.advance(&grid, 3));
        assert_eq!(recorder.seen, vec![(0, 3), (1, 3), (2, 3)]);
    }

    #[tokio::test]
    async fn test_run_cancels_cleanly() {
        let engine = LifeEngine::default();
        let grid = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut recorder = Recorder { seen: Vec::new(), fail_at: None };
        let summary = engine
            .run(grid, &mut recorder, Duration::from_secs(3600), None, async {})
            .await
            .unwrap();
        assert_eq!(summary.stop, StopReason::Cancelled);
        assert_eq!(summary.generations, 0);
        assert_eq!(recorder.seen.len(), 1);
    }

    #[tokio::test]
    async fn test_run_propagates_render_errors() {
        let engine = LifeEngine::default();
        let grid = LifeGrid::new(3, 3).unwrap();
        let mut recorder = Recorder { seen: Vec::new(), fail_at: Some(2) };
        let result = engine
            .run(grid, &mut recorder, Duration::ZERO, None, std::future::pending())
            .await;
        assert!(matches!(result, Err(LifeError::Render(_))));
        assert_eq!(recorder.seen.len(), 2);
    }

    #[tokio::test]
    async fn test_run_accepts_closure_renderer() {
        let engine = LifeEngine::default();
        let mut frames = 0;
        let mut count = |_generation: u64, _grid: &LifeGrid| -> Result<()> {
            frames += 1;
            Ok(())
        };
        let grid = LifeGrid::new(2, 2).unwrap();
        engine
            .run(grid, &mut count, Duration::ZERO, Some(5), std::future::pending())
            .await
            .unwrap();
        assert_eq!(frames, 5);
    }

    proptest! {
        #[test]
        fn test_step_is_deterministic(
            rows in (1usize..10, 1usize..10).prop_flat_map(|(h, w)| {
                proptest::collection::vec(proptest::collection::vec(any::<bool>(), w), h)
            }),
            toroidal: bool,
        ) {
            let grid = LifeGrid::from_rows(rows).unwrap();
            let engine = LifeEngine::new(if toroidal { Boundary::Toroidal } else { Boundary::Bounded });
            prop_assert_eq!(engine.step(&grid), engine.step(&grid));
        }
    }
}
