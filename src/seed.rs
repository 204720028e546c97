// seed.rs - Random initial grids

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{LifeError, Result};
use crate::grid::LifeGrid;

pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.5;

/// Fills a new grid using the supplied generator; each cell is alive
/// independently with `alive_probability`.
pub fn generate_with<R: Rng + ?Sized>(
    height: i64,
    width: i64,
    alive_probability: f64,
    rng: &mut R,
) -> Result<LifeGrid> {
    if !(0.0..=1.0).contains(&alive_probability) {
        return Err(LifeError::InvalidProbability(alive_probability));
    }
    let mut grid = LifeGrid::new(height, width)?;
    for row in 0..height {
        for col in 0..width {
            grid.set(row, col, rng.gen_bool(alive_probability))?;
        }
    }
    log::debug!(
        "seeded {}x{} grid with {} live cells (p = {})",
        height,
        width,
        grid.population(),
        alive_probability
    );
    Ok(grid)
}

/// Reproducible grid for a fixed seed.
pub fn generate_seeded(height: i64, width: i64, alive_probability: f64, seed: u64) -> Result<LifeGrid> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(height, width, alive_probability, &mut rng)
}

/// Grid seeded from OS entropy.
pub fn generate(height: i64, width: i64, alive_probability: f64) -> Result<LifeGrid> {
    let mut rng = ChaCha8Rng::from_entropy();
    generate_with(height, width, alive_probability, &mut rng)
}
