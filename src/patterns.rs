// patterns.rs - Well-known starting patterns, stamped onto a LifeGrid

use crate::error::{LifeError, Result};
use crate::grid::LifeGrid;

/// Named set of live cells, relative to the pattern's top-left corner
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "gosper-glider-gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

impl Pattern {
    /// Rows and columns spanned by the pattern.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Sets the pattern's cells alive with its top-left corner at `origin`.
    /// Nothing is written unless the whole pattern fits.
    pub fn stamp(&self, grid: &mut LifeGrid, origin: (i64, i64)) -> Result<()> {
        let (height, width) = self.extent();
        // Bounds of the far corner decide whether the whole pattern fits
        grid.get(origin.0, origin.1)?;
        grid.get(origin.0 + height as i64 - 1, origin.1 + width as i64 - 1)?;

        for &(row, col) in self.cells {
            grid.set(origin.0 + row as i64, origin.1 + col as i64, true)?;
        }
        Ok(())
    }

    /// Top-left origin that places the pattern in the middle of `grid`.
    pub fn centered_origin(&self, grid: &LifeGrid) -> (i64, i64) {
        let (height, width) = self.extent();
        (
            (grid.height() as i64 - height as i64) / 2,
            (grid.width() as i64 - width as i64) / 2,
        )
    }
}

pub fn find(name: &str) -> Result<&'static Pattern> {
    let wanted = name.to_lowercase().replace([' ', '_'], "-");
    PATTERNS
        .iter()
        .find(|pattern| pattern.name == wanted)
        .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|pattern| pattern.name)
}
