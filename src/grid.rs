// grid.rs - Fixed-size grid of alive/dead cells for Conway's Game of Life

use std::fmt;

use serde::Deserialize;

use crate::error::{LifeError, Result};

/// Relative positions of the 8 neighbors of a cell
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// What lies beyond the edge of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    /// Cells past the edge are permanently dead
    #[default]
    Bounded,
    /// Edges wrap around, top to bottom and left to right
    #[serde(alias = "torus", alias = "wrap")]
    #[value(alias = "torus", alias = "wrap")]
    Toroidal,
}

/// Dense `height x width` grid stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LifeGrid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl LifeGrid {
    /// Creates a grid with every cell dead.
    pub fn new(height: i64, width: i64) -> Result<Self> {
        let invalid = || LifeError::InvalidDimension { height, width };
        if height <= 0 || width <= 0 {
            return Err(invalid());
        }
        let rows = usize::try_from(height).map_err(|_| invalid())?;
        let cols = usize::try_from(width).map_err(|_| invalid())?;
        let len = rows.checked_mul(cols).ok_or_else(invalid)?;
        // Vec cannot hold more than isize::MAX bytes
        if isize::try_from(len).is_err() {
            return Err(invalid());
        }
        Ok(Self {
            height: rows,
            width: cols,
            cells: vec![false; len],
        })
    }

    /// Builds a grid from rows of equal length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LifeError::InvalidDimension {
                height: height as i64,
                width: width as i64,
            });
        }

        let mut cells = Vec::with_capacity(height * width);
        for (line, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::InconsistentLineLength {
                    line: line + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { height, width, cells })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: i64, col: i64) -> Result<bool> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Overwrites one cell in place.
    pub fn set(&mut self, row: i64, col: i64, alive: bool) -> Result<()> {
        let index = self.index(row, col)?;
        self.cells[index] = alive;
        Ok(())
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, row: i64, col: i64) -> Result<bool> {
        let index = self.index(row, col)?;
        self.cells[index] = !self.cells[index];
        Ok(self.cells[index])
    }

    /// Number of alive cells among the 8 neighbors of `(row, col)`.
    pub fn count_live_neighbors(&self, row: i64, col: i64, boundary: Boundary) -> Result<u8> {
        self.index(row, col)?;
        Ok(self.neighbors_unchecked(row as usize, col as usize, boundary))
    }

    /// Neighbor count for a coordinate already known to be in range.
    ///
    /// On a torus narrower or shorter than 3 cells several offsets wrap onto
    /// the same cell, or onto the cell itself; each distinct neighbor counts once.
    pub(crate) fn neighbors_unchecked(&self, row: usize, col: usize, boundary: Boundary) -> u8 {
        let (h, w) = (self.height as i64, self.width as i64);
        let own = row * self.width + col;
        let mut seen = [own; 8];
        let mut distinct = 0;
        let mut count = 0;
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let (mut nr, mut nc) = (row as i64 + dr, col as i64 + dc);
            match boundary {
                Boundary::Bounded => {
                    if nr < 0 || nr >= h || nc < 0 || nc >= w {
                        continue;
                    }
                }
                Boundary::Toroidal => {
                    nr = nr.rem_euclid(h);
                    nc = nc.rem_euclid(w);
                }
            }
            let index = nr as usize * self.width + nc as usize;
            if index == own || seen[..distinct].contains(&index) {
                continue;
            }
            seen[distinct] = index;
            distinct += 1;
            if self.cells[index] {
                count += 1;
            }
        }
        count
    }

    /// Grid of the same shape where each cell is `f(row, col, alive)`.
    pub fn map<F>(&self, mut f: F) -> LifeGrid
    where
        F: FnMut(usize, usize, bool) -> bool,
    {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &alive)| f(i / self.width, i % self.width, alive))
            .collect();
        LifeGrid {
            height: self.height,
            width: self.width,
            cells,
        }
    }

    /// Alive state of every cell in one row.
    pub fn row(&self, row: i64) -> Result<&[bool]> {
        let start = self.index(row, 0)?;
        Ok(&self.cells[start..start + self.width])
    }

    pub fn column(&self, col: i64) -> Result<Vec<bool>> {
        self.index(0, col)?;
        Ok(self.rows().map(|row| row[col as usize]).collect())
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Coordinates of all alive cells, row-major.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.width, i % self.width))
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn index(&self, row: i64, col: i64) -> Result<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row as usize * self.width + col as usize)
    }
}

/// 0/1 matrix, one row per line
impl fmt::Display for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "({}x{} grid)", self.height, self.width)?;
        for row in self.rows() {
            let line: Vec<&str> = row.iter().map(|&alive| if alive { "1" } else { "0" }).collect();
            writeln!(f, "[{}]", line.join(" "))?;
        }
        Ok(())
    }
}
