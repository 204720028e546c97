// codec.rs - Text encodings of a LifeGrid: two-symbol config text, 0/1 matrix, console view

use serde::Deserialize;

use crate::error::{LifeError, Result};
use crate::grid::LifeGrid;

pub const DEFAULT_ALIVE: char = '#';
pub const DEFAULT_DEAD: char = '-';

/// Which literal character encodes each state in configuration text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SymbolTable {
    pub alive: char,
    pub dead: char,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            alive: DEFAULT_ALIVE,
            dead: DEFAULT_DEAD,
        }
    }
}

impl SymbolTable {
    pub fn new(alive: char, dead: char) -> Result<Self> {
        let table = Self { alive, dead };
        table.validate()?;
        Ok(table)
    }

    /// Symbols must differ and cannot be line terminators. Whitespace is
    /// allowed; it is then a cell rather than a separator.
    pub fn validate(&self) -> Result<()> {
        let terminator = |c: char| c == '\n' || c == '\r';
        if self.alive == self.dead || terminator(self.alive) || terminator(self.dead) {
            return Err(LifeError::InvalidSymbolTable {
                alive: self.alive,
                dead: self.dead,
            });
        }
        Ok(())
    }

    fn contains(&self, c: char) -> bool {
        c == self.alive || c == self.dead
    }

    fn decode(&self, symbol: char) -> Option<bool> {
        match symbol {
            s if s == self.alive => Some(true),
            s if s == self.dead => Some(false),
            _ => None,
        }
    }

    fn encode(&self, alive: bool) -> char {
        if alive { self.alive } else { self.dead }
    }
}

/// Parses configuration text into a grid.
///
/// Whitespace that is not one of the two symbols is ignored, and lines left
/// with no characters are skipped, so the width is the number of symbols on
/// each line.
pub fn parse(text: &str, symbols: Option<&SymbolTable>) -> Result<LifeGrid> {
    let symbols = symbols.copied().unwrap_or_default();
    symbols.validate()?;

    let mut rows: Vec<Vec<bool>> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut row = Vec::new();
        let cells = line.chars().filter(|&c| symbols.contains(c) || !c.is_whitespace());
        for (column, symbol) in cells.enumerate() {
            let alive = symbols.decode(symbol).ok_or(LifeError::UnknownSymbol {
                line: line_no,
                column: column + 1,
                symbol,
            })?;
            row.push(alive);
        }
        if row.is_empty() {
            continue;
        }
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(LifeError::InconsistentLineLength {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    LifeGrid::from_rows(rows)
}

/// Inverse of [`parse`]: one line per row, no separators.
pub fn serialize(grid: &LifeGrid, symbols: Option<&SymbolTable>) -> String {
    let symbols = symbols.copied().unwrap_or_default();
    grid.rows()
        .map(|row| row.iter().map(|&alive| symbols.encode(alive)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Console rendering: one line per row, cells separated by a space.
pub fn render(grid: &LifeGrid, alive_char: char, dead_char: char) -> String {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|&alive| if alive { alive_char.to_string() } else { dead_char.to_string() })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when the text looks like the bracketed 0/1 matrix format.
pub fn is_matrix(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with('['))
}

/// Parses the matrix format, one bracketed list of 0/1 per line: `[0, 1, 1]`.
pub fn parse_matrix(text: &str) -> Result<LifeGrid> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let values: Vec<u8> = serde_json::from_str(line).map_err(|e| LifeError::MalformedMatrix {
            line: index + 1,
            reason: e.to_string(),
        })?;
        let row = values
            .into_iter()
            .map(|v| match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(LifeError::MalformedMatrix {
                    line: index + 1,
                    reason: format!("cell value {other} is not 0 or 1"),
                }),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }
    LifeGrid::from_rows(rows)
}
