// error.rs - Error types for grid construction, editing, parsing and rendering

use std::io;
use thiserror::Error;

/// Everything that can go wrong while building, editing or showing a grid
#[derive(Error, Debug)]
pub enum LifeError {
    /// Height or width missing, zero or negative
    #[error("invalid grid dimensions {height}x{width}: both must be positive")]
    InvalidDimension { height: i64, width: i64 },

    /// Coordinate outside the grid extent
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        height: usize,
        width: usize,
    },

    /// Configuration rows of differing width
    #[error("line {line} has {found} cells, expected {expected}")]
    InconsistentLineLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Character that is neither the alive nor the dead symbol
    #[error("unknown symbol {symbol:?} at line {line}, column {column}")]
    UnknownSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },

    /// Graphic mode requested without the plotting backend compiled in
    #[error("graphic rendering requires {0}")]
    MissingRenderingDependency(&'static str),

    #[error("alive probability {0} is not within [0, 1]")]
    InvalidProbability(f64),

    /// Alive and dead symbols must be distinct, non-whitespace characters
    #[error("invalid symbol table: alive {alive:?}, dead {dead:?}")]
    InvalidSymbolTable { alive: char, dead: char },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    /// Bad row in the bracketed 0/1 matrix format
    #[error("malformed matrix row at line {line}: {reason}")]
    MalformedMatrix { line: usize, reason: String },

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("options file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, LifeError>;
