//! Conway's Game of Life on a fixed-size grid.
//!
//! A [`LifeGrid`] is built from explicit dimensions, parsed configuration
//! text ([`codec`]) or random seeding ([`seed`]), then advanced by a
//! [`LifeEngine`] whose run loop hands every generation to a [`Renderer`].
//!
//! ```
//! use conway_life::{codec, LifeEngine};
//!
//! let blinker = codec::parse("---\n###\n---", None).unwrap();
//! let next = LifeEngine::default().step(&blinker);
//! assert_eq!(codec::serialize(&next, None), "-#-\n-#-\n-#-");
//! ```

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
#[cfg(feature = "graphic")]
pub mod graphic;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod seed;

pub use codec::SymbolTable;
pub use config::{CliArgs, ConfigSource, LifeOptions};
pub use engine::{LifeEngine, RunSummary, StopReason};
pub use error::{LifeError, Result};
pub use game::Game;
pub use grid::{Boundary, LifeGrid};
pub use render::{ConsoleRenderer, Renderer};
