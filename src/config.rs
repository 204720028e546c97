//! Construction options for a game
//!
//! Options come from three places, later ones winning:
//! - built-in defaults
//! - a TOML options file (`--options FILE`)
//! - command-line flags
//!
//! [`LifeOptions::validate`] runs once before any grid is built. When a
//! `config` source yields a grid, its dimensions override `height`/`width`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::codec::{self, SymbolTable, DEFAULT_ALIVE, DEFAULT_DEAD};
use crate::error::{LifeError, Result};
use crate::grid::{Boundary, LifeGrid};
use crate::patterns;
use crate::seed::{self, DEFAULT_ALIVE_PROBABILITY};

/// `config` value requesting a random grid instead of parsed text
pub const RANDOM_SENTINEL: &str = "__random__";

pub const DEFAULT_DELAY_MS: u64 = 100;

/// CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "conway_life")]
#[command(version)]
#[command(about = "Conway's Game of Life in the terminal or a window", long_about = None)]
pub struct CliArgs {
    /// TOML file with default options
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Grid height in cells
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Grid width in cells
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Starting grid: a config file path, or __random__
    #[arg(short, long, value_name = "SOURCE")]
    pub config: Option<String>,

    /// Character marking an alive cell in the config file
    #[arg(long, requires = "dead_symbol")]
    pub alive_symbol: Option<char>,

    /// Character marking a dead cell in the config file
    #[arg(long, requires = "alive_symbol")]
    pub dead_symbol: Option<char>,

    /// Character drawn for alive cells in the console
    #[arg(long)]
    pub alive_char: Option<char>,

    /// Character drawn for dead cells in the console
    #[arg(long)]
    pub dead_char: Option<char>,

    /// Show the simulation in a window
    #[arg(short, long)]
    pub graphic: bool,

    /// Edge policy
    #[arg(long, value_enum, ignore_case = true, value_name = "POLICY")]
    pub boundary: Option<Boundary>,

    /// Pause between generations in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Stop after this many generations
    #[arg(short = 'n', long)]
    pub max_steps: Option<u64>,

    /// Seed for __random__ grids
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chance that a random cell starts alive
    #[arg(long, value_name = "P")]
    pub probability: Option<f64>,

    /// Built-in pattern to place in the middle of the grid
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Print the built-in pattern names and exit
    #[arg(long)]
    pub list_patterns: bool,
}

/// Where the starting grid comes from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ConfigSource {
    Random,
    Inline(String),
    File(PathBuf),
}

impl From<String> for ConfigSource {
    fn from(value: String) -> Self {
        if value == RANDOM_SENTINEL {
            ConfigSource::Random
        } else if value.contains('\n') {
            ConfigSource::Inline(value)
        } else {
            ConfigSource::File(PathBuf::from(value))
        }
    }
}

impl From<&str> for ConfigSource {
    fn from(value: &str) -> Self {
        ConfigSource::from(value.to_string())
    }
}

/// Everything needed to build a game
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifeOptions {
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub config: Option<ConfigSource>,
    /// Symbols used to parse `config` text
    pub custom_config: Option<SymbolTable>,
    /// Display-only characters for the console view
    pub alive_char: Option<char>,
    pub dead_char: Option<char>,
    pub graphic: bool,
    pub boundary: Boundary,
    pub delay_ms: u64,
    pub max_steps: Option<u64>,
    pub seed: Option<u64>,
    pub alive_probability: f64,
    pub pattern: Option<String>,
}

impl Default for LifeOptions {
    fn default() -> Self {
        Self {
            height: None,
            width: None,
            config: None,
            custom_config: None,
            alive_char: None,
            dead_char: None,
            graphic: false,
            boundary: Boundary::default(),
            delay_ms: DEFAULT_DELAY_MS,
            max_steps: None,
            seed: None,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            pattern: None,
        }
    }
}

impl LifeOptions {
    pub fn with_size(height: i64, width: i64) -> Self {
        Self {
            height: Some(height),
            width: Some(width),
            ..Default::default()
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let options: LifeOptions = toml::from_str(&content)?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Options file (if any) overlaid with CLI flags, then validated.
    pub fn load_with_args(args: &CliArgs) -> Result<Self> {
        let mut options = match &args.options {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        options.apply_args(args)?;
        options.validate()?;
        Ok(options)
    }

    fn apply_args(&mut self, args: &CliArgs) -> Result<()> {
        if let Some(height) = args.height {
            self.height = Some(height);
        }
        if let Some(width) = args.width {
            self.width = Some(width);
        }
        if let Some(config) = &args.config {
            self.config = Some(ConfigSource::from(config.as_str()));
        }
        if let (Some(alive), Some(dead)) = (args.alive_symbol, args.dead_symbol) {
            self.custom_config = Some(SymbolTable { alive, dead });
        }
        if args.alive_char.is_some() {
            self.alive_char = args.alive_char;
        }
        if args.dead_char.is_some() {
            self.dead_char = args.dead_char;
        }
        if args.graphic {
            self.graphic = true;
        }
        if let Some(boundary) = args.boundary {
            self.boundary = boundary;
        }
        if let Some(delay_ms) = args.delay_ms {
            self.delay_ms = delay_ms;
        }
        if args.max_steps.is_some() {
            self.max_steps = args.max_steps;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(probability) = args.probability {
            self.alive_probability = probability;
        }
        if args.pattern.is_some() {
            self.pattern = args.pattern.clone();
        }
        Ok(())
    }

    /// Checks the options without building anything.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.config, Some(ConfigSource::File(_)) | Some(ConfigSource::Inline(_))) {
            self.explicit_dimensions()?;
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(LifeError::InvalidProbability(self.alive_probability));
        }
        if let Some(symbols) = &self.custom_config {
            symbols.validate()?;
        }
        if let Some(name) = &self.pattern {
            if self.config.is_some() {
                return Err(LifeError::InvalidOptions(
                    "`pattern` and `config` cannot be combined".to_string(),
                ));
            }
            patterns::find(name)?;
        }
        Ok(())
    }

    /// Characters used by the console view.
    pub fn display_chars(&self) -> (char, char) {
        (
            self.alive_char.unwrap_or(DEFAULT_ALIVE),
            self.dead_char.unwrap_or(DEFAULT_DEAD),
        )
    }

    /// Builds the starting grid described by these options.
    pub fn build_grid(&self) -> Result<LifeGrid> {
        self.validate()?;
        match &self.config {
            Some(ConfigSource::Random) => {
                let (height, width) = self.explicit_dimensions()?;
                match self.seed {
                    Some(seed) => seed::generate_seeded(height, width, self.alive_probability, seed),
                    None => seed::generate(height, width, self.alive_probability),
                }
            }
            Some(ConfigSource::Inline(text)) => self.parse_config(text),
            Some(ConfigSource::File(path)) => match fs::read_to_string(path) {
                Ok(text) => {
                    log::info!("loading configuration from {}", path.display());
                    self.parse_config(&text)
                }
                // A one-line value like `#-#` names no file but is valid config text
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    let text = path.to_string_lossy();
                    match self.parse_config(&text) {
                        Ok(grid) => {
                            log::debug!("no file {:?}, using it as configuration text", text);
                            Ok(grid)
                        }
                        Err(_) => Err(e.into()),
                    }
                }
                Err(e) => Err(e.into()),
            },
            None => {
                let (height, width) = self.explicit_dimensions()?;
                let mut grid = LifeGrid::new(height, width)?;
                if let Some(name) = &self.pattern {
                    let pattern = patterns::find(name)?;
                    let origin = pattern.centered_origin(&grid);
                    pattern.stamp(&mut grid, origin)?;
                }
                Ok(grid)
            }
        }
    }

    fn parse_config(&self, text: &str) -> Result<LifeGrid> {
        let grid = if codec::is_matrix(text) {
            codec::parse_matrix(text)?
        } else {
            codec::parse(text, self.custom_config.as_ref())?
        };

        let parsed = (grid.height() as i64, grid.width() as i64);
        if let (Some(height), Some(width)) = (self.height, self.width) {
            if (height, width) != parsed {
                log::warn!(
                    "configured size {}x{} ignored, configuration is {}x{}",
                    height,
                    width,
                    parsed.0,
                    parsed.1
                );
            }
        }
        Ok(grid)
    }

    fn explicit_dimensions(&self) -> Result<(i64, i64)> {
        match (self.height, self.width) {
            (Some(height), Some(width)) if height > 0 && width > 0 => Ok((height, width)),
            (height, width) => Err(LifeError::InvalidDimension {
                height: height.unwrap_or(0),
                width: width.unwrap_or(0),
            }),
        }
    }
}
