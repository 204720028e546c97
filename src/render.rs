// render.rs - Presentation of each generation: console output and the graphic capability check

use std::io::{self, Write};

use crate::codec;
use crate::error::{LifeError, Result};
use crate::grid::LifeGrid;

/// Receives the grid once per generation
pub trait Renderer {
    fn present(&mut self, generation: u64, grid: &LifeGrid) -> Result<()>;
}

impl<F> Renderer for F
where
    F: FnMut(u64, &LifeGrid) -> Result<()>,
{
    fn present(&mut self, generation: u64, grid: &LifeGrid) -> Result<()> {
        self(generation, grid)
    }
}

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Prints `Generation [n]` followed by the space-separated view
pub struct ConsoleRenderer<W: Write> {
    out: W,
    alive_char: char,
    dead_char: char,
    clear: bool,
}

impl ConsoleRenderer<io::Stdout> {
    /// Renderer for the terminal; clears the screen between generations.
    pub fn stdout(alive_char: char, dead_char: char) -> Self {
        enable_ansi();
        Self::new(io::stdout(), alive_char, dead_char).clear_screen(true)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, alive_char: char, dead_char: char) -> Self {
        Self {
            out,
            alive_char,
            dead_char,
            clear: false,
        }
    }

    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn present(&mut self, generation: u64, grid: &LifeGrid) -> Result<()> {
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        writeln!(self.out, "Generation [{generation}]")?;
        writeln!(self.out, "{}", codec::render(grid, self.alive_char, self.dead_char))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Turns on VT escape processing so the clear sequence works in cmd.exe
#[cfg(target_os = "windows")]
fn enable_ansi() {
    use winapi::um::consoleapi::{GetConsoleMode, SetConsoleMode};
    use winapi::um::processenv::GetStdHandle;
    use winapi::um::winbase::STD_OUTPUT_HANDLE;
    use winapi::um::wincon::ENABLE_VIRTUAL_TERMINAL_PROCESSING;

    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        let mut mode = 0;
        if GetConsoleMode(handle, &mut mode) != 0 {
            SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING);
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn enable_ansi() {}

/// Whether the windowed plot was compiled in
pub fn graphic_available() -> bool {
    cfg!(feature = "graphic")
}

/// Fails with `MissingRenderingDependency` when the window backend is absent.
pub fn require_graphic() -> Result<()> {
    check_graphic(graphic_available())
}

fn check_graphic(available: bool) -> Result<()> {
    if available {
        Ok(())
    } else {
        Err(LifeError::MissingRenderingDependency(
            "the `graphic` cargo feature (eframe/egui window backend)",
        ))
    }
}
