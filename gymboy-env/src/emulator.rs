//! Interface to the Game Boy emulator driving an environment.
//!
//! The environment never emulates anything itself. It talks to a backend through
//! [`Emulator`]: read memory, read the screen, press a button, advance frames,
//! and load save states.
use anyhow::{bail, Result};
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{AsRefStr, Display, EnumIter};

/// Height of the Game Boy screen in pixels.
pub const SCREEN_HEIGHT: usize = 144;

/// Width of the Game Boy screen in pixels.
pub const SCREEN_WIDTH: usize = 160;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0142;

/// A button of the Game Boy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Button {
    A,
    B,
    Left,
    Right,
    Up,
    Down,
    Start,
    Select,
}

/// Rectangle of the background tile map exposed as the tile grid, in tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameArea {
    /// Column of the top-left tile.
    pub x: usize,
    /// Row of the top-left tile.
    pub y: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GameArea {
    /// Shape of the tile grid, `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of tiles in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }
}

/// Settings passed to the emulator backend when loading a ROM.
#[derive(Clone, Debug, PartialEq)]
pub struct EmulatorConfig {
    /// Emulates audio.
    pub sound: bool,
    /// Opens a window showing the screen.
    pub window: bool,
    /// 0 runs unbounded, 1 runs in real time.
    pub emulation_speed: u32,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            sound: false,
            window: false,
            emulation_speed: 0,
        }
    }
}

/// A Game Boy emulator backend.
///
/// An environment owns its emulator exclusively; nothing is shared between instances.
pub trait Emulator {
    /// Loads a ROM image.
    fn load(rom_path: &Path, config: &EmulatorConfig) -> Result<Self>
    where
        Self: Sized;

    /// Title stored in the cartridge header.
    fn cartridge_title(&self) -> String;

    /// Reads a byte of the address space.
    fn read_memory(&self, addr: u16) -> u8;

    /// Reads `len` consecutive bytes starting at `addr`.
    fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.read_memory(addr.wrapping_add(i as u16)))
            .collect()
    }

    /// Tile identifiers of the background inside `area`, shaped `(height, width)`.
    fn game_area(&self, area: &GameArea) -> Array2<u32>;

    /// Current frame as RGBA, shaped `(144, 160, 4)`.
    fn screen(&self) -> Array3<u8>;

    /// Presses and releases a button over the next frame.
    fn press(&mut self, button: Button);

    /// Advances the emulation by `frames` frames.
    fn tick(&mut self, frames: usize);

    /// Restores a save state.
    fn load_state(&mut self, path: &Path) -> Result<()>;

    /// Restarts the game from power-on.
    fn reset_game(&mut self) -> Result<()>;

    /// Seeds the emulator's source of in-game randomness.
    fn seed(&mut self, seed: i64);

    /// Stops the emulation and releases its resources.
    fn stop(&mut self);
}

/// Decodes the title stored in the header of a ROM image.
///
/// The title is the NUL-terminated ASCII text at `0x0134..0x0142`.
pub fn cartridge_title(rom: &[u8]) -> Result<String> {
    if rom.len() < TITLE_END {
        bail!("ROM image too small for a cartridge header: {} bytes", rom.len());
    }
    let title = rom[TITLE_START..TITLE_END]
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect();
    Ok(title)
}
