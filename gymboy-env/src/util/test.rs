//! Utilities for test.
//!
//! [`MemoryEmulator`] is a backend without a CPU: memory only changes when written
//! by a test or loaded from a save state, which is enough to drive an environment
//! through known game situations.
use crate::{
    act::{GymboyAct, N_ACTIONS},
    emulator::{cartridge_title, Button, Emulator, EmulatorConfig, GameArea, SCREEN_HEIGHT, SCREEN_WIDTH},
    env::{GymboyEnv, GymboyEnvConfig, InitState},
    obs::GymboyObs,
};
use anyhow::{bail, Result};
use gymboy_core::Policy;
use ndarray::{Array2, Array3};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub type Env = GymboyEnv<MemoryEmulator>;

const MEMORY_SIZE: usize = 0x10000;
const TILE_MAP: usize = 0x9800;
const TILE_MAP_WIDTH: usize = 32;
const ROM_SIZE: usize = 0x8000;

/// An emulator backed by a flat 64KiB address space.
pub struct MemoryEmulator {
    memory: Vec<u8>,
    title: String,
    config: EmulatorConfig,
    ticks: usize,
    pressed: Vec<Button>,
    seed: Option<i64>,
    stops: usize,
}

impl MemoryEmulator {
    /// An emulator with zeroed memory reporting `title` as its cartridge title.
    pub fn with_title(title: &str) -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE],
            title: title.to_string(),
            config: EmulatorConfig::default(),
            ticks: 0,
            pressed: vec![],
            seed: None,
            stops: 0,
        }
    }

    /// Writes bytes starting at `addr`.
    pub fn write(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// Replaces the cartridge title, as if another cartridge was inserted.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Frames advanced since the ROM was loaded.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Buttons pressed since the ROM was loaded, in order.
    pub fn pressed(&self) -> &[Button] {
        &self.pressed
    }

    pub fn last_seed(&self) -> Option<i64> {
        self.seed
    }

    /// Number of times [`Emulator::stop`] was called.
    pub fn stop_count(&self) -> usize {
        self.stops
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    fn tile(&self, row: usize, col: usize) -> u8 {
        let row = row % TILE_MAP_WIDTH;
        let col = col % TILE_MAP_WIDTH;
        self.memory[TILE_MAP + row * TILE_MAP_WIDTH + col]
    }
}

impl Emulator for MemoryEmulator {
    fn load(rom_path: &Path, config: &EmulatorConfig) -> Result<Self> {
        let rom = fs::read(rom_path)?;
        let mut emu = Self::with_title(&cartridge_title(&rom)?);
        emu.config = config.clone();
        Ok(emu)
    }

    fn cartridge_title(&self) -> String {
        self.title.clone()
    }

    fn read_memory(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn game_area(&self, area: &GameArea) -> Array2<u32> {
        Array2::from_shape_fn(area.shape(), |(r, c)| {
            self.tile(area.y + r, area.x + c) as u32
        })
    }

    // Every pixel takes the gray level of the tile identifier under it.
    fn screen(&self) -> Array3<u8> {
        Array3::from_shape_fn((SCREEN_HEIGHT, SCREEN_WIDTH, 4), |(y, x, ch)| {
            if ch == 3 {
                255
            } else {
                self.tile(y / 8, x / 8)
            }
        })
    }

    fn press(&mut self, button: Button) {
        self.pressed.push(button);
    }

    fn tick(&mut self, frames: usize) {
        self.ticks += frames;
    }

    fn load_state(&mut self, path: &Path) -> Result<()> {
        let state = fs::read(path)?;
        if state.len() != MEMORY_SIZE {
            bail!("Save state {:?} holds {} bytes, expected {}", path, state.len(), MEMORY_SIZE);
        }
        self.memory = state;
        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.memory.iter_mut().for_each(|b| *b = 0);
        Ok(())
    }

    fn seed(&mut self, seed: i64) {
        self.seed = Some(seed);
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

/// Writes a ROM image whose header carries `title`.
pub fn write_rom(dir: &Path, file_name: &str, title: &str) -> Result<PathBuf> {
    let mut rom = vec![0u8; ROM_SIZE];
    let bytes = title.as_bytes();
    rom[0x0134..0x0134 + bytes.len()].copy_from_slice(bytes);
    let path = dir.join(file_name);
    fs::write(&path, rom)?;
    Ok(path)
}

/// Writes a save state of zeroed memory patched with `(address, bytes)` pairs.
pub fn write_state(dir: &Path, file_name: &str, patches: &[(u16, &[u8])]) -> Result<PathBuf> {
    let mut state = vec![0u8; MEMORY_SIZE];
    for (addr, bytes) in patches.iter() {
        let start = *addr as usize;
        state[start..start + bytes.len()].copy_from_slice(bytes);
    }
    let path = dir.join(file_name);
    fs::write(&path, state)?;
    Ok(path)
}

/// Configuration loading `rom`, starting from `state` or from a fresh game.
pub fn env_config(env_id: &str, rom: &Path, state: Option<&Path>) -> GymboyEnvConfig {
    let init_state = match state {
        Some(path) => InitState::Path(path.to_path_buf()),
        None => InitState::FreshGame,
    };
    GymboyEnvConfig::default()
        .env_id(env_id)
        .rom_path(rom)
        .init_state(init_state)
}

/// Samples actions uniformly.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy<Env> for RandomPolicy {
    fn sample(&mut self, _: &GymboyObs) -> GymboyAct {
        GymboyAct::new(self.rng.u8(..N_ACTIONS as u8))
    }
}
