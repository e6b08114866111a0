//! Validation of the inputs of an environment.
use crate::error::GymboyError;
use std::path::Path;

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| extensions.contains(&e))
}

/// The ROM must be an existing `.gb` or `.gbc` file.
pub fn check_rom_file(path: &Path) -> Result<(), GymboyError> {
    if !has_extension(path, &["gb", "gbc"]) {
        return Err(GymboyError::InvalidRomFile(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(GymboyError::RomNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// The save state must be an existing `.state` file.
pub fn check_state_file(path: &Path) -> Result<(), GymboyError> {
    if !has_extension(path, &["state"]) {
        return Err(GymboyError::InvalidStateFile(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(GymboyError::StateNotFound(path.to_path_buf()));
    }
    Ok(())
}

pub fn check_frameskip(n_frameskip: usize) -> Result<(), GymboyError> {
    if n_frameskip == 0 {
        return Err(GymboyError::InvalidFrameskip(n_frameskip));
    }
    Ok(())
}

pub fn check_cartridge_title(actual: &str, expected: &str) -> Result<(), GymboyError> {
    if actual != expected {
        return Err(GymboyError::CartridgeMismatch {
            actual: actual.to_string(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}
