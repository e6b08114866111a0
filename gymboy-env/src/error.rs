//! Errors raised by gymboy environments.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by gymboy environments.
///
/// Every variant is fatal for the call that raised it; nothing is retried internally.
/// Failures of the emulator itself are not wrapped and propagate as they are.
#[derive(Error, Debug, PartialEq)]
pub enum GymboyError {
    /// The ROM file does not have a `.gb` or `.gbc` extension.
    #[error("Unknown ROM file extension, expected .gb or .gbc: {0:?}")]
    InvalidRomFile(PathBuf),

    /// The ROM file does not exist.
    #[error("ROM file not found: {0:?}")]
    RomNotFound(PathBuf),

    /// The save state file does not have a `.state` extension.
    #[error("Unknown state file extension, expected .state: {0:?}")]
    InvalidStateFile(PathBuf),

    /// The save state file does not exist.
    #[error("State file not found: {0:?}")]
    StateNotFound(PathBuf),

    /// The number of frames advanced per step is zero.
    #[error("n_frameskip must be positive, got {0}")]
    InvalidFrameskip(usize),

    /// The loaded cartridge is not the title the environment was built for.
    #[error("Cartridge mismatch, got '{actual}', expected '{expected}'")]
    CartridgeMismatch {
        /// Title read from the cartridge header.
        actual: String,
        /// Title expected by the environment.
        expected: String,
    },

    /// The action is outside of the discrete action space.
    #[error("Invalid action {action}, expected a value in 0..{n}")]
    InvalidAction {
        /// The rejected action.
        action: u8,
        /// The number of actions.
        n: usize,
    },

    /// No environment is registered under the identifier.
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// `step()` was called before the first `reset()`.
    #[error("Environment must be reset before stepping")]
    NotReset,

    /// A vectorized environment needs at least one environment.
    #[error("num_envs must be positive, got {0}")]
    InvalidNumEnvs(usize),

    /// The number of actions does not match the number of environments.
    #[error("Expected {expected} actions, got {actual}")]
    ActionBatchMismatch {
        /// Number of actions passed.
        actual: usize,
        /// Number of environments.
        expected: usize,
    },
}
