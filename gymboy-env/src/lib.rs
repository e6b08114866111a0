//! Game Boy titles as reinforcement learning environments.
//!
//! Supported titles are Pokemon Red, Blue, Yellow, Gold and Silver, Super Mario Land,
//! Tetris and Kirby's Dream Land. Each title is observed through one of three
//! encodings, which gives the registered ids, e.g. `Tetris-flatten-v1` or
//! `Pokemon-Gold-minimal-image-v1` (see [`registered_envs()`]).
//!
//! The environment reads the game state out of the emulator's memory. It depends on a
//! backend implementing [`Emulator`]; [`util::test::MemoryEmulator`] is a headless
//! backend without a CPU, useful for tests.
//!
//! ROMs and save states are looked up under the directory specified by environment
//! variable `GYMBOY_RESOURCE_DIR`:
//!
//! ```bash
//! $GYMBOY_RESOURCE_DIR/roms/tetris/tetris/tetris.gb
//! $GYMBOY_RESOURCE_DIR/states/tetris/tetris/tetris_9.state
//! ```
//!
//! Here is an example of evaluating a random policy on Tetris.
//!
//! ```no_run
//! use anyhow::Result;
//! use gymboy_core::{DefaultEvaluator, Evaluator as _};
//! use gymboy_env::{
//!     util::test::{MemoryEmulator, RandomPolicy},
//!     GymboyEnv, GymboyEnvConfig,
//! };
//!
//! fn main() -> Result<()> {
//! #     env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
//!     let env_config = GymboyEnvConfig::default()
//!         .env_id("Tetris-flatten-v1")
//!         .n_frameskip(30);
//!     let mut policy = RandomPolicy::new(42);
//!
//!     let record = DefaultEvaluator::<GymboyEnv<MemoryEmulator>>::new(&env_config, 0, 5)?
//!         .max_steps(1000)
//!         .evaluate(&mut policy)?;
//!     println!("{:?}", record.get_scalar("Episode return")?);
//!
//!     Ok(())
//! }
//! ```
mod act;
pub mod binary;
pub mod emulator;
mod env;
mod error;
pub mod memory;
pub mod moves;
mod obs;
mod registry;
pub mod reward;
pub mod space;
pub mod title;
pub mod util;
mod vec_env;
pub use act::{GymboyAct, GymboyAction, N_ACTIONS};
pub use emulator::{Button, Emulator, EmulatorConfig, GameArea};
pub use env::{
    check_cartridge_title, check_frameskip, check_rom_file, check_state_file, EpisodeState,
    GymboyEnv, GymboyEnvConfig, GymboyInfo, InitState, RenderMode,
};
pub use error::GymboyError;
pub use obs::{rgba_to_rgb, GymboyObs, ObsEncoding, ObservationEncoder};
pub use registry::{lookup, make, make_vec, registered_envs, EnvSpec};
pub use vec_env::SyncVecEnv;
