//! Environment state machine driving an [`Emulator`].
mod check;
mod config;
use crate::{
    act::{GymboyAct, GymboyAction, N_ACTIONS},
    emulator::{Emulator, EmulatorConfig},
    error::GymboyError,
    memory::StateSnapshot,
    obs::{rgba_to_rgb, GymboyObs, ObservationEncoder},
    registry::{lookup, EnvSpec},
    reward::{RewardCalculator, Termination},
    space::{ActionSpace, ObservationSpace},
    title::TitleSpec,
};
use anyhow::Result;
pub use check::{check_cartridge_title, check_frameskip, check_rom_file, check_state_file};
pub use config::{GymboyEnvConfig, InitState, RenderMode};
use gymboy_core::{record::Record, Env, Info, Step};
use log::{debug, info, trace, warn};
use ndarray::Array3;
use std::path::PathBuf;

/// Empty struct, steps carry no extra information.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GymboyInfo;

impl Info for GymboyInfo {}

/// Lifecycle of an episode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EpisodeState {
    /// Built, but never reset.
    Uninitialized,
    /// An episode is running.
    Ready,
    /// The episode ended in game. Only `reset` is meaningful.
    Terminated,
}

/// A Game Boy title as an environment.
///
/// Every step presses at most one button, advances the emulator by `n_frameskip`
/// frames (one frame when rendering for humans), decodes a snapshot of the memory and
/// derives the observation, the reward and the termination flag from it.
/// `is_truncated` is always false, time limits are left to the caller.
pub struct GymboyEnv<E: Emulator> {
    spec: &'static EnvSpec,
    title: TitleSpec,
    emulator: E,

    // `None` restarts the game at every reset
    init_state: Option<PathBuf>,
    n_frameskip: usize,
    render_mode: Option<RenderMode>,

    encoder: ObservationEncoder,
    reward: RewardCalculator,
    termination: Termination,

    state: EpisodeState,
    initial_seed: Option<i64>,
    closed: bool,
}

impl<E: Emulator> GymboyEnv<E> {
    fn snapshot(&self) -> StateSnapshot {
        self.title
            .memory_map
            .extract(&self.emulator, &self.title.game_area)
    }

    fn check_cartridge(&self) -> Result<(), GymboyError> {
        check_cartridge_title(&self.emulator.cartridge_title(), self.title.cartridge_title)
    }

    /// The registry entry the environment was built from.
    pub fn spec(&self) -> &'static EnvSpec {
        self.spec
    }

    /// The title description.
    pub fn title(&self) -> &TitleSpec {
        &self.title
    }

    pub fn observation_space(&self) -> ObservationSpace {
        self.spec.observation_space()
    }

    pub fn action_space(&self) -> ActionSpace {
        self.spec.action_space()
    }

    /// Lifecycle state of the current episode.
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// Number of frames advanced per step.
    pub fn n_frameskip(&self) -> usize {
        self.n_frameskip
    }

    pub fn emulator(&self) -> &E {
        &self.emulator
    }

    pub fn emulator_mut(&mut self) -> &mut E {
        &mut self.emulator
    }

    /// The current screen as RGB in `rgb_array` mode, `None` otherwise.
    pub fn render(&self) -> Result<Option<Array3<u8>>> {
        match self.render_mode {
            Some(RenderMode::RgbArray) => Ok(Some(rgba_to_rgb(&self.emulator.screen())?)),
            _ => Ok(None),
        }
    }

    /// Stops the emulator. Calling it again does nothing.
    pub fn close(&mut self) {
        if !self.closed {
            info!("Close {}", self.spec.id);
            self.emulator.stop();
            self.closed = true;
        }
    }
}

impl<E: Emulator> Drop for GymboyEnv<E> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<E: Emulator> Env for GymboyEnv<E> {
    type Config = GymboyEnvConfig;
    type Obs = GymboyObs;
    type Act = GymboyAct;
    type Info = GymboyInfo;

    /// Validates the configuration, loads the ROM and checks the cartridge title.
    ///
    /// `seed` seeds the first reset that does not pass a seed of its own.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        let spec = lookup(&config.env_id)?;
        let title = spec.title.spec();

        check_frameskip(config.n_frameskip)?;
        let rom_path = config.resolve_rom_path(&title);
        check_rom_file(&rom_path)?;
        let init_state = config.resolve_init_state_path(&title);
        if let Some(path) = init_state.as_ref() {
            check_state_file(path)?;
        }

        let human = config.render_mode == Some(RenderMode::Human);
        let emulator_config = EmulatorConfig {
            sound: config.sound,
            window: human,
            emulation_speed: if human { 1 } else { 0 },
        };
        let emulator = E::load(&rom_path, &emulator_config)?;
        check_cartridge_title(&emulator.cartridge_title(), title.cartridge_title)?;
        info!("Build {} from {:?}", spec.id, rom_path);

        let encoder = ObservationEncoder::new(spec.encoding, &title);
        let reward = RewardCalculator::new(
            title.reward_terms.clone(),
            config.reward_weights.clone(),
            title.tracked_fields(),
        );
        let termination = Termination::new(title.termination.clone());

        Ok(Self {
            spec,
            title,
            emulator,
            init_state,
            n_frameskip: if human { 1 } else { config.n_frameskip },
            render_mode: config.render_mode,
            encoder,
            reward,
            termination,
            state: EpisodeState::Uninitialized,
            initial_seed: Some(seed),
            closed: false,
        })
    }

    fn step(&mut self, act: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        match self.state {
            EpisodeState::Uninitialized => return Err(GymboyError::NotReset.into()),
            EpisodeState::Terminated => warn!("{} stepped after termination", self.spec.id),
            EpisodeState::Ready => {}
        }

        let action = GymboyAction::from_index(act.act).ok_or(GymboyError::InvalidAction {
            action: act.act,
            n: N_ACTIONS,
        })?;
        if let Some(button) = action.button() {
            self.emulator.press(button);
        }
        self.emulator.tick(self.n_frameskip);

        let snapshot = self.snapshot();
        let obs = self.encoder.encode(&snapshot, &self.emulator)?;
        let components = self.reward.components(&snapshot);
        let reward = components.total();
        let is_terminated = self
            .termination
            .is_terminated(&snapshot, self.reward.context());
        if is_terminated {
            self.state = EpisodeState::Terminated;
        }
        trace!(
            "{}: act = {:?}, reward = {}, terminated = {}",
            self.spec.id,
            action,
            reward,
            is_terminated
        );

        let step = Step::new(obs, *act, reward, is_terminated, false, GymboyInfo, None);
        Ok((step, components.to_record()))
    }

    /// Loads the initial save state (or restarts the game) and starts a new episode.
    fn reset(&mut self, seed: Option<i64>) -> Result<(Self::Obs, Self::Info)> {
        // a failed reset leaves nothing to step
        self.state = EpisodeState::Uninitialized;
        let seed = seed.or_else(|| self.initial_seed.take());
        match self.init_state.as_ref() {
            Some(path) => self.emulator.load_state(path)?,
            None => self.emulator.reset_game()?,
        }
        if let Some(seed) = seed {
            self.emulator.seed(seed);
        }
        self.check_cartridge()?;
        self.emulator.tick(1);

        let snapshot = self.snapshot();
        self.reward.reset(&snapshot);
        let obs = self.encoder.encode(&snapshot, &self.emulator)?;
        self.state = EpisodeState::Ready;
        debug!("Reset {} with seed {:?}", self.spec.id, seed);

        Ok((obs, GymboyInfo))
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        Ok(self.reset(Some(ix as i64))?.0)
    }
}
