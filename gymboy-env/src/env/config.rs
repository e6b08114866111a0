//! Configuration of [`GymboyEnv`](super::GymboyEnv).
//!
//! ROMs and save states default to files under a resource directory. If the
//! environment variable `GYMBOY_RESOURCE_DIR` exists, it is used as that directory,
//! otherwise `gymboy` under the user data directory.
use crate::{
    reward::{RewardComponent, RewardWeights},
    title::TitleSpec,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    env,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Where an episode starts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum InitState {
    /// The save state shipped for the title, past its intro.
    Packaged,
    /// A save state file.
    Path(PathBuf),
    /// No save state, the game restarts from power-on.
    FreshGame,
}

/// How the game is shown.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// A real-time window, one frame per step.
    Human,
    /// Headless, with [`GymboyEnv::render()`](super::GymboyEnv::render) returning the screen.
    RgbArray,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
/// Configurations of [`GymboyEnv`](super::GymboyEnv).
pub struct GymboyEnvConfig {
    pub(super) env_id: String,
    pub(super) resource_dir: PathBuf,
    pub(super) rom_path: Option<PathBuf>,
    pub(super) init_state: InitState,
    pub(super) n_frameskip: usize,
    pub(super) sound: bool,
    pub(super) render_mode: Option<RenderMode>,
    pub(super) reward_weights: RewardWeights,
}

impl Default for GymboyEnvConfig {
    fn default() -> Self {
        let resource_dir = if let Ok(var) = env::var("GYMBOY_RESOURCE_DIR") {
            PathBuf::from(var)
        } else {
            dirs::data_dir()
                .map(|d| d.join("gymboy"))
                .unwrap_or_else(|| PathBuf::from("resources"))
        };

        Self {
            env_id: "".to_string(),
            resource_dir,
            rom_path: None,
            init_state: InitState::Packaged,
            n_frameskip: 60,
            sound: false,
            render_mode: None,
            reward_weights: RewardWeights::default(),
        }
    }
}

impl GymboyEnvConfig {
    /// Sets the environment id, e.g. `Tetris-flatten-v1`.
    pub fn env_id(mut self, env_id: impl Into<String>) -> Self {
        self.env_id = env_id.into();
        self
    }

    /// Sets the directory holding the packaged ROMs and save states.
    pub fn resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    /// Sets the ROM file.
    pub fn rom_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rom_path = Some(path.into());
        self
    }

    /// Starts every episode from the given save state.
    pub fn init_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.init_state = InitState::Path(path.into());
        self
    }

    /// Sets where episodes start.
    pub fn init_state(mut self, init_state: InitState) -> Self {
        self.init_state = init_state;
        self
    }

    /// Sets the number of frames advanced per step.
    pub fn n_frameskip(mut self, v: usize) -> Self {
        self.n_frameskip = v;
        self
    }

    /// Enables audio emulation.
    pub fn sound(mut self, v: bool) -> Self {
        self.sound = v;
        self
    }

    /// Sets the render mode.
    pub fn render_mode(mut self, mode: Option<RenderMode>) -> Self {
        self.render_mode = mode;
        self
    }

    /// Overrides the weight of a reward component.
    pub fn reward_weight(mut self, component: RewardComponent, weight: f32) -> Self {
        self.reward_weights = self.reward_weights.set(component, weight);
        self
    }

    /// Returns the environment id.
    pub fn get_env_id(&self) -> &str {
        &self.env_id
    }

    /// ROM file used for the title.
    pub fn resolve_rom_path(&self, title: &TitleSpec) -> PathBuf {
        match self.rom_path.as_ref() {
            Some(path) => path.clone(),
            None => self.resource_dir.join(title.default_rom),
        }
    }

    /// Save state loaded at reset, `None` for a fresh game.
    pub fn resolve_init_state_path(&self, title: &TitleSpec) -> Option<PathBuf> {
        match &self.init_state {
            InitState::Packaged => Some(self.resource_dir.join(title.default_state)),
            InitState::Path(path) => Some(path.clone()),
            InitState::FreshGame => None,
        }
    }

    /// Constructs [`GymboyEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GymboyEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
