//! Registered environment identifiers.
use crate::{
    act::N_ACTIONS,
    emulator::{Emulator, SCREEN_HEIGHT, SCREEN_WIDTH},
    env::{GymboyEnv, GymboyEnvConfig},
    error::GymboyError,
    obs::ObsEncoding,
    space::{ActionSpace, DType, ObservationSpace},
    title::Title,
    vec_env::SyncVecEnv,
};
use anyhow::Result;
use gymboy_core::Env;

// Tile identifiers of the background map never exceed this value.
const MAX_TILE_ID: f32 = 383.0;

/// A registered environment: a title observed through an encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvSpec {
    pub id: &'static str,
    pub title: Title,
    pub encoding: ObsEncoding,
}

impl EnvSpec {
    /// Shape, bounds and element type of the observations.
    pub fn observation_space(&self) -> ObservationSpace {
        match self.encoding {
            ObsEncoding::Flatten => ObservationSpace {
                shape: vec![self.title.spec().flatten_len()],
                low: f32::NEG_INFINITY,
                high: f32::INFINITY,
                dtype: DType::F32,
            },
            ObsEncoding::MinimalImage => {
                let (h, w) = self.title.spec().game_area.shape();
                ObservationSpace {
                    shape: vec![h, w],
                    low: 0.0,
                    high: MAX_TILE_ID,
                    dtype: DType::F32,
                }
            }
            ObsEncoding::FullImage => ObservationSpace {
                shape: vec![SCREEN_HEIGHT, SCREEN_WIDTH, 3],
                low: 0.0,
                high: 255.0,
                dtype: DType::U8,
            },
        }
    }

    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::Discrete(N_ACTIONS)
    }
}

macro_rules! registry {
    ($($id:literal => $title:ident, $encoding:ident;)*) => {
        static REGISTRY: &[EnvSpec] = &[
            $(EnvSpec {
                id: $id,
                title: Title::$title,
                encoding: ObsEncoding::$encoding,
            },)*
        ];
    };
}

// Sorted by id.
registry! {
    "Kirby-Dream-Land-1-flatten-v1" => KirbyDreamLand1, Flatten;
    "Kirby-Dream-Land-1-full-image-v1" => KirbyDreamLand1, FullImage;
    "Kirby-Dream-Land-1-minimal-image-v1" => KirbyDreamLand1, MinimalImage;
    "Pokemon-Blue-flatten-v1" => PokemonBlue, Flatten;
    "Pokemon-Blue-full-image-v1" => PokemonBlue, FullImage;
    "Pokemon-Blue-minimal-image-v1" => PokemonBlue, MinimalImage;
    "Pokemon-Gold-flatten-v1" => PokemonGold, Flatten;
    "Pokemon-Gold-full-image-v1" => PokemonGold, FullImage;
    "Pokemon-Gold-minimal-image-v1" => PokemonGold, MinimalImage;
    "Pokemon-Red-flatten-v1" => PokemonRed, Flatten;
    "Pokemon-Red-full-image-v1" => PokemonRed, FullImage;
    "Pokemon-Red-minimal-image-v1" => PokemonRed, MinimalImage;
    "Pokemon-Silver-flatten-v1" => PokemonSilver, Flatten;
    "Pokemon-Silver-full-image-v1" => PokemonSilver, FullImage;
    "Pokemon-Silver-minimal-image-v1" => PokemonSilver, MinimalImage;
    "Pokemon-Yellow-flatten-v1" => PokemonYellow, Flatten;
    "Pokemon-Yellow-full-image-v1" => PokemonYellow, FullImage;
    "Pokemon-Yellow-minimal-image-v1" => PokemonYellow, MinimalImage;
    "Super-Mario-Land-1-flatten-v1" => SuperMarioLand1, Flatten;
    "Super-Mario-Land-1-full-image-v1" => SuperMarioLand1, FullImage;
    "Super-Mario-Land-1-minimal-image-v1" => SuperMarioLand1, MinimalImage;
    "Tetris-flatten-v1" => Tetris, Flatten;
    "Tetris-full-image-v1" => Tetris, FullImage;
    "Tetris-minimal-image-v1" => Tetris, MinimalImage;
}

/// Every registered environment, sorted by id.
pub fn registered_envs() -> &'static [EnvSpec] {
    REGISTRY
}

/// Finds a registered environment.
pub fn lookup(env_id: &str) -> Result<&'static EnvSpec, GymboyError> {
    REGISTRY
        .binary_search_by(|spec| spec.id.cmp(env_id))
        .map(|ix| &REGISTRY[ix])
        .map_err(|_| GymboyError::UnknownEnvironment(env_id.to_string()))
}

/// Builds the environment registered as `env_id`.
///
/// `config` supplies everything but the id, which overrides its own.
pub fn make<E: Emulator>(env_id: &str, config: &GymboyEnvConfig, seed: i64) -> Result<GymboyEnv<E>> {
    lookup(env_id)?;
    GymboyEnv::build(&config.clone().env_id(env_id), seed)
}

/// Builds `num_envs` independent copies of the environment registered as `env_id`.
pub fn make_vec<E: Emulator>(
    env_id: &str,
    num_envs: usize,
    config: &GymboyEnvConfig,
    seed: i64,
) -> Result<SyncVecEnv<E>> {
    lookup(env_id)?;
    SyncVecEnv::build(&config.clone().env_id(env_id), num_envs, seed)
}
