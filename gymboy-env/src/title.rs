//! Supported titles and their declarative descriptions.
use crate::{
    emulator::GameArea,
    memory::MemoryMap,
    reward::{Predicate, RewardTerm},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
mod kirby;
mod mario;
mod pokemon_gen1;
mod pokemon_gen2;
mod tetris;

/// A supported cartridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Title {
    #[strum(serialize = "Kirby-Dream-Land-1")]
    KirbyDreamLand1,
    #[strum(serialize = "Pokemon-Blue")]
    PokemonBlue,
    #[strum(serialize = "Pokemon-Gold")]
    PokemonGold,
    #[strum(serialize = "Pokemon-Red")]
    PokemonRed,
    #[strum(serialize = "Pokemon-Silver")]
    PokemonSilver,
    #[strum(serialize = "Pokemon-Yellow")]
    PokemonYellow,
    #[strum(serialize = "Super-Mario-Land-1")]
    SuperMarioLand1,
    #[strum(serialize = "Tetris")]
    Tetris,
}

impl Title {
    /// Everything an environment needs to know about the title.
    pub fn spec(&self) -> TitleSpec {
        match self {
            Self::KirbyDreamLand1 => kirby::spec(),
            Self::PokemonBlue => pokemon_gen1::spec(
                "POKEMON BLUE",
                "roms/pokemon/gen_1/pokemon_blue.gb",
                "states/pokemon/gen_1/pokemon_blue_after_intro.state",
                0,
            ),
            Self::PokemonRed => pokemon_gen1::spec(
                "POKEMON RED",
                "roms/pokemon/gen_1/pokemon_red.gb",
                "states/pokemon/gen_1/pokemon_red_after_intro.state",
                0,
            ),
            Self::PokemonYellow => pokemon_gen1::spec(
                "POKEMON YELLOW",
                "roms/pokemon/gen_1/pokemon_yellow.gbc",
                "states/pokemon/gen_1/pokemon_yellow_after_intro.state",
                -1,
            ),
            Self::PokemonGold => pokemon_gen2::spec(
                "POKEMON_GLDAAU",
                "roms/pokemon/gen_2/pokemon_gold.gbc",
                "states/pokemon/gen_2/pokemon_gold_after_intro.state",
            ),
            Self::PokemonSilver => pokemon_gen2::spec(
                "POKEMON_SLVAAX",
                "roms/pokemon/gen_2/pokemon_silver.gbc",
                "states/pokemon/gen_2/pokemon_silver_after_intro.state",
            ),
            Self::SuperMarioLand1 => mario::spec(),
            Self::Tetris => tetris::spec(),
        }
    }
}

/// Memory layout, observation layout, reward and termination of a title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleSpec {
    /// Title stored in the cartridge header.
    pub cartridge_title: &'static str,
    /// Fields decoded on every step.
    pub memory_map: MemoryMap,
    /// Part of the background tile map exposed as the tile grid.
    pub game_area: GameArea,
    /// Fields placed in front of the tile grid in flattened observations, in order.
    pub flatten_fields: &'static [&'static str],
    /// Terms summed into the reward.
    pub reward_terms: Vec<RewardTerm>,
    /// The episode ends when any of these holds.
    pub termination: Vec<Predicate>,
    /// ROM path relative to the resource directory.
    pub default_rom: &'static str,
    /// Save state path relative to the resource directory.
    pub default_state: &'static str,
}

impl TitleSpec {
    /// Length of a flattened observation.
    pub fn flatten_len(&self) -> usize {
        let fields: usize = self
            .flatten_fields
            .iter()
            .filter_map(|&f| self.memory_map.field(f))
            .map(|f| f.len())
            .sum();
        fields + self.game_area.len()
    }

    /// Fields whose reset-time values the reward or termination compare against.
    pub fn tracked_fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = self
            .reward_terms
            .iter()
            .filter_map(|t| match t {
                RewardTerm::Flag { when, .. } => Some(when.tracked_fields()),
                _ => None,
            })
            .flatten()
            .chain(self.termination.iter().flat_map(|p| p.tracked_fields()))
            .collect();
        fields.sort_unstable();
        fields.dedup();
        fields
    }

    /// Fields referenced by the observation, reward or termination.
    pub fn referenced_fields(&self) -> Vec<&'static str> {
        self.flatten_fields
            .iter()
            .copied()
            .chain(self.reward_terms.iter().flat_map(|t| t.fields()))
            .chain(self.termination.iter().flat_map(|p| p.fields()))
            .collect()
    }
}
