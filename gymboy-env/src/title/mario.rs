//! Super Mario Land.
use super::TitleSpec;
use crate::{
    emulator::GameArea,
    memory::{Encoding, MemoryField, MemoryMap},
    reward::{Predicate, RewardComponent, RewardTerm},
};

const SCORE: u16 = 0xC0A0;
const COINS: u16 = 0x9829;
const LIVES: u16 = 0xDA15;
const TIME: u16 = 0x9831;
const WORLD_LEVEL: u16 = 0xFFB4;
const TIME_UP: u16 = 0xDA1D;
const LEVEL_COMPLETE: u16 = 0xFFB3;
const GAME_OVER: u16 = 0xC0A4;

fn game_over() -> Predicate {
    Predicate::Equals {
        field: "game_over",
        value: 0x39,
    }
}

// The level-clear animation runs while the state is 5, 6 or 7.
fn level_finished() -> Predicate {
    Predicate::InRange {
        field: "level_state",
        low: 0x05,
        high: 0x07,
    }
}

pub(super) fn spec() -> TitleSpec {
    TitleSpec {
        cartridge_title: "SUPER MARIOLAN",
        memory_map: MemoryMap::new(vec![
            MemoryField::scalar("score", SCORE, 3, Encoding::Bcd),
            MemoryField::scalar("coins", COINS, 2, Encoding::ReducedBcd),
            MemoryField::scalar("lives", LIVES, 1, Encoding::Bcd),
            MemoryField::scalar("time", TIME, 3, Encoding::ReducedBcd),
            MemoryField::scalar("world", WORLD_LEVEL, 1, Encoding::HighNibble),
            MemoryField::scalar("level", WORLD_LEVEL, 1, Encoding::LowNibble).alias_of("world"),
            MemoryField::scalar("time_up", TIME_UP, 1, Encoding::RawByte),
            MemoryField::scalar("level_state", LEVEL_COMPLETE, 1, Encoding::RawByte),
            MemoryField::scalar("game_over", GAME_OVER, 1, Encoding::RawByte),
        ]),
        game_area: GameArea {
            x: 0,
            y: 2,
            width: 20,
            height: 16,
        },
        flatten_fields: &["world", "level", "lives", "time"],
        reward_terms: vec![
            RewardTerm::Normalized {
                component: RewardComponent::Score,
                field: "score",
                denominator: 999999.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::Coins,
                field: "coins",
                denominator: 99.0,
            },
            RewardTerm::Flag {
                component: RewardComponent::TimeOver,
                when: Predicate::Equals {
                    field: "time_up",
                    value: 0xFF,
                },
                value: -1.0,
            },
            RewardTerm::Flag {
                component: RewardComponent::LevelFinished,
                when: level_finished(),
                value: 1.0,
            },
            RewardTerm::Flag {
                component: RewardComponent::GameOver,
                when: game_over(),
                value: -1.0,
            },
        ],
        termination: vec![game_over(), level_finished()],
        default_rom: "roms/mario/land_1/super_mario_land_1.gb",
        default_state: "states/mario/land_1/super_mario_land_1_1_1.state",
    }
}
