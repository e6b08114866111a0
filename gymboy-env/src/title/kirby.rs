//! Kirby's Dream Land.
use super::TitleSpec;
use crate::{
    emulator::GameArea,
    memory::{Encoding, MemoryField, MemoryMap},
    reward::{Predicate, RewardComponent, RewardTerm},
};

// Five digit bytes, the displayed score has a constant trailing zero.
const SCORE: u16 = 0xD06F;
const HEALTH: u16 = 0xD086;
const LIVES: u16 = 0xD089;
const BOSS_HEALTH: u16 = 0xD093;
const STAGE: u16 = 0xD028;

fn game_over() -> Predicate {
    Predicate::AllOf(vec![
        Predicate::Equals {
            field: "health",
            value: 0,
        },
        Predicate::InRange {
            field: "lives",
            low: 0,
            high: 1,
        },
    ])
}

fn stage_finished() -> Predicate {
    Predicate::ChangedSinceReset { field: "stage" }
}

pub(super) fn spec() -> TitleSpec {
    TitleSpec {
        cartridge_title: "KIRBY DREAM LA",
        memory_map: MemoryMap::new(vec![
            MemoryField::scalar("score", SCORE, 5, Encoding::ReducedBcd).scaled(10),
            MemoryField::scalar("health", HEALTH, 1, Encoding::RawByte),
            MemoryField::scalar("lives", LIVES, 1, Encoding::RawByte),
            MemoryField::scalar("boss_health", BOSS_HEALTH, 1, Encoding::RawByte),
            MemoryField::scalar("stage", STAGE, 1, Encoding::RawByte),
        ]),
        game_area: GameArea {
            x: 0,
            y: 0,
            width: 20,
            height: 16,
        },
        flatten_fields: &["health", "boss_health", "lives"],
        reward_terms: vec![
            RewardTerm::Normalized {
                component: RewardComponent::Score,
                field: "score",
                denominator: 999999.0,
            },
            RewardTerm::Flag {
                component: RewardComponent::LevelFinished,
                when: stage_finished(),
                value: 1.0,
            },
            RewardTerm::Flag {
                component: RewardComponent::GameOver,
                when: game_over(),
                value: -1.0,
            },
        ],
        termination: vec![game_over(), stage_finished()],
        default_rom: "roms/kirby/dream_land_1/kirby_dream_land_1.gb",
        default_state: "states/kirby/dream_land_1/kirby_dream_land_1_after_intro.state",
    }
}
