//! Tetris.
use super::TitleSpec;
use crate::{
    emulator::GameArea,
    memory::{Encoding, MemoryField, MemoryMap},
    reward::{Predicate, RewardComponent, RewardTerm},
};

const SCORE: u16 = 0xC0A0;
const LEVEL: u16 = 0xFFA9;
const NEXT_BLOCK: u16 = 0xC213;
const GAME_STATE: u16 = 0xFFE1;

fn game_over() -> Predicate {
    Predicate::OneOf {
        field: "game_state",
        values: &[0x0D, 0x04],
    }
}

pub(super) fn spec() -> TitleSpec {
    TitleSpec {
        cartridge_title: "TETRIS",
        memory_map: MemoryMap::new(vec![
            // least significant byte first
            MemoryField::scalar("score", SCORE, 3, Encoding::BcdLittleEndian),
            MemoryField::scalar("level", LEVEL, 1, Encoding::RawByte),
            MemoryField::scalar("next_block", NEXT_BLOCK, 1, Encoding::RawByte),
            MemoryField::scalar("game_state", GAME_STATE, 1, Encoding::RawByte),
        ]),
        game_area: GameArea {
            x: 2,
            y: 0,
            width: 10,
            height: 18,
        },
        flatten_fields: &["level", "next_block"],
        reward_terms: vec![
            RewardTerm::Normalized {
                component: RewardComponent::Score,
                field: "score",
                denominator: 999999.0,
            },
            RewardTerm::Flag {
                component: RewardComponent::GameOver,
                when: game_over(),
                value: -1.0,
            },
        ],
        termination: vec![game_over()],
        default_rom: "roms/tetris/tetris/tetris.gb",
        default_state: "states/tetris/tetris/tetris_9.state",
    }
}
