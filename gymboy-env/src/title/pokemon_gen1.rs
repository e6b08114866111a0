//! Pokemon Red, Blue and Yellow.
//!
//! Yellow keeps the Red/Blue layout one byte lower in memory.
use super::TitleSpec;
use crate::{
    emulator::GameArea,
    memory::{Encoding, MemoryField, MemoryMap},
    reward::{RewardComponent, RewardTerm},
};

const TEAM_SIZE: u16 = 0xD163;
const BADGES: u16 = 0xD356;
const MONEY: u16 = 0xD347;
const POKEDEX_SEEN_START: u16 = 0xD30A;
const POKEDEX_SEEN_END: u16 = 0xD31D;
const EVENT_FLAGS_START: u16 = 0xD747;
const EVENT_FLAGS_END: u16 = 0xD886;

const PARTY: u16 = 0xD16B;
const PARTY_STRIDE: u16 = 0x2C;

const fn party(offset: u16) -> [u16; 6] {
    let base = PARTY + offset;
    [
        base,
        base + PARTY_STRIDE,
        base + 2 * PARTY_STRIDE,
        base + 3 * PARTY_STRIDE,
        base + 4 * PARTY_STRIDE,
        base + 5 * PARTY_STRIDE,
    ]
}

const SPECIES: [u16; 6] = party(0x00);
const HP: [u16; 6] = party(0x01);
const MOVES: [u16; 6] = party(0x08);
const EXP: [u16; 6] = party(0x0E);
const PP: [u16; 6] = party(0x1D);
const LEVEL: [u16; 6] = party(0x21);
const MAX_HP: [u16; 6] = party(0x22);

/// Layout shared by the three versions, shifted by `offset`.
pub(super) fn memory_map(offset: i32) -> MemoryMap {
    MemoryMap::new(vec![
        MemoryField::slots("pokemon_ids", &SPECIES, 1, Encoding::RawByte),
        MemoryField::slots("levels", &LEVEL, 1, Encoding::RawByte),
        MemoryField::slots("hps", &HP, 2, Encoding::BigEndian),
        MemoryField::slots("max_hps", &MAX_HP, 2, Encoding::BigEndian),
        MemoryField::slots("exps", &EXP, 3, Encoding::BigEndian),
        MemoryField::slots("moves", &MOVES, 4, Encoding::Bytes),
        MemoryField::slots("max_pps", &MOVES, 4, Encoding::MaxPp).alias_of("moves"),
        MemoryField::slots("pps", &PP, 4, Encoding::Bytes),
        MemoryField::scalar("team_size", TEAM_SIZE, 1, Encoding::RawByte),
        MemoryField::scalar("badges", BADGES, 1, Encoding::BitCount),
        MemoryField::scalar("money", MONEY, 3, Encoding::Bcd),
        MemoryField::range(
            "seen_pokemon",
            POKEDEX_SEEN_START,
            POKEDEX_SEEN_END,
            Encoding::BitCount,
        ),
        MemoryField::range(
            "events",
            EVENT_FLAGS_START,
            EVENT_FLAGS_END,
            Encoding::BitCount,
        ),
    ])
    .with_offset(offset)
}

pub(super) fn spec(
    cartridge_title: &'static str,
    default_rom: &'static str,
    default_state: &'static str,
    offset: i32,
) -> TitleSpec {
    TitleSpec {
        cartridge_title,
        memory_map: memory_map(offset),
        game_area: GameArea {
            x: 0,
            y: 0,
            width: 20,
            height: 18,
        },
        flatten_fields: &["pokemon_ids", "levels", "hps", "moves", "pps"],
        reward_terms: vec![
            RewardTerm::Normalized {
                component: RewardComponent::Badges,
                field: "badges",
                denominator: 8.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::Money,
                field: "money",
                denominator: 999999.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::Levels,
                field: "levels",
                denominator: 600.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::SeenPokemon,
                field: "seen_pokemon",
                denominator: 151.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::Events,
                field: "events",
                denominator: 8.0 * (EVENT_FLAGS_END - EVENT_FLAGS_START) as f32,
            },
        ],
        termination: vec![],
        default_rom,
        default_state,
    }
}
