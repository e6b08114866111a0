//! Pokemon Gold and Silver.
use super::TitleSpec;
use crate::{
    emulator::GameArea,
    memory::{Encoding, MemoryField, MemoryMap},
    reward::{RewardComponent, RewardTerm},
};

// Johto badges, then Kanto badges.
const BADGES: u16 = 0xD57C;
const MONEY: u16 = 0xD573;
const TEAM_SIZE: u16 = 0xDA22;
const POKEDEX_SEEN: u16 = 0xDEB9;
const POKEDEX_BYTES: usize = 32;

const PARTY: u16 = 0xDA2A;
const PARTY_STRIDE: u16 = 0x30;

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
const MOVES: [u16; 6] = party(0x02);
const EXP: [u16; 6] = party(0x08);
const PP: [u16; 6] = party(0x17);
const LEVEL: [u16; 6] = party(0x1F);
const HP: [u16; 6] = party(0x22);
const MAX_HP: [u16; 6] = party(0x24);

pub(super) fn spec(
    cartridge_title: &'static str,
    default_rom: &'static str,
    default_state: &'static str,
) -> TitleSpec {
    TitleSpec {
        cartridge_title,
        memory_map: MemoryMap::new(vec![
            MemoryField::slots("pokemon_ids", &SPECIES, 1, Encoding::RawByte),
            MemoryField::slots("levels", &LEVEL, 1, Encoding::RawByte),
            MemoryField::slots("hps", &HP, 2, Encoding::BigEndian),
            MemoryField::slots("max_hps", &MAX_HP, 2, Encoding::BigEndian),
            MemoryField::slots("exps", &EXP, 3, Encoding::BigEndian),
            MemoryField::slots("moves", &MOVES, 4, Encoding::Bytes),
            MemoryField::slots("max_pps", &MOVES, 4, Encoding::MaxPp).alias_of("moves"),
            MemoryField::slots("pps", &PP, 4, Encoding::Bytes),
            // the upper two bits count PP ups
            MemoryField::slots("pp_values", &PP, 4, Encoding::Bytes)
                .masked(0x3F)
                .alias_of("pps"),
            MemoryField::scalar("team_size", TEAM_SIZE, 1, Encoding::RawByte),
            MemoryField::scalar("badges", BADGES, 2, Encoding::BitCount),
            MemoryField::scalar("money", MONEY, 3, Encoding::BigEndian),
            MemoryField::scalar("seen_pokemon", POKEDEX_SEEN, POKEDEX_BYTES, Encoding::BitCount),
        ]),
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
                denominator: 16.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::Money,
                field: "money",
                denominator: 999999.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::TeamSize,
                field: "team_size",
                denominator: 6.0,
            },
            RewardTerm::Normalized {
                component: RewardComponent::Levels,
                field: "levels",
                denominator: 600.0,
            },
            RewardTerm::Ratio {
                component: RewardComponent::Hps,
                numerator: "hps",
                denominator: "max_hps",
            },
            RewardTerm::Ratio {
                component: RewardComponent::Pps,
                numerator: "pp_values",
                denominator: "max_pps",
            },
            RewardTerm::Normalized {
                component: RewardComponent::SeenPokemon,
                field: "seen_pokemon",
                denominator: 251.0,
            },
        ],
        termination: vec![],
        default_rom,
        default_state,
    }
}
