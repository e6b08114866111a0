//! Maximum power points of every move.
//!
//! Both generations index moves the same way up to 0xA5, Gen 2 appends the rest.

/// Maximum PP without PP ups, indexed by move ID. ID 0 is an empty move slot.
pub static MOVES_TO_MAX_PP: [u8; 252] = [
    0, 35, 25, 10, 15, 20, 20, 15, 15, 15, 35, 30,
    5, 10, 20, 30, 35, 35, 20, 15, 20, 20, 25, 20,
    30, 5, 10, 15, 15, 15, 25, 20, 5, 35, 15, 20,
    20, 10, 15, 30, 35, 20, 20, 30, 25, 40, 20, 15,
    20, 20, 20, 30, 25, 15, 30, 25, 5, 15, 10, 5,
    20, 20, 20, 5, 35, 20, 20, 20, 20, 20, 15, 25,
    15, 10, 20, 25, 10, 35, 30, 15, 10, 40, 10, 15,
    30, 15, 20, 10, 15, 10, 5, 10, 10, 25, 10, 20,
    40, 30, 30, 20, 20, 15, 10, 40, 15, 5, 30, 10,
    20, 10, 40, 40, 20, 30, 30, 20, 30, 10, 10, 20,
    5, 10, 30, 20, 20, 20, 5, 15, 15, 20, 10, 15,
    35, 20, 15, 5, 10, 30, 15, 40, 20, 10, 10, 5,
    10, 20, 10, 15, 20, 15, 40, 20, 10, 5, 15, 10,
    5, 10, 15, 30, 30, 10, 10, 20, 10, 10, 1, 10,
    10, 10, 5, 15, 25, 15, 10, 15, 30, 5, 40, 15,
    10, 25, 10, 30, 10, 20, 10, 10, 10, 10, 10, 20,
    5, 40, 5, 5, 15, 5, 10, 5, 15, 10, 5, 10,
    20, 20, 40, 15, 10, 20, 20, 25, 5, 15, 10, 5,
    20, 15, 20, 25, 20, 5, 30, 5, 10, 20, 40, 5,
    20, 40, 20, 15, 35, 10, 5, 5, 5, 15, 5, 20,
    5, 5, 15, 20, 10, 5, 5, 15, 15, 15, 15, 10,
];

/// Maximum PP of a move, 0 for an empty slot or an unknown ID.
pub fn max_pp(move_id: u8) -> u8 {
    MOVES_TO_MAX_PP.get(move_id as usize).copied().unwrap_or(0)
}
