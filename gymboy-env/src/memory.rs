//! Declarative memory maps and the snapshots decoded from them.
//!
//! A title is described by a [`MemoryMap`]: a list of named [`MemoryField`]s, each
//! reading one or more equally sized byte slots and decoding them with an
//! [`Encoding`]. [`MemoryMap::extract()`] evaluates every field against the
//! emulator memory and captures the tile grid of the same frame in a [`StateSnapshot`].
use crate::{
    binary::{bcd_to_integer, bit_population_count, bytes_to_int, reduced_bcd_to_integer},
    emulator::{Emulator, GameArea},
    moves::max_pp,
};
use ndarray::Array2;
use std::collections::BTreeMap;

/// How the bytes of a slot are turned into numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// The byte as is. Slots are one byte wide.
    RawByte,
    /// Every byte of the slot as a separate value.
    Bytes,
    /// Big-endian unsigned integer.
    BigEndian,
    /// Packed BCD, most significant byte first.
    Bcd,
    /// Packed BCD, least significant byte first.
    BcdLittleEndian,
    /// One decimal digit per byte.
    ReducedBcd,
    /// Number of set bits.
    BitCount,
    /// Upper four bits of the byte.
    HighNibble,
    /// Lower four bits of the byte.
    LowNibble,
    /// Every byte is a move ID, mapped to the maximum PP of the move.
    MaxPp,
}

impl Encoding {
    fn values_per_slot(&self, width: usize) -> usize {
        match self {
            Self::Bytes | Self::MaxPp => width,
            _ => 1,
        }
    }

    fn decode(&self, bytes: &[u8], out: &mut Vec<u64>) {
        match self {
            Self::RawByte => out.push(bytes.first().copied().unwrap_or(0) as u64),
            Self::Bytes => out.extend(bytes.iter().map(|&b| b as u64)),
            Self::BigEndian => out.push(bytes_to_int(bytes)),
            Self::Bcd => out.push(bcd_to_integer(bytes, 100)),
            Self::BcdLittleEndian => {
                let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
                out.push(bcd_to_integer(&reversed, 100))
            }
            Self::ReducedBcd => out.push(reduced_bcd_to_integer(bytes)),
            Self::BitCount => out.push(bit_population_count(bytes)),
            Self::HighNibble => out.push((bytes.first().copied().unwrap_or(0) >> 4) as u64),
            Self::LowNibble => out.push((bytes.first().copied().unwrap_or(0) & 0x0F) as u64),
            Self::MaxPp => out.extend(bytes.iter().map(|&b| max_pp(b) as u64)),
        }
    }
}

/// A named quantity stored in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryField {
    /// Name of the quantity in the snapshot.
    pub name: &'static str,
    /// Start address of every slot, e.g. one per party member.
    pub slots: Vec<u16>,
    /// Bytes per slot.
    pub width: usize,
    /// Decoding rule applied to each slot.
    pub encoding: Encoding,
    /// Bit mask applied to every byte before decoding.
    pub mask: Option<u8>,
    /// Multiplier applied to every decoded value.
    pub scale: u64,
    /// Field whose bytes this field deliberately reads again.
    pub alias_of: Option<&'static str>,
}

impl MemoryField {
    /// A field of a single slot.
    pub fn scalar(name: &'static str, addr: u16, width: usize, encoding: Encoding) -> Self {
        Self::slots(name, &[addr], width, encoding)
    }

    /// A field covering the half-open address range `start..end`.
    pub fn range(name: &'static str, start: u16, end: u16, encoding: Encoding) -> Self {
        Self::scalar(name, start, (end - start) as usize, encoding)
    }

    /// A field of several slots decoded independently.
    pub fn slots(name: &'static str, slots: &[u16], width: usize, encoding: Encoding) -> Self {
        Self {
            name,
            slots: slots.to_vec(),
            width,
            encoding,
            mask: None,
            scale: 1,
            alias_of: None,
        }
    }

    /// Sets the bit mask.
    pub fn masked(mut self, mask: u8) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Sets the multiplier.
    pub fn scaled(mut self, scale: u64) -> Self {
        self.scale = scale;
        self
    }

    /// Declares the field as an intentional re-read of another field's bytes.
    pub fn alias_of(mut self, name: &'static str) -> Self {
        self.alias_of = Some(name);
        self
    }

    /// Number of values the field decodes to.
    pub fn len(&self) -> usize {
        self.slots.len() * self.encoding.values_per_slot(self.width)
    }

    fn is_alias(&self, other: &MemoryField) -> bool {
        self.alias_of == Some(other.name)
            || other.alias_of == Some(self.name)
            || (self.alias_of.is_some() && self.alias_of == other.alias_of)
    }
}

/// Memory layout of one title, optionally shifted by a regional offset.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryMap {
    fields: Vec<MemoryField>,
    offset: i32,
}

impl MemoryMap {
    /// Creates a map without offset.
    pub fn new(fields: Vec<MemoryField>) -> Self {
        Self { fields, offset: 0 }
    }

    /// Shifts every address of the map by `offset`.
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// The offset applied to every address.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[MemoryField] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&MemoryField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Applies the offset to an address.
    pub fn address(&self, addr: u16) -> u16 {
        (addr as i32 + self.offset) as u16
    }

    fn byte_ranges(&self, field: &MemoryField) -> Vec<(u32, u32)> {
        field
            .slots
            .iter()
            .map(|&s| {
                let start = self.address(s) as u32;
                (start, start + field.width as u32)
            })
            .collect()
    }

    /// Pairs of fields reading the same bytes without being declared as aliases.
    pub fn undeclared_overlaps(&self) -> Vec<(&'static str, &'static str)> {
        let mut overlaps = vec![];
        for (i, a) in self.fields.iter().enumerate() {
            for b in self.fields.iter().skip(i + 1) {
                if a.is_alias(b) {
                    continue;
                }
                let ra = self.byte_ranges(a);
                let rb = self.byte_ranges(b);
                let hit = ra
                    .iter()
                    .any(|&(s0, e0)| rb.iter().any(|&(s1, e1)| s0 < e1 && s1 < e0));
                if hit {
                    overlaps.push((a.name, b.name));
                }
            }
        }
        overlaps
    }

    /// Decodes every field from the current memory and reads the tile grid in `area`.
    pub fn extract<E: Emulator + ?Sized>(&self, emulator: &E, area: &GameArea) -> StateSnapshot {
        let values = self
            .fields
            .iter()
            .map(|field| {
                let mut decoded = Vec::with_capacity(field.len());
                for &slot in field.slots.iter() {
                    let mut bytes = emulator.read_range(self.address(slot), field.width);
                    if let Some(mask) = field.mask {
                        bytes.iter_mut().for_each(|b| *b &= mask);
                    }
                    field.encoding.decode(&bytes, &mut decoded);
                }
                if field.scale != 1 {
                    decoded.iter_mut().for_each(|v| *v *= field.scale);
                }
                (field.name, decoded)
            })
            .collect();

        StateSnapshot {
            values,
            tile_grid: emulator.game_area(area),
        }
    }
}

/// Quantities decoded from memory at one instant, plus the tile grid of that frame.
///
/// Scalars are stored as one-element arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    values: BTreeMap<&'static str, Vec<u64>>,
    tile_grid: Array2<u32>,
}

impl StateSnapshot {
    /// Creates a snapshot from decoded values.
    pub fn new(values: BTreeMap<&'static str, Vec<u64>>, tile_grid: Array2<u32>) -> Self {
        Self { values, tile_grid }
    }

    /// Decoded values of a field.
    pub fn get(&self, name: &str) -> Option<&[u64]> {
        self.values.get(name).map(|v| v.as_slice())
    }

    /// First value of a field, 0 if the field is unknown.
    pub fn scalar(&self, name: &str) -> u64 {
        self.get(name).and_then(|v| v.first().copied()).unwrap_or(0)
    }

    /// Sum of the values of a field, 0 if the field is unknown.
    pub fn sum(&self, name: &str) -> u64 {
        self.get(name).map_or(0, |v| v.iter().sum())
    }

    /// Tile identifiers of the game area.
    pub fn tile_grid(&self) -> &Array2<u32> {
        &self.tile_grid
    }

    /// Names of the decoded fields.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}
