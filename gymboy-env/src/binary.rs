//! Decoders turning raw memory bytes into integers.
//!
//! None of the decoders validate their input: the memory map is responsible for
//! passing exactly the bytes a field declares, in the order the title stores them.

/// Decodes packed binary-coded decimal, most significant byte first.
///
/// Each byte holds two decimal digits, one per nibble. The decoded byte values are
/// accumulated as `result = digit * result + value`, so `digit` is 100 for packed BCD.
pub fn bcd_to_integer(bytes: &[u8], digit: u64) -> u64 {
    bytes.iter().fold(0, |result, &b| {
        digit * result + 10 * ((b >> 4) & 0x0F) as u64 + (b & 0x0F) as u64
    })
}

/// Decodes one decimal digit per byte, most significant byte first.
///
/// Titles that draw numbers as digit tiles (coins, time) keep one digit in each byte.
pub fn reduced_bcd_to_integer(bytes: &[u8]) -> u64 {
    bcd_to_integer(bytes, 10)
}

/// Assembles a big-endian unsigned integer.
pub fn bytes_to_int(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |result, &b| (result << 8) | b as u64)
}

/// Counts the set bits over all bytes.
pub fn bit_population_count(bytes: &[u8]) -> u64 {
    bytes.iter().map(|b| b.count_ones() as u64).sum()
}
