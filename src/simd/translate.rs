//! Lane-wise value/ASCII translation.
//!
//! The encode direction is the branch-free offset scheme from
//! [`crate::alphabet`]: saturating-subtract 51, select index 13 for the
//! uppercase range, 16-entry offset lookup, add. The decode direction
//! classifies every lane into one of the five alphabet ranges and reports
//! invalid lanes as a mask instead of branching per byte.

use super::lanes::Lanes;
use crate::alphabet::ENCODE_OFFSETS;

/// [`ENCODE_OFFSETS`] reinterpreted as wrapping byte addends.
const OFFSET_BYTES: [u8; 16] = offsets_as_bytes();

const fn offsets_as_bytes() -> [u8; 16] {
    let mut bytes = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        bytes[i] = ENCODE_OFFSETS[i] as u8;
        i += 1;
    }
    bytes
}

/// Map 6-bit values to ASCII alphabet bytes, one lane at a time.
pub(crate) fn sextets_to_ascii<const W: usize>(values: Lanes<W>) -> Lanes<W> {
    let saturated = values.saturating_sub(Lanes::splat(51));
    let uppercase = values.simd_le(Lanes::splat(25));
    let index = uppercase.select(Lanes::splat(13), saturated);
    values.wrapping_add(index.lookup16(&OFFSET_BYTES))
}

/// Map ASCII bytes back to 6-bit values.
///
/// Returns the values and a mask of invalid lanes. Padding is not handled
/// here: the vectorized loop only feeds chunks from the pad-free region
/// through this, so `=` classifies as invalid like any other outsider.
pub(crate) fn ascii_to_sextets<const W: usize>(ascii: Lanes<W>) -> (Lanes<W>, Lanes<W>) {
    let upper = ascii.in_range(b'A', b'Z');
    let lower = ascii.in_range(b'a', b'z');
    let digit = ascii.in_range(b'0', b'9');
    let plus = ascii.simd_eq(Lanes::splat(b'+'));
    let slash = ascii.simd_eq(Lanes::splat(b'/'));

    let values = (upper & ascii.wrapping_sub(Lanes::splat(65)))
        | (lower & ascii.wrapping_sub(Lanes::splat(71)))
        | (digit & ascii.wrapping_add(Lanes::splat(4)))
        | (plus & Lanes::splat(62))
        | (slash & Lanes::splat(63));
    let valid = upper | lower | digit | plus | slash;

    (values, valid.invert())
}
