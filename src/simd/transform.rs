//! Bit-lane transform: rearrange bytes inside a register and extract or
//! recombine 6-bit groups.
//!
//! Encoding spreads each 3 input bytes `a b c` across 4 lanes as
//! `[a, b, b, c]` (duplicating the middle byte so every 6-bit group can be
//! extracted without cross-lane carries), then extracts the four groups
//! with masks, an 8-bit shift, and two rotations that cross a lane
//! boundary through a 16-bit view:
//!
//! ```text
//! lane 0:   (a & 0b1111_1100) >> 2                          -> a[7:2]
//! pair 0/1: (a & 0b0000_0011, b & 0b1111_0000) rotr16 by 4  -> a[1:0] b[7:4] in lane 1
//! pair 2/3: (b & 0b0000_1111, c & 0b1100_0000) rotl16 by 2  -> b[3:0] c[7:6] in lane 2
//! lane 3:   c & 0b0011_1111                                 -> c[5:0]
//! ```
//!
//! Decoding runs the same steps in reverse and compacts each 4-lane group
//! back to 3 bytes. Both directions are total and pure: the masks only
//! ever select bit positions known to hold valid data. The constants are
//! width-independent; the 4-lane pattern tiles `W / 4` times, generated at
//! compile time for whichever width the loop instantiates.

use super::lanes::Lanes;

/// Spread pattern: lane group `i` of 4 reads input bytes
/// `3i, 3i+1, 3i+1, 3i+2`.
const fn spread_pattern<const W: usize>() -> [u8; W] {
    let mut pattern = [0u8; W];
    let mut group = 0;
    while group < W / 4 {
        pattern[group * 4] = (group * 3) as u8;
        pattern[group * 4 + 1] = (group * 3 + 1) as u8;
        pattern[group * 4 + 2] = (group * 3 + 1) as u8;
        pattern[group * 4 + 3] = (group * 3 + 2) as u8;
        group += 1;
    }
    pattern
}

/// Tile a 4-byte mask across all `W` lanes.
const fn tile4<const W: usize>(mask: [u8; 4]) -> [u8; W] {
    let mut tiled = [0u8; W];
    let mut i = 0;
    while i < W {
        tiled[i] = mask[i % 4];
        i += 1;
    }
    tiled
}

/// Decode merge pattern: identity, except lane `4i+1` reads lane `4i+2`
/// so the two halves of the middle byte can be OR-ed into one lane.
const fn merge_pattern<const W: usize>() -> [u8; W] {
    let mut pattern = [0u8; W];
    let mut i = 0;
    while i < W {
        pattern[i] = i as u8;
        i += 1;
    }
    let mut group = 0;
    while group < W / 4 {
        pattern[group * 4 + 1] = (group * 4 + 2) as u8;
        group += 1;
    }
    pattern
}

/// Decode compact pattern: output byte `3i + k` reads lane
/// `4i + [0, 1, 3][k]`; the unused top quarter reads lane 0.
const fn compact_pattern<const W: usize>() -> [u8; W] {
    let mut pattern = [0u8; W];
    let mut group = 0;
    while group < W / 4 {
        pattern[group * 3] = (group * 4) as u8;
        pattern[group * 3 + 1] = (group * 4 + 1) as u8;
        pattern[group * 3 + 2] = (group * 4 + 3) as u8;
        group += 1;
    }
    pattern
}

/// Extract one 6-bit value per lane from a register holding `W * 3 / 4`
/// raw input bytes in its low lanes.
pub(crate) fn encode_lanes<const W: usize>(input: Lanes<W>) -> Lanes<W> {
    let spread = input.shuffle(&const { spread_pattern::<W>() });

    let hi6 = (spread & const { Lanes::from_array(tile4::<W>([0xFC, 0x00, 0x00, 0x00])) }).shr(2);
    let mid1 = (spread & const { Lanes::from_array(tile4::<W>([0x03, 0xF0, 0x00, 0x00])) })
        .rotate_pairs_right(4);
    let mid2 = (spread & const { Lanes::from_array(tile4::<W>([0x00, 0x00, 0x0F, 0xC0])) })
        .rotate_pairs_left(2);
    let lo6 = spread & const { Lanes::from_array(tile4::<W>([0x00, 0x00, 0x00, 0x3F])) };

    hi6 | mid1 | mid2 | lo6
}

/// Re-pack one 6-bit value per lane into `W * 3 / 4` raw bytes in the low
/// lanes of the result. Exact inverse of [`encode_lanes`].
pub(crate) fn decode_lanes<const W: usize>(sextets: Lanes<W>) -> Lanes<W> {
    let hi = (sextets & const { Lanes::from_array(tile4::<W>([0x3F, 0x00, 0x00, 0x00])) }).shl(2);
    let mid1 = (sextets & const { Lanes::from_array(tile4::<W>([0x00, 0x3F, 0x00, 0x00])) })
        .rotate_pairs_left(4);
    let mid2 = (sextets & const { Lanes::from_array(tile4::<W>([0x00, 0x00, 0x3F, 0x00])) })
        .rotate_pairs_right(2);
    let lo = sextets & const { Lanes::from_array(tile4::<W>([0x00, 0x00, 0x00, 0x3F])) };

    // [a, b_hi, b_lo, c] per group: merge the middle-byte halves, then
    // compact 4 lanes to 3 bytes.
    let parts = hi | mid1 | mid2 | lo;
    let merged = parts | parts.shuffle(&const { merge_pattern::<W>() });
    merged.shuffle(&const { compact_pattern::<W>() })
}
