//! Vectorized encode/decode loops.
//!
//! The loop geometry is fixed by the lane width `W`: each full-chunk
//! iteration consumes `W * 3 / 4` input bytes and produces `W` ASCII
//! bytes (or the reverse for decoding). The final partial chunk goes
//! through a masked load, the same transform, and the tail count tables;
//! an equal mask then overwrites the lanes past the real data with `=`.
//!
//! The width is a build-time capability decision, not a runtime probe:
//! `cfg(target_feature)` picks 64/32/16 lanes, and targets with no vector
//! capability use the scalar path for everything.

pub(crate) mod lanes;
mod transform;
mod translate;

use crate::alphabet::PAD;
use crate::errors::DecodeError;
use crate::{scalar, tail};
use lanes::Lanes;

/// Lane width selected for this build.
#[cfg(target_feature = "avx512f")]
pub(crate) const LANE_WIDTH: usize = 64;

#[cfg(all(target_feature = "avx2", not(target_feature = "avx512f")))]
pub(crate) const LANE_WIDTH: usize = 32;

#[cfg(all(
    any(
        target_feature = "sse2",
        target_feature = "neon",
        target_feature = "simd128"
    ),
    not(any(target_feature = "avx2", target_feature = "avx512f"))
))]
pub(crate) const LANE_WIDTH: usize = 16;

// No vector capability: the width is never exercised, VECTOR_CAPABLE
// routes everything to the scalar path.
#[cfg(not(any(
    target_feature = "avx512f",
    target_feature = "avx2",
    target_feature = "sse2",
    target_feature = "neon",
    target_feature = "simd128"
)))]
pub(crate) const LANE_WIDTH: usize = 16;

/// Whether this build has a vector width worth dispatching to.
pub(crate) const VECTOR_CAPABLE: bool = cfg!(any(
    target_feature = "avx512f",
    target_feature = "avx2",
    target_feature = "sse2",
    target_feature = "neon",
    target_feature = "simd128"
));

/// Input bytes consumed per full-chunk encode iteration at the build width.
pub(crate) const INPUT_CHUNK: usize = LANE_WIDTH * 3 / 4;

/// Append the Base64 encoding of `data` to `out`, vectorized at the
/// build width.
pub(crate) fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    encode_with_width::<LANE_WIDTH>(data, out);
}

/// Decode `input` (length already validated as a multiple of 4) into
/// `out`, vectorized at the build width.
pub(crate) fn decode_into(input: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
    decode_with_width::<LANE_WIDTH>(input, out)
}

/// Width-parameterized encode loop: full chunks, then at most one masked
/// tail chunk. Kept generic so tests can drive every supported width.
pub(crate) fn encode_with_width<const W: usize>(data: &[u8], out: &mut Vec<u8>) {
    let input_chunk = W * 3 / 4;

    let mut offset = 0;
    while data.len() - offset >= input_chunk {
        let register = Lanes::<W>::load_partial(&data[offset..offset + input_chunk]);
        let ascii = translate::sextets_to_ascii(transform::encode_lanes(register));
        ascii.store(out);
        offset += input_chunk;
    }

    let remaining = data.len() - offset;
    if remaining == 0 {
        return;
    }

    // Tail chunk: masked load, same transform, then overwrite the lanes
    // past the real data with '=' and store exactly the padded count.
    let register = Lanes::<W>::load_partial(&data[offset..]);
    let ascii = translate::sextets_to_ascii(transform::encode_lanes(register));

    let raw = tail::RAW_STORE[remaining] as usize;
    let padded = tail::PADDED_STORE[remaining] as usize;
    let equal_mask = Lanes::<W>::indices().simd_ge(Lanes::splat(raw as u8));
    equal_mask
        .select(Lanes::splat(PAD), ascii)
        .store_partial(out, padded);
}

/// Width-parameterized decode loop.
///
/// Full chunks of the pad-free region go through the vector path; the
/// remainder, including everything from the first `=` on, is finished by
/// the scalar group loop so padding semantics live in exactly one place.
pub(crate) fn decode_with_width<const W: usize>(
    input: &[u8],
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    debug_assert!(input.len() % 4 == 0);

    let data_len = pad_free_len(input);
    let output_chunk = W * 3 / 4;

    let mut offset = 0;
    while data_len - offset >= W {
        let register = Lanes::<W>::load_partial(&input[offset..offset + W]);
        let (values, invalid) = translate::ascii_to_sextets(register);
        if let Some(lane) = invalid.first_set() {
            return Err(DecodeError::invalid_character(
                input[offset + lane],
                offset + lane,
            ));
        }
        transform::decode_lanes(values).store_partial(out, output_chunk);
        offset += W;
    }

    scalar::decode_into(&input[offset..], offset, out)
}

/// Length of the prefix before the first `=` byte. Decoding stops at the
/// first padding byte, so nothing at or past it may reach the vector
/// classifier.
fn pad_free_len(input: &[u8]) -> usize {
    input.iter().position(|&b| b == PAD).unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_encode(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        scalar::encode_into(data, &mut out);
        out
    }

    fn vector_encode<const W: usize>(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_with_width::<W>(data, &mut out);
        out
    }

    fn vector_decode<const W: usize>(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        decode_with_width::<W>(input, &mut out)?;
        Ok(out)
    }

    /// Patterned but irregular test data.
    fn test_data(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 151 + 89) as u8).collect()
    }

    #[test]
    fn encode_matches_scalar_at_every_width() {
        for len in 0..=200 {
            let data = test_data(len);
            let expected = scalar_encode(&data);

            assert_eq!(vector_encode::<4>(&data), expected, "W=4 len={len}");
            assert_eq!(vector_encode::<8>(&data), expected, "W=8 len={len}");
            assert_eq!(vector_encode::<16>(&data), expected, "W=16 len={len}");
            assert_eq!(vector_encode::<32>(&data), expected, "W=32 len={len}");
            assert_eq!(vector_encode::<64>(&data), expected, "W=64 len={len}");
        }
    }

    #[test]
    fn decode_matches_scalar_at_every_width() {
        for len in 0..=200 {
            let data = test_data(len);
            let encoded = scalar_encode(&data);

            assert_eq!(vector_decode::<4>(&encoded).unwrap(), data, "W=4 len={len}");
            assert_eq!(vector_decode::<8>(&encoded).unwrap(), data, "W=8 len={len}");
            assert_eq!(vector_decode::<16>(&encoded).unwrap(), data, "W=16 len={len}");
            assert_eq!(vector_decode::<32>(&encoded).unwrap(), data, "W=32 len={len}");
            assert_eq!(vector_decode::<64>(&encoded).unwrap(), data, "W=64 len={len}");
        }
    }

    #[test]
    fn tail_chunk_emits_exact_padding() {
        // One full 12-byte chunk plus every possible tail length at W=16.
        for tail_len in 0..12 {
            let data = test_data(12 + tail_len);
            let encoded = vector_encode::<16>(&data);

            assert_eq!(encoded.len(), data.len().div_ceil(3) * 4);
            let pads = encoded.iter().rev().take_while(|&&b| b == PAD).count();
            assert_eq!(pads, (3 - data.len() % 3) % 3, "tail {tail_len}");
        }
    }

    #[test]
    fn decode_reports_positions_inside_full_chunks() {
        // 32 valid characters with one corrupted in the second chunk.
        let mut encoded = scalar_encode(&test_data(24));
        assert_eq!(encoded.len(), 32);
        encoded[21] = b'!';

        let err = vector_decode::<16>(&encoded).unwrap_err();
        assert_eq!(err, DecodeError::invalid_character(b'!', 21));
    }

    #[test]
    fn decode_defers_padded_region_to_the_scalar_loop() {
        // 17 bytes -> 24 chars ending in '='; the last group must not go
        // through the vector path.
        let data = test_data(17);
        let encoded = scalar_encode(&data);
        assert_eq!(encoded.last(), Some(&PAD));

        assert_eq!(vector_decode::<16>(&encoded).unwrap(), data);
    }

    #[test]
    fn pad_free_len_stops_at_the_first_padding_byte() {
        assert_eq!(pad_free_len(b"TWFu"), 4);
        assert_eq!(pad_free_len(b"TWE="), 3);
        assert_eq!(pad_free_len(b"TQ=="), 2);
        assert_eq!(pad_free_len(b"TQ==TWFu"), 2);
        assert_eq!(pad_free_len(b""), 0);
    }

    #[test]
    fn padding_mid_input_matches_the_scalar_path() {
        // Decoding stops at the first '='; whatever follows is ignored on
        // both paths, even whole vector chunks of it.
        let mut input = scalar_encode(&test_data(5));
        input.extend_from_slice(&scalar_encode(&test_data(30)));
        assert_eq!(input.len() % 4, 0);

        let mut expected = Vec::new();
        scalar::decode_into(&input, 0, &mut expected).unwrap();
        assert_eq!(expected, test_data(5));

        assert_eq!(vector_decode::<4>(&input).unwrap(), expected);
        assert_eq!(vector_decode::<16>(&input).unwrap(), expected);
        assert_eq!(vector_decode::<64>(&input).unwrap(), expected);
    }

    #[test]
    fn build_width_constants_are_consistent() {
        assert!(matches!(LANE_WIDTH, 4 | 8 | 16 | 32 | 64));
        assert_eq!(INPUT_CHUNK, LANE_WIDTH * 3 / 4);
        assert!(INPUT_CHUNK <= tail::MAX_INPUT_CHUNK);
    }
}
