//! Scalar reference path: one logical group at a time through the same
//! mapper as the vector path.
//!
//! This is the fallback for inputs shorter than one full chunk, for builds
//! without a usable vector width, and for the remainder the vectorized
//! decode loop hands off. It is also the correctness oracle: the vector
//! path must be byte-identical to it for every input.

use crate::alphabet::{PAD, ascii_to_sextet, sextet_to_ascii};
use crate::errors::DecodeError;

/// Append the Base64 encoding of `data` to `out`.
pub(crate) fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    if data.is_empty() {
        return;
    }

    let mut groups = data.chunks_exact(3);
    for group in groups.by_ref() {
        let word = (group[0] as u32) << 16 | (group[1] as u32) << 8 | group[2] as u32;
        out.push(sextet_to_ascii((word >> 18) as u8 & 0x3F));
        out.push(sextet_to_ascii((word >> 12) as u8 & 0x3F));
        out.push(sextet_to_ascii((word >> 6) as u8 & 0x3F));
        out.push(sextet_to_ascii(word as u8 & 0x3F));
    }

    match groups.remainder() {
        [b0] => {
            let word = (*b0 as u32) << 16;
            out.push(sextet_to_ascii((word >> 18) as u8 & 0x3F));
            out.push(sextet_to_ascii((word >> 12) as u8 & 0x3F));
            out.push(PAD);
            out.push(PAD);
        }
        [b0, b1] => {
            let word = (*b0 as u32) << 16 | (*b1 as u32) << 8;
            out.push(sextet_to_ascii((word >> 18) as u8 & 0x3F));
            out.push(sextet_to_ascii((word >> 12) as u8 & 0x3F));
            out.push(sextet_to_ascii((word >> 6) as u8 & 0x3F));
            out.push(PAD);
        }
        _ => {}
    }
}

/// Decode whole 4-character groups starting at absolute position `offset`,
/// appending to `out`.
///
/// Stops at the first padding byte; characters before it in the group
/// still contribute, anything after it is ignored. The caller has already
/// validated that `input.len()` is a multiple of 4.
pub(crate) fn decode_into(
    input: &[u8],
    offset: usize,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    debug_assert!(input.len() % 4 == 0);

    for (g, group) in input.chunks_exact(4).enumerate() {
        let mut word = 0u32;
        let mut sextets = 0u32;

        for (i, &b) in group.iter().enumerate() {
            if b == PAD {
                flush_partial(word, sextets, out);
                return Ok(());
            }
            let v = ascii_to_sextet(b)
                .ok_or_else(|| DecodeError::invalid_character(b, offset + g * 4 + i))?;
            word = word << 6 | v as u32;
            sextets += 1;
        }

        out.push((word >> 16) as u8);
        out.push((word >> 8) as u8);
        out.push(word as u8);
    }

    Ok(())
}

/// Emit the bytes a padding-shortened group carries: `sextets` 6-bit
/// values hold `sextets * 6 / 8` whole bytes.
fn flush_partial(word: u32, sextets: u32, out: &mut Vec<u8>) {
    match sextets {
        2 => out.push((word >> 4) as u8),
        3 => {
            out.push((word >> 10) as u8);
            out.push((word >> 2) as u8);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &[u8]) -> String {
        let mut out = Vec::new();
        encode_into(data, &mut out);
        String::from_utf8(out).unwrap()
    }

    fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        decode_into(input.as_bytes(), 0, &mut out)?;
        Ok(out)
    }

    #[test]
    fn encodes_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"M"), "TQ==");
        assert_eq!(encode(b"Ma"), "TWE=");
        assert_eq!(encode(b"Man"), "TWFu");
        assert_eq!(encode(b"Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(decode("TWFu").unwrap(), b"Man");
        assert_eq!(decode("TWE=").unwrap(), b"Ma");
        assert_eq!(decode("TQ==").unwrap(), b"M");
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn reports_invalid_character_position() {
        let err = decode("A!B=").unwrap_err();
        assert_eq!(err, DecodeError::invalid_character(b'!', 1));

        let mut out = Vec::new();
        let err = decode_into(b"AAAA!AA=", 100, &mut out).unwrap_err();
        assert_eq!(err, DecodeError::invalid_character(b'!', 104));
    }

    #[test]
    fn stops_at_first_padding_byte() {
        // Characters after '=' are ignored, even valid ones.
        assert_eq!(decode("TQ==TWFu").unwrap(), b"M");
        // A group cut down to one data character carries no whole byte.
        assert_eq!(decode("T===").unwrap(), b"");
    }

    #[test]
    fn round_trips_every_remainder_length() {
        for len in 0..32usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let encoded = encode(&data);
            assert_eq!(encoded.len() % 4, 0);
            assert_eq!(decode(&encoded).unwrap(), data, "length {len}");
        }
    }
}
