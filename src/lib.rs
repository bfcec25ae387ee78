//! High-throughput Base64 codec.
//!
//! Bulk data moves through a width-parameterized vector register: a
//! shuffle spreads each 3 input bytes over 4 lanes, branch-free masking
//! extracts the 6-bit groups, and a 16-entry offset table turns them into
//! ASCII. A scalar reference path covers short inputs, the padded tail of
//! a decode, and builds without vector support; the two paths are
//! byte-identical for every input.
//!
//! ```
//! let encoded = lane64::encode(b"Man");
//! assert_eq!(encoded, "TWFu");
//! assert_eq!(lane64::decode(&encoded).unwrap(), b"Man");
//! ```

mod alphabet;
mod errors;
mod scalar;
#[cfg(feature = "simd")]
mod simd;
#[cfg(feature = "simd")]
mod tail;

pub use errors::DecodeError;

/// Exact encoded length for `input_len` bytes: `ceil(input_len / 3) * 4`.
#[inline]
pub const fn encoded_len(input_len: usize) -> usize {
    input_len.div_ceil(3) * 4
}

/// Encode `data` as Base64 text.
///
/// Total: any byte sequence of any length has a well-defined encoding.
pub fn encode(data: &[u8]) -> String {
    let mut out = Vec::with_capacity(encoded_len(data.len()));
    encode_into(data, &mut out);
    String::from_utf8(out).expect("base64 output is ASCII")
}

/// Append the Base64 encoding of `data` to `out`.
///
/// Reserves exactly the missing capacity up front, so a caller that
/// pre-sizes with [`encoded_len`] gets zero reallocation.
pub fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    out.reserve(encoded_len(data.len()));

    #[cfg(feature = "simd")]
    if simd::VECTOR_CAPABLE && data.len() >= simd::INPUT_CHUNK {
        simd::encode_into(data, out);
        return;
    }

    scalar::encode_into(data, out);
}

/// Decode Base64 text back into bytes.
///
/// Decoding stops at the first `=` and never derives bytes past it.
///
/// # Errors
///
/// [`DecodeError::InvalidLength`] if the input length is not a multiple
/// of 4, [`DecodeError::InvalidCharacter`] for any byte outside the
/// alphabet and padding set. On error no partial output is returned.
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let input = encoded.as_bytes();
    if input.len() % 4 != 0 {
        return Err(DecodeError::invalid_length(input.len()));
    }

    let mut out = Vec::with_capacity(input.len() / 4 * 3);

    #[cfg(feature = "simd")]
    if simd::VECTOR_CAPABLE && input.len() >= simd::LANE_WIDTH {
        simd::decode_into(input, &mut out)?;
        return Ok(out);
    }

    scalar::decode_into(input, 0, &mut out)?;
    Ok(out)
}
