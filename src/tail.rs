//! Tail count tables for the final partial chunk.
//!
//! Both tables are derived once from closed-form ceiling division and
//! indexed by the number of input bytes observed in the tail; nothing is
//! recomputed per call. `PADDED_STORE[n] - RAW_STORE[n]` is the number of
//! `=` bytes the tail emits.

/// Largest per-iteration input chunk across supported widths (64 lanes).
pub(crate) const MAX_INPUT_CHUNK: usize = 48;

/// Bytes to store for an `n`-byte tail, `=` padding included:
/// `ceil(n / 3) * 4` for `n >= 1`, else 0.
pub(crate) const PADDED_STORE: [u8; MAX_INPUT_CHUNK + 1] = padded_store();

/// Bytes of real data for an `n`-byte tail: `ceil(n * 8 / 6)`, the number
/// of complete-or-partial 6-bit groups spanned by `n` bytes.
pub(crate) const RAW_STORE: [u8; MAX_INPUT_CHUNK + 1] = raw_store();

const fn padded_store() -> [u8; MAX_INPUT_CHUNK + 1] {
    let mut table = [0u8; MAX_INPUT_CHUNK + 1];
    let mut n = 1;
    while n <= MAX_INPUT_CHUNK {
        table[n] = (n.div_ceil(3) * 4) as u8;
        n += 1;
    }
    table
}

const fn raw_store() -> [u8; MAX_INPUT_CHUNK + 1] {
    let mut table = [0u8; MAX_INPUT_CHUNK + 1];
    let mut n = 1;
    while n <= MAX_INPUT_CHUNK {
        table[n] = ((n * 8).div_ceil(6)) as u8;
        n += 1;
    }
    table
}
