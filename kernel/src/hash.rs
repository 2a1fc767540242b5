//! Integer-mixing hasher for priority keys.
//!
//! Bounds produced by a search are small, densely packed integers that often
//! share their low bits. The std `SipHash` would spread them fine but costs far
//! more than a key this size needs, so keys go through Thomas Wang's 32-bit
//! multiply-xor-shift mix instead. No random state: iteration order of a map
//! depends only on its insertion history.
//!
//! `HashMap` takes its per-slot control tag from the top 7 bits of the 64-bit
//! hash, so the 32-bit mix is replicated into both halves of the output.

use std::hash::{BuildHasherDefault, Hasher};

/// Multiplier of the mix rounds.
pub const WANG_MULTIPLIER: u32 = 0x045d_9f3b;

/// Thomas Wang's 32-bit avalanche mix.
///
/// `k = ((k >> 16) ^ k) * M` twice, then `k = (k >> 16) ^ k`, with wrapping
/// multiplication.
#[must_use]
pub const fn wang_mix(key: u32) -> u32 {
    let mut k = key;
    k = ((k >> 16) ^ k).wrapping_mul(WANG_MULTIPLIER);
    k = ((k >> 16) ^ k).wrapping_mul(WANG_MULTIPLIER);
    (k >> 16) ^ k
}

/// `Hasher` applying [`wang_mix`] to 32-bit keys.
///
/// [`Hasher::finish`] returns the mix in both the high and low 32 bits.
///
/// Only integer keys are expected. Arbitrary byte input is folded four bytes
/// at a time through the same mix so the hasher stays total.
#[derive(Debug, Default, Clone, Copy)]
pub struct WangHasher {
    state: u32,
}

impl Hasher for WangHasher {
    fn finish(&self) -> u64 {
        widen(self.state)
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(4) {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            self.state = wang_mix(self.state ^ u32::from_le_bytes(word));
        }
    }

    fn write_u32(&mut self, i: u32) {
        self.state = wang_mix(i);
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_i32(&mut self, i: i32) {
        self.state = wang_mix(i as u32);
    }
}

/// Spread a 32-bit mix over the full 64-bit hash.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn widen(mixed: u32) -> u64 {
    let k = mixed as u64;
    (k << 32) | k
}

/// `BuildHasher` for [`WangHasher`], used by [`crate::map::PriorityMap`].
pub type BuildWangHasher = BuildHasherDefault<WangHasher>;
