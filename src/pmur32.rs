//! Progressive MurmurHash3_x86_32 (PMurHash32).

use std::hash::BuildHasher;

use crate::carry::Carry;
use crate::mix;

/// Initial accumulator for `seed`. The seed is only ever supplied here.
pub const fn pmurhash32_init(seed: u32) -> u32 {
    seed
}

/// Feeds one byte. A completed 4-byte block is mixed into `state` and the
/// returned carry is empty.
#[inline]
pub fn pmurhash32_process(state: u32, mut carry: Carry<4>, byte: u8) -> (u32, Carry<4>) {
    match carry.push(byte) {
        Some(block) => (mix::x86_32_block(state, &block), carry),
        None => (state, carry),
    }
}

/// Feeds a chunk; equivalent to [`pmurhash32_process`] on each byte in turn.
pub fn pmurhash32_process_bytes(
    mut state: u32,
    mut carry: Carry<4>,
    data: &[u8],
) -> (u32, Carry<4>) {
    carry.absorb(data, |block| state = mix::x86_32_block(state, block));
    (state, carry)
}

/// Digest of the `total_length` bytes fed so far.
///
/// Pure: `state` and `carry` stay valid and may keep receiving input.
pub fn pmurhash32_result(state: u32, carry: &Carry<4>, total_length: u64) -> u32 {
    mix::x86_32_finish(state, carry.as_bytes(), total_length)
}

progressive_hasher! {
    /// Owned PMurHash32 stream that tracks its own length.
    PMurHash32 {
        seed: u32,
        state: u32,
        block: 4,
        output: u32,
        init: pmurhash32_init,
        process: pmurhash32_process,
        process_bytes: pmurhash32_process_bytes,
        result: pmurhash32_result,
        finish: |digest| digest as u64,
    }
}

/// Builds seeded [`PMurHash32`] hashers for `HashMap` and friends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildPMurHash32 {
    seed: u32,
}

impl BuildPMurHash32 {
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }
}

impl BuildHasher for BuildPMurHash32 {
    type Hasher = PMurHash32;

    fn build_hasher(&self) -> PMurHash32 {
        PMurHash32::new(self.seed)
    }
}
