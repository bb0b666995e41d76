//! Progressive 128-bit MurmurHash3.
//!
//! `pmurhash128*` streams MurmurHash3_x64_128 over two 64-bit lanes;
//! `pmurhash128x86*` streams MurmurHash3_x86_128 over four 32-bit lanes.
//! Both consume 16-byte blocks and return a [`Digest128`] in the same lane
//! order as the one-shot functions.

use std::hash::BuildHasher;

use crate::carry::Carry;
use crate::digest::Digest128;
use crate::mix;

/// Initial lanes `[h1, h2]` for `seed`.
pub const fn pmurhash128_init(seed: u64) -> [u64; 2] {
    [seed; 2]
}

#[inline]
pub fn pmurhash128_process(
    mut state: [u64; 2],
    mut carry: Carry<16>,
    byte: u8,
) -> ([u64; 2], Carry<16>) {
    if let Some(block) = carry.push(byte) {
        mix::x64_128_block(&mut state, &block);
    }
    (state, carry)
}

pub fn pmurhash128_process_bytes(
    mut state: [u64; 2],
    mut carry: Carry<16>,
    data: &[u8],
) -> ([u64; 2], Carry<16>) {
    carry.absorb(data, |block| mix::x64_128_block(&mut state, block));
    (state, carry)
}

/// Digest of the `total_length` bytes fed so far; leaves the state untouched.
pub fn pmurhash128_result(state: [u64; 2], carry: &Carry<16>, total_length: u64) -> Digest128 {
    Digest128::from_x64_lanes(mix::x64_128_finish(state, carry.as_bytes(), total_length))
}

/// Initial lanes `[h1, h2, h3, h4]` for `seed`.
pub const fn pmurhash128x86_init(seed: u32) -> [u32; 4] {
    [seed; 4]
}

#[inline]
pub fn pmurhash128x86_process(
    mut state: [u32; 4],
    mut carry: Carry<16>,
    byte: u8,
) -> ([u32; 4], Carry<16>) {
    if let Some(block) = carry.push(byte) {
        mix::x86_128_block(&mut state, &block);
    }
    (state, carry)
}

pub fn pmurhash128x86_process_bytes(
    mut state: [u32; 4],
    mut carry: Carry<16>,
    data: &[u8],
) -> ([u32; 4], Carry<16>) {
    carry.absorb(data, |block| mix::x86_128_block(&mut state, block));
    (state, carry)
}

pub fn pmurhash128x86_result(state: [u32; 4], carry: &Carry<16>, total_length: u64) -> Digest128 {
    Digest128::from_x86_lanes(mix::x86_128_finish(state, carry.as_bytes(), total_length))
}

progressive_hasher! {
    /// Owned progressive MurmurHash3_x64_128 stream.
    PMurHash128 {
        seed: u64,
        state: [u64; 2],
        block: 16,
        output: Digest128,
        init: pmurhash128_init,
        process: pmurhash128_process,
        process_bytes: pmurhash128_process_bytes,
        result: pmurhash128_result,
        finish: |digest| digest.lo(),
    }
}

progressive_hasher! {
    /// Owned progressive MurmurHash3_x86_128 stream.
    PMurHash128x86 {
        seed: u32,
        state: [u32; 4],
        block: 16,
        output: Digest128,
        init: pmurhash128x86_init,
        process: pmurhash128x86_process,
        process_bytes: pmurhash128x86_process_bytes,
        result: pmurhash128x86_result,
        finish: |digest| digest.lo(),
    }
}

/// Builds seeded [`PMurHash128`] hashers; `finish` yields lane `h1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildPMurHash128 {
    seed: u64,
}

impl BuildPMurHash128 {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BuildHasher for BuildPMurHash128 {
    type Hasher = PMurHash128;

    fn build_hasher(&self) -> PMurHash128 {
        PMurHash128::new(self.seed)
    }
}
