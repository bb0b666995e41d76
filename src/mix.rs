//! Round functions, tail mixes and finalization mixes shared by the one-shot
//! and progressive hashers.
//!
//! Keeping a single copy of every step here is what makes the progressive
//! hashers agree bit-for-bit with the one-shot ones: both feed the same
//! blocks through the same functions, and differ only in where the blocks
//! come from.

pub(crate) const X86_32_BLOCK: usize = 4;
pub(crate) const X128_BLOCK: usize = 16;

#[inline(always)]
fn scramble32(k: u32) -> u32 {
    k.wrapping_mul(C1_X86_32)
        .rotate_left(15)
        .wrapping_mul(C2_X86_32)
}

#[inline(always)]
pub(crate) fn x86_32_block(h: u32, block: &[u8; X86_32_BLOCK]) -> u32 {
    let h = h ^ scramble32(u32::from_le_bytes(*block));
    h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe6546b64)
}

/// Mixes the 0..=3 trailing bytes and the length, then avalanches.
///
/// A zero word scrambles to zero, so an empty tail leaves `h` untouched and
/// needs no special case.
#[inline(always)]
pub(crate) fn x86_32_finish(h: u32, tail: &[u8], len: u64) -> u32 {
    debug_assert!(tail.len() < X86_32_BLOCK);
    let h = h ^ scramble32(le_u32_0_4(tail));
    fmix32(h ^ len as u32)
}

#[inline(always)]
fn scramble_x86_128(block: &[u8; X128_BLOCK]) -> [u32; 4] {
    let mut k = [0u32; 4];
    for (i, word) in k.iter_mut().enumerate() {
        let mut tmp = [0u8; 4];
        tmp.copy_from_slice(&block[4 * i..][..4]);
        *word = u32::from_le_bytes(tmp)
            .wrapping_mul(X86_128_C[i])
            .rotate_left(X86_128_KROT[i])
            .wrapping_mul(X86_128_C[(i + 1) & 3]);
    }
    k
}

#[inline(always)]
pub(crate) fn x86_128_block(h: &mut [u32; 4], block: &[u8; X128_BLOCK]) {
    let k = scramble_x86_128(block);
    // Each lane is folded in before the next one sees its own key word, and
    // the last lane already reads the updated first lane.
    for i in 0..4 {
        h[i] ^= k[i];
        h[i] = h[i]
            .rotate_left(X86_128_HROT[i])
            .wrapping_add(h[(i + 1) & 3])
            .wrapping_mul(5)
            .wrapping_add(X86_128_N[i]);
    }
}

#[inline(always)]
pub(crate) fn x86_128_finish(mut h: [u32; 4], tail: &[u8], len: u64) -> [u32; 4] {
    debug_assert!(tail.len() < X128_BLOCK);
    let mut padded = [0u8; X128_BLOCK];
    padded[..tail.len()].copy_from_slice(tail);
    let k = scramble_x86_128(&padded);
    for i in 0..4 {
        h[i] ^= k[i] ^ len as u32;
    }

    x86_128_cross(&mut h);
    for lane in h.iter_mut() {
        *lane = fmix32(*lane);
    }
    x86_128_cross(&mut h);
    h
}

#[inline(always)]
fn x86_128_cross(h: &mut [u32; 4]) {
    h[0] = h[0]
        .wrapping_add(h[1])
        .wrapping_add(h[2])
        .wrapping_add(h[3]);
    h[1] = h[1].wrapping_add(h[0]);
    h[2] = h[2].wrapping_add(h[0]);
    h[3] = h[3].wrapping_add(h[0]);
}

#[inline(always)]
fn scramble_x64_128(block: &[u8; X128_BLOCK]) -> [u64; 2] {
    let mut tmp = [0u8; 8];
    tmp.copy_from_slice(&block[..8]);
    let k1 = u64::from_le_bytes(tmp);
    tmp.copy_from_slice(&block[8..]);
    let k2 = u64::from_le_bytes(tmp);
    [
        k1.wrapping_mul(C1_X64_128)
            .rotate_left(31)
            .wrapping_mul(C2_X64_128),
        k2.wrapping_mul(C2_X64_128)
            .rotate_left(33)
            .wrapping_mul(C1_X64_128),
    ]
}

#[inline(always)]
pub(crate) fn x64_128_block(h: &mut [u64; 2], block: &[u8; X128_BLOCK]) {
    let k = scramble_x64_128(block);
    h[0] ^= k[0];
    h[0] = h[0]
        .rotate_left(27)
        .wrapping_add(h[1])
        .wrapping_mul(5)
        .wrapping_add(0x52dce729);
    h[1] ^= k[1];
    h[1] = h[1]
        .rotate_left(31)
        .wrapping_add(h[0])
        .wrapping_mul(5)
        .wrapping_add(0x38495ab5);
}

#[inline(always)]
pub(crate) fn x64_128_finish(mut h: [u64; 2], tail: &[u8], len: u64) -> [u64; 2] {
    debug_assert!(tail.len() < X128_BLOCK);
    let mut padded = [0u8; X128_BLOCK];
    padded[..tail.len()].copy_from_slice(tail);
    let k = scramble_x64_128(&padded);
    h[0] ^= k[0] ^ len;
    h[1] ^= k[1] ^ len;

    h[0] = h[0].wrapping_add(h[1]);
    h[1] = h[1].wrapping_add(h[0]);
    h[0] = fmix64(h[0]);
    h[1] = fmix64(h[1]);
    h[0] = h[0].wrapping_add(h[1]);
    h[1] = h[1].wrapping_add(h[0]);
    h
}

#[inline(always)]
pub(crate) fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[inline(always)]
pub(crate) fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}

#[inline(always)]
fn le_u32_0_4(buf: &[u8]) -> u32 {
    let mut tmp = [0u8; 4];
    tmp[..buf.len()].copy_from_slice(buf);
    u32::from_le_bytes(tmp)
}

const C1_X86_32: u32 = 0xcc9e2d51;
const C2_X86_32: u32 = 0x1b873593;

// Lane i scrambles with C[i] then C[i + 1].
const X86_128_C: [u32; 4] = [0x239b961b, 0xab0e9789, 0x38b34ae5, 0xa1e38b93];
const X86_128_KROT: [u32; 4] = [15, 16, 17, 18];
const X86_128_HROT: [u32; 4] = [19, 17, 15, 13];
const X86_128_N: [u32; 4] = [0x561ccd1b, 0x0bcaa747, 0x96cd1c35, 0x32ac3b17];

const C1_X64_128: u64 = 0x87c37b91114253d5;
const C2_X64_128: u64 = 0x4cf5ad432745937f;
