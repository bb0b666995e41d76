//! One-shot MurmurHash3.
//!
//! Every function walks the buffer block by block and never reads past its
//! end; the trailing partial block is zero-padded on a small stack copy.

use crate::digest::Digest128;
use crate::mix::{self, X128_BLOCK, X86_32_BLOCK};

/// MurmurHash3_x86_32.
pub fn murmur3_x86_32(buf: impl AsRef<[u8]>, seed: u32) -> u32 {
    let mut buf = buf.as_ref();
    let len = buf.len() as u64;
    let mut h = seed;
    while let Some((block, rest)) = buf.split_first_chunk::<X86_32_BLOCK>() {
        h = mix::x86_32_block(h, block);
        buf = rest;
    }
    mix::x86_32_finish(h, buf, len)
}

/// MurmurHash3_x86_128.
pub fn murmur3_x86_128(buf: impl AsRef<[u8]>, seed: u32) -> Digest128 {
    let mut buf = buf.as_ref();
    let len = buf.len() as u64;
    let mut h = [seed; 4];
    while let Some((block, rest)) = buf.split_first_chunk::<X128_BLOCK>() {
        mix::x86_128_block(&mut h, block);
        buf = rest;
    }
    Digest128::from_x86_lanes(mix::x86_128_finish(h, buf, len))
}

/// The first 8 output bytes of [`murmur3_x86_128`], read little-endian.
pub fn murmur3_x86_64(buf: impl AsRef<[u8]>, seed: u32) -> u64 {
    murmur3_x86_128(buf, seed).lo()
}

/// MurmurHash3_x64_128.
///
/// The reference takes a 32-bit seed and widens it into both lanes; any
/// `seed < 2^32` gives the reference digest.
pub fn murmur3_x64_128(buf: impl AsRef<[u8]>, seed: u64) -> Digest128 {
    let mut buf = buf.as_ref();
    let len = buf.len() as u64;
    let mut h = [seed; 2];
    while let Some((block, rest)) = buf.split_first_chunk::<X128_BLOCK>() {
        mix::x64_128_block(&mut h, block);
        buf = rest;
    }
    Digest128::from_x64_lanes(mix::x64_128_finish(h, buf, len))
}

/// The first 8 output bytes of [`murmur3_x64_128`] (lane `h1`).
pub fn murmur3_x64_64(buf: impl AsRef<[u8]>, seed: u64) -> u64 {
    murmur3_x64_128(buf, seed).lo()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"samplebiassamplebiassamplebiassamplebiassamplebias\
samplebiassamplebiassamplebiassamplebiassamplebias";

    /// SMHasher's `VerificationTest`: hash `key[..i]` with seed `256 - i` for
    /// every `i`, then hash the concatenated digests with seed 0.
    fn verification<const W: usize>(hash: impl Fn(&[u8], u32) -> [u8; W]) -> u32 {
        let key: Vec<u8> = (0..=255).collect();
        let mut hashes = Vec::with_capacity(W * 256);
        for i in 0..256 {
            hashes.extend_from_slice(&hash(&key[..i], 256 - i as u32));
        }
        let last = hash(&hashes[..], 0);
        u32::from_le_bytes([last[0], last[1], last[2], last[3]])
    }

    #[test]
    fn test_smhasher_verification() {
        assert_eq!(
            verification(|k, s| murmur3_x86_32(k, s).to_le_bytes()),
            0xB0F57EE3
        );
        assert_eq!(
            verification(|k, s| murmur3_x86_128(k, s).to_le_bytes()),
            0xB3ECE62A
        );
        assert_eq!(
            verification(|k, s| murmur3_x64_128(k, s as u64).to_le_bytes()),
            0x6384BA69
        );
    }

    #[test]
    fn test_x86_32_vectors() {
        static TEST_VECTORS: [(u32, u32, &[u8]); 14] = [
            (0, 0, b""),
            (0x514E28B7, 1, b""),
            (0x81F16F39, 0xffffffff, b""),
            (0x76293B50, 0, &[0xff, 0xff, 0xff, 0xff]),
            (0xF55B516B, 0, &[0x21, 0x43, 0x65, 0x87]),
            (0x2362F9DE, 0x5082EDEE, &[0x21, 0x43, 0x65, 0x87]),
            (0x7E4A8634, 0, &[0x21, 0x43, 0x65]),
            (0xA0F7B07A, 0, &[0x21, 0x43]),
            (0x72661CF4, 0, &[0x21]),
            (0x2362F9DE, 0, &[0, 0, 0, 0]),
            (0x85F0B427, 0, &[0, 0, 0]),
            (0x30F4C306, 0, &[0, 0]),
            (0x514E28B7, 0, &[0]),
            (1586663183, 0, b"hello world"),
        ];

        for &(expected, seed, input) in TEST_VECTORS.iter() {
            assert_eq!(murmur3_x86_32(input, seed), expected, "{input:?}");
        }
    }

    #[test]
    fn test_golden_sample() {
        assert_eq!(SAMPLE, "samplebias".repeat(10).as_bytes());
        assert_eq!(murmur3_x86_32(SAMPLE, 0), 0x3728fb13);
        assert_eq!(murmur3_x86_64(SAMPLE, 0), 0x17da3a7d9d5796b0);
        assert_eq!(murmur3_x86_64(SAMPLE, 123), 0xab01e9adbca00961);
        assert_eq!(
            murmur3_x86_128(SAMPLE, 0).as_u128(),
            0x4f513be5a317450417da3a7d9d5796b0
        );
        assert_eq!(
            murmur3_x86_128(SAMPLE, 123456789).as_u128(),
            0x116011254a3865ba9abd0d0f9dd63f54
        );
        assert_eq!(
            murmur3_x64_128(SAMPLE, 0).as_u128(),
            0x50dc8c5cd34bde03100e5f8d18e2f18a
        );
        assert_eq!(murmur3_x64_64(SAMPLE, 0), 0x100e5f8d18e2f18a);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            murmur3_x64_128(b"foo", 0).to_le_bytes(),
            *b"aE\xf5\x01W\x86q\xe2\x87}\xba+\xe4\x87\xaf~"
        );
        assert_eq!(
            murmur3_x64_128(b"foo", 42).as_u128(),
            215966891540331383248189432718888555506
        );
        assert_eq!(
            murmur3_x64_128(b"hello", 0).as_u128(),
            0x5b1e906a48ae1d19cbd8a7b341bd9b02
        );
        assert_eq!(
            murmur3_x86_128(b"hello", 0).as_u128(),
            0x9adb31b69adb31b6db91def72b2444a0
        );
        let fox = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(murmur3_x86_32(fox, 0), 0x2e4ff723);
        assert_eq!(
            murmur3_x86_128(fox, 0).as_u128(),
            0xe5e91d2c5d7bf66cecee2c672f1583c3
        );
        assert_eq!(
            murmur3_x64_128(fox, 0).as_u128(),
            0x7a433ca9c49a9347e34bbc7bbc071b6c
        );
    }

    #[test]
    fn test_big_endian_rendering() {
        // Bindings that print the output bytes as one big-endian integer.
        let bytes = murmur3_x86_128(SAMPLE, 0).to_le_bytes();
        assert_eq!(
            u64::from_be_bytes(bytes[..8].try_into().unwrap()),
            0xb096579d7d3ada17
        );
        assert_eq!(
            u64::from_be_bytes(bytes[..8].try_into().unwrap()),
            murmur3_x86_64(SAMPLE, 0).swap_bytes()
        );
        assert_eq!(
            u128::from_be_bytes(bytes),
            0xb096579d7d3ada17044517a3e53b514f
        );
        assert_eq!(
            u128::from_be_bytes(murmur3_x64_128(SAMPLE, 0).to_le_bytes()),
            0x8af1e2188d5f0e1003de4bd35c8cdc50
        );
    }

    #[test]
    fn test_wide_seed() {
        assert_eq!(
            murmur3_x64_128(b"hello", 1 << 40).as_u128(),
            0xe1a103f6e1844b350f19e1798e28b210
        );
        assert_ne!(murmur3_x64_128(b"hello", 1 << 40), murmur3_x64_128(b"hello", 0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(murmur3_x86_32(b"", 0), 0);
        assert_eq!(murmur3_x86_64(b"", 0), 0);
        assert_eq!(murmur3_x86_128(b"", 0).as_u128(), 0);
        assert_eq!(murmur3_x64_128(b"", 0).as_u128(), 0);
        assert_eq!(murmur3_x64_64(b"", 0), 0);
        assert_eq!(
            murmur3_x86_128(b"", 1).as_u128(),
            0x54d201b954d201b954d201b988c4adec
        );
        assert_eq!(
            murmur3_x64_128(b"", 1).as_u128(),
            0x51622daa78f835834610abe56eff5cb5
        );
    }

    #[test]
    fn test_cross_variant_independence() {
        for input in [&b"a"[..], b"hello", SAMPLE, &[0u8; 33]] {
            for seed in [0u32, 1, 0xdeadbeef] {
                assert_ne!(
                    murmur3_x86_128(input, seed),
                    murmur3_x64_128(input, seed as u64)
                );
            }
        }
    }

    #[test]
    fn test() {
        let mut t: u128 = 0;

        for i in 0..64u32 {
            let seed = i.wrapping_mul(0x9e3779b9);
            let mut size = 1;
            loop {
                let m = vec![i as u8; size];
                t = t.wrapping_add(murmur3_x64_128(&m, seed as u64).as_u128());
                t = t.wrapping_add(murmur3_x86_128(&m, seed).as_u128());
                t = t.wrapping_add(murmur3_x86_32(&m, seed) as u128);
                if size >= 4096 {
                    break;
                }
                size *= 2;
            }
        }

        assert_eq!(t, 0xb732292628a5ccdd73efb06306bba0c8);
    }
}
