//! Variant selection and a unified streaming hasher.
//!
//! [`Variant`] names every hash function this crate provides. Strings only
//! enter through [`FromStr`] and serde, so dispatch is a `match` over a
//! closed set rather than a lookup by name.

use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::digest::{Digest, Digest128};
use crate::error::{Error, Result};
use crate::murmur3::{murmur3_x64_128, murmur3_x86_128, murmur3_x86_32};
use crate::pmur128::{PMurHash128, PMurHash128x86};
use crate::pmur32::PMurHash32;
use crate::StreamingHasher;

/// Hash variants provided by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Variant {
    /// MurmurHash3_x86_32
    #[serde(rename = "murmur3_x86_32")]
    Murmur3X86_32,
    /// First 64 bits of MurmurHash3_x86_128
    #[serde(rename = "murmur3_x86_64")]
    Murmur3X86_64,
    /// MurmurHash3_x86_128
    #[serde(rename = "murmur3_x86_128")]
    Murmur3X86_128,
    /// First 64 bits of MurmurHash3_x64_128
    #[serde(rename = "murmur3_x64_64")]
    Murmur3X64_64,
    /// MurmurHash3_x64_128
    #[default]
    #[serde(rename = "murmur3_x64_128")]
    Murmur3X64_128,
    /// Progressive MurmurHash3_x86_32
    #[serde(rename = "pmurhash32")]
    PMurHash32,
    /// Progressive MurmurHash3_x64_128
    #[serde(rename = "pmurhash128")]
    PMurHash128,
    /// Progressive MurmurHash3_x86_128
    #[serde(rename = "pmurhash128x86")]
    PMurHash128X86,
}

/// The block engine behind a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    X86_32,
    X86_128,
    X64_128,
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Self::Murmur3X86_32,
        Self::Murmur3X86_64,
        Self::Murmur3X86_128,
        Self::Murmur3X64_64,
        Self::Murmur3X64_128,
        Self::PMurHash32,
        Self::PMurHash128,
        Self::PMurHash128X86,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Murmur3X86_32 => "murmur3_x86_32",
            Self::Murmur3X86_64 => "murmur3_x86_64",
            Self::Murmur3X86_128 => "murmur3_x86_128",
            Self::Murmur3X64_64 => "murmur3_x64_64",
            Self::Murmur3X64_128 => "murmur3_x64_128",
            Self::PMurHash32 => "pmurhash32",
            Self::PMurHash128 => "pmurhash128",
            Self::PMurHash128X86 => "pmurhash128x86",
        }
    }

    const fn engine(&self) -> Engine {
        match self {
            Self::Murmur3X86_32 | Self::PMurHash32 => Engine::X86_32,
            Self::Murmur3X86_64 | Self::Murmur3X86_128 | Self::PMurHash128X86 => Engine::X86_128,
            Self::Murmur3X64_64 | Self::Murmur3X64_128 | Self::PMurHash128 => Engine::X64_128,
        }
    }

    pub const fn digest_bits(&self) -> u32 {
        match self {
            Self::Murmur3X86_32 | Self::PMurHash32 => 32,
            Self::Murmur3X86_64 | Self::Murmur3X64_64 => 64,
            _ => 128,
        }
    }

    pub const fn block_size(&self) -> usize {
        match self.engine() {
            Engine::X86_32 => 4,
            Engine::X86_128 | Engine::X64_128 => 16,
        }
    }

    /// Largest seed the variant accepts.
    pub const fn max_seed(&self) -> u64 {
        match self.engine() {
            Engine::X86_32 | Engine::X86_128 => u32::MAX as u64,
            Engine::X64_128 => u64::MAX,
        }
    }

    /// Whether the variant is conventionally used through the
    /// process/result interface. Every variant can be streamed.
    pub const fn is_progressive(&self) -> bool {
        matches!(
            self,
            Self::PMurHash32 | Self::PMurHash128 | Self::PMurHash128X86
        )
    }

    pub fn check_seed(&self, seed: u64) -> Result<()> {
        if seed > self.max_seed() {
            return Err(Error::invalid_argument(format!(
                "seed {seed:#x} does not fit in {} bits for {self}",
                64 - self.max_seed().leading_zeros()
            )));
        }
        Ok(())
    }

    /// One-shot digest of `buf`. Fails if `seed` is wider than the variant's seed.
    pub fn hash(&self, buf: impl AsRef<[u8]>, seed: u64) -> Result<Digest> {
        self.check_seed(seed)?;
        Ok(self.hash_unchecked(buf.as_ref(), seed))
    }

    /// One-shot digest of `buf` with the default seed of zero.
    pub fn hash_unseeded(&self, buf: impl AsRef<[u8]>) -> Digest {
        self.hash_unchecked(buf.as_ref(), 0)
    }

    fn hash_unchecked(&self, buf: &[u8], seed: u64) -> Digest {
        let digest = match self.engine() {
            Engine::X86_32 => return Digest::U32(murmur3_x86_32(buf, seed as u32)),
            Engine::X86_128 => murmur3_x86_128(buf, seed as u32),
            Engine::X64_128 => murmur3_x64_128(buf, seed),
        };
        self.truncate(digest)
    }

    fn truncate(&self, digest: Digest128) -> Digest {
        if self.digest_bits() == 64 {
            Digest::U64(digest.lo())
        } else {
            Digest::U128(digest)
        }
    }

    /// Starts a stream seeded with `seed`.
    pub fn hasher(&self, seed: u64) -> Result<Murmur3Hasher> {
        self.check_seed(seed)?;
        let stream = match self.engine() {
            Engine::X86_32 => Stream::X86_32(PMurHash32::new(seed as u32)),
            Engine::X86_128 => Stream::X86_128(PMurHash128x86::new(seed as u32)),
            Engine::X64_128 => Stream::X64_128(PMurHash128::new(seed)),
        };
        Ok(Murmur3Hasher {
            variant: *self,
            stream,
        })
    }

    /// Rebuilds a stream saved with [`Murmur3Hasher::raw_state`],
    /// [`Murmur3Hasher::carry`] and [`Murmur3Hasher::total_len`].
    ///
    /// `state` packs the accumulator lanes little-endian, the same way
    /// [`Digest128`] packs output lanes. For the 32-bit engine it must fit in
    /// a `u32`.
    pub fn resume(&self, state: u128, carry: &[u8], total_len: u64) -> Result<Murmur3Hasher> {
        let stream = match self.engine() {
            Engine::X86_32 => {
                let h = u32::try_from(state).map_err(|_| {
                    Error::invalid_argument(format!(
                        "state {state:#x} does not fit in 32 bits for {self}"
                    ))
                })?;
                Stream::X86_32(PMurHash32::from_parts(h, carry, total_len)?)
            }
            Engine::X86_128 => {
                let h = [
                    state as u32,
                    (state >> 32) as u32,
                    (state >> 64) as u32,
                    (state >> 96) as u32,
                ];
                Stream::X86_128(PMurHash128x86::from_parts(h, carry, total_len)?)
            }
            Engine::X64_128 => {
                let h = [state as u64, (state >> 64) as u64];
                Stream::X64_128(PMurHash128::from_parts(h, carry, total_len)?)
            }
        };
        Ok(Murmur3Hasher {
            variant: *self,
            stream,
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| Error::invalid_argument(format!("unknown hash variant {s:?}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    X86_32(PMurHash32),
    X86_128(PMurHash128x86),
    X64_128(PMurHash128),
}

/// Streaming hasher for any [`Variant`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3Hasher {
    variant: Variant,
    stream: Stream,
}

impl Murmur3Hasher {
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.stream {
            Stream::X86_32(h) => h.update(data),
            Stream::X86_128(h) => h.update(data),
            Stream::X64_128(h) => h.update(data),
        }
    }

    /// Digest of everything fed so far, at the variant's width.
    pub fn finalize(&self) -> Digest {
        match &self.stream {
            Stream::X86_32(h) => Digest::U32(h.finalize()),
            Stream::X86_128(h) => self.variant.truncate(h.finalize()),
            Stream::X64_128(h) => self.variant.truncate(h.finalize()),
        }
    }

    pub const fn total_len(&self) -> u64 {
        match &self.stream {
            Stream::X86_32(h) => h.total_len(),
            Stream::X86_128(h) => h.total_len(),
            Stream::X64_128(h) => h.total_len(),
        }
    }

    /// Accumulator lanes packed into one integer, for [`Variant::resume`].
    pub fn raw_state(&self) -> u128 {
        match &self.stream {
            Stream::X86_32(h) => h.state() as u128,
            Stream::X86_128(h) => Digest128::from_x86_lanes(h.state()).as_u128(),
            Stream::X64_128(h) => Digest128::from_x64_lanes(h.state()).as_u128(),
        }
    }

    /// Bytes waiting for a full block.
    pub fn carry(&self) -> &[u8] {
        match &self.stream {
            Stream::X86_32(h) => h.carry().as_bytes(),
            Stream::X86_128(h) => h.carry().as_bytes(),
            Stream::X64_128(h) => h.carry().as_bytes(),
        }
    }
}

impl StreamingHasher for Murmur3Hasher {
    type Output = Digest;

    fn update(&mut self, data: &[u8]) {
        Murmur3Hasher::update(self, data);
    }

    fn finalize(&self) -> Digest {
        Murmur3Hasher::finalize(self)
    }

    fn total_len(&self) -> u64 {
        Murmur3Hasher::total_len(self)
    }
}

impl io::Write for Murmur3Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hashes everything `reader` yields without holding it in memory at once.
pub fn hash_reader(variant: Variant, seed: u64, reader: impl Read) -> Result<Digest> {
    let mut hasher = variant.hasher(seed)?;
    let bytes = hasher.update_reader(reader)?;
    let digest = hasher.finalize();
    tracing::debug!(%variant, bytes, %digest, "hashed stream");
    Ok(digest)
}
