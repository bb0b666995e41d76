use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 128-bit digest stored as two 64-bit lanes.
///
/// The reference algorithms write 16 output bytes. `lo` is the little-endian
/// value of bytes `0..8` and `hi` the value of bytes `8..16`, so
/// [`as_u128`](Self::as_u128) equals `u128::from_le_bytes(out)`:
///
/// * x64 engines: `lo = h1`, `hi = h2`.
/// * x86 engines: `lo = h2 << 32 | h1`, `hi = h4 << 32 | h3`.
///
/// Formatting prints the 128-bit value most significant digit first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Digest128 {
    lo: u64,
    hi: u64,
}

impl Digest128 {
    pub const fn from_lanes(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    pub(crate) const fn from_x64_lanes(h: [u64; 2]) -> Self {
        Self::from_lanes(h[0], h[1])
    }

    pub(crate) const fn from_x86_lanes(h: [u32; 4]) -> Self {
        Self::from_lanes(
            ((h[1] as u64) << 32) | h[0] as u64,
            ((h[3] as u64) << 32) | h[2] as u64,
        )
    }

    /// Bytes `0..8` of the reference output, little-endian.
    pub const fn lo(&self) -> u64 {
        self.lo
    }

    /// Bytes `8..16` of the reference output, little-endian.
    pub const fn hi(&self) -> u64 {
        self.hi
    }

    pub const fn as_u128(&self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    /// The 16 bytes exactly as the reference implementation writes them.
    pub fn to_le_bytes(&self) -> [u8; 16] {
        self.as_u128().to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        u128::from_le_bytes(bytes).into()
    }

    /// Lowercase hex, 32 digits, most significant first.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_u128().to_be_bytes())
    }
}

impl From<u128> for Digest128 {
    fn from(v: u128) -> Self {
        Self::from_lanes(v as u64, (v >> 64) as u64)
    }
}

impl From<Digest128> for u128 {
    fn from(d: Digest128) -> Self {
        d.as_u128()
    }
}

impl From<Digest128> for String {
    fn from(d: Digest128) -> Self {
        d.to_hex()
    }
}

impl TryFrom<String> for Digest128 {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for Digest128 {
    type Err = Error;

    /// Parses exactly 32 hex digits, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
            Error::invalid_argument(format!("malformed 128-bit digest {s:?}: {e}"))
        })?;
        Ok(u128::from_be_bytes(bytes).into())
    }
}

impl fmt::LowerHex for Digest128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.as_u128(), f)
    }
}

impl fmt::UpperHex for Digest128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.as_u128(), f)
    }
}

impl fmt::Display for Digest128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

/// A digest tagged with its width, as returned by [`Variant`](crate::Variant) dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Digest {
    U32(u32),
    U64(u64),
    U128(Digest128),
}

impl Digest {
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U32(_) => 32,
            Self::U64(_) => 64,
            Self::U128(_) => 128,
        }
    }

    /// The digest zero-extended to 128 bits.
    pub const fn as_u128(&self) -> u128 {
        match self {
            Self::U32(v) => *v as u128,
            Self::U64(v) => *v as u128,
            Self::U128(v) => v.as_u128(),
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U32(v) => write!(f, "{v:08x}"),
            Self::U64(v) => write!(f, "{v:016x}"),
            Self::U128(v) => write!(f, "{v}"),
        }
    }
}

impl From<u32> for Digest {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<u64> for Digest {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<Digest128> for Digest {
    fn from(v: Digest128) -> Self {
        Self::U128(v)
    }
}
