//! Serializable hash configuration.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::Result;
use crate::variant::{hash_reader, Murmur3Hasher, Variant};

/// Which variant to run and with what seed.
///
/// Both fields are optional when deserializing: the variant defaults to
/// `murmur3_x64_128` and the seed to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashSpec {
    /// Hash variant
    pub variant: Variant,
    /// Seed; must fit the variant's seed width
    pub seed: u64,
}

impl HashSpec {
    pub const fn new(variant: Variant, seed: u64) -> Self {
        Self { variant, seed }
    }

    /// Fails if the seed is wider than the variant accepts.
    pub fn validate(&self) -> Result<()> {
        self.variant.check_seed(self.seed)
    }

    pub fn hash(&self, buf: impl AsRef<[u8]>) -> Result<Digest> {
        self.variant.hash(buf, self.seed)
    }

    pub fn hasher(&self) -> Result<Murmur3Hasher> {
        self.variant.hasher(self.seed)
    }

    pub fn hash_reader(&self, reader: impl Read) -> Result<Digest> {
        hash_reader(self.variant, self.seed, reader)
    }
}
