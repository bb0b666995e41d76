//! MurmurHash3 one-shot hashers and their progressive (PMurHash) counterparts.
//!
//! The one-shot functions hash a complete buffer. The progressive ones thread
//! an explicit `(state, carry, total_length)` triple through every call, so a
//! stream can be fed in chunks of any size, paused, serialized and resumed;
//! finalizing always gives the same digest as the one-shot function over the
//! bytes seen so far.
//!
//! ```
//! use murmur3_stream::{murmur3_x86_32, Carry, pmurhash32_init, pmurhash32_process, pmurhash32_result};
//!
//! let text = b"samplebias";
//! let (mut state, mut carry) = (pmurhash32_init(42), Carry::new());
//! for &byte in text {
//!     (state, carry) = pmurhash32_process(state, carry, byte);
//! }
//! let digest = pmurhash32_result(state, &carry, text.len() as u64);
//! assert_eq!(digest, murmur3_x86_32(text, 42));
//! ```
//!
//! None of these functions are suitable where collision resistance against
//! an adversary matters.

use std::io::{ErrorKind, Read};

#[macro_use]
mod macros;

mod carry;
mod config;
mod digest;
mod error;
mod mix;
mod murmur3;
mod pmur128;
mod pmur32;
mod variant;

pub use carry::Carry;
pub use config::HashSpec;
pub use digest::{Digest, Digest128};
pub use error::{Error, Result};
pub use murmur3::{murmur3_x64_128, murmur3_x64_64, murmur3_x86_128, murmur3_x86_32, murmur3_x86_64};
pub use pmur128::{
    pmurhash128_init, pmurhash128_process, pmurhash128_process_bytes, pmurhash128_result,
    pmurhash128x86_init, pmurhash128x86_process, pmurhash128x86_process_bytes,
    pmurhash128x86_result, BuildPMurHash128, PMurHash128, PMurHash128x86,
};
pub use pmur32::{
    pmurhash32_init, pmurhash32_process, pmurhash32_process_bytes, pmurhash32_result,
    BuildPMurHash32, PMurHash32,
};
pub use variant::{hash_reader, Murmur3Hasher, Variant};

/// Chunk size used when draining a reader into a hasher.
pub const READ_CHUNK: usize = 64 * 1024;

/// A hasher that accepts input in pieces and can be finalized at any point.
///
/// `finalize` does not consume or disturb the hasher: more input may follow,
/// and each call returns the digest of everything fed so far.
pub trait StreamingHasher {
    type Output;

    fn update(&mut self, data: &[u8]);

    fn finalize(&self) -> Self::Output;

    /// Number of bytes fed so far.
    fn total_len(&self) -> u64;

    /// Feeds everything `reader` yields, [`READ_CHUNK`] bytes at a time.
    /// Returns the number of bytes read.
    fn update_reader(&mut self, mut reader: impl Read) -> Result<u64>
    where
        Self: Sized,
    {
        let mut buf = vec![0u8; READ_CHUNK];
        let mut read = 0u64;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.update(&buf[..n]);
            read += n as u64;
            tracing::trace!(chunk = n, read, "absorbed chunk");
        }
        Ok(read)
    }
}
