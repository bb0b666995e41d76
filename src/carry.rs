//! Bytes received by a progressive hasher that do not yet form a full block.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Pending tail bytes of an incremental hash over `N`-byte blocks.
///
/// Holds between `0` and `N - 1` bytes. A carry that would reach `N` bytes is
/// always drained into the hash state first, so a full carry can never be
/// observed or passed back in.
#[derive(Clone, Copy)]
pub struct Carry<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Carry<N> {
    /// Block size this carry belongs to.
    pub const BLOCK_SIZE: usize = N;

    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// Rebuilds a carry from bytes saved earlier with [`as_bytes`](Self::as_bytes).
    ///
    /// Fails with [`Error::InvalidState`] if `bytes` holds a full block or more.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() >= N {
            return Err(Error::invalid_state(bytes.len(), N));
        }
        let mut carry = Self::new();
        carry.buf[..bytes.len()].copy_from_slice(bytes);
        carry.len = bytes.len();
        Ok(carry)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks that a stream of `total_len` bytes would leave exactly this
    /// many bytes pending.
    pub(crate) fn check_total_len(&self, total_len: u64) -> Result<()> {
        let pending = total_len % N as u64;
        if pending != self.len as u64 {
            return Err(Error::invalid_argument(format!(
                "total length {total_len} leaves {pending} pending bytes, carry holds {}",
                self.len
            )));
        }
        Ok(())
    }

    /// Appends one byte, returning the completed block if it fills the carry.
    #[inline(always)]
    pub(crate) fn push(&mut self, byte: u8) -> Option<[u8; N]> {
        self.buf[self.len] = byte;
        self.len += 1;
        if self.len == N {
            self.len = 0;
            Some(self.buf)
        } else {
            None
        }
    }

    /// Feeds `data`, handing every completed block to `mix` in input order.
    ///
    /// Whole blocks are read straight from `data`; only the bytes needed to
    /// top up a partial carry, and the final remainder, are copied.
    pub(crate) fn absorb(&mut self, mut data: &[u8], mut mix: impl FnMut(&[u8; N])) {
        if self.len != 0 {
            let take = (N - self.len).min(data.len());
            let head;
            (head, data) = data.split_at(take);
            self.buf[self.len..self.len + take].copy_from_slice(head);
            self.len += take;
            if self.len < N {
                return;
            }
            mix(&self.buf);
            self.len = 0;
        }

        while let Some((block, rest)) = data.split_first_chunk::<N>() {
            mix(block);
            data = rest;
        }

        self.buf[..data.len()].copy_from_slice(data);
        self.len = data.len();
    }
}

impl<const N: usize> Default for Carry<N> {
    fn default() -> Self {
        Self::new()
    }
}

// Bytes past `len` are stale leftovers of drained blocks.
impl<const N: usize> PartialEq for Carry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for Carry<N> {}

impl<const N: usize> Hash for Carry<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<const N: usize> fmt::Debug for Carry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Carry").field(&self.as_bytes()).finish()
    }
}

impl<const N: usize> TryFrom<&[u8]> for Carry<N> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drains_full_block() {
        let mut carry = Carry::<4>::new();
        assert_eq!(carry.push(1), None);
        assert_eq!(carry.push(2), None);
        assert_eq!(carry.push(3), None);
        assert_eq!(carry.as_bytes(), &[1, 2, 3]);
        assert_eq!(carry.push(4), Some([1, 2, 3, 4]));
        assert!(carry.is_empty());
        assert_eq!(carry.push(5), None);
        assert_eq!(carry.as_bytes(), &[5]);
    }

    #[test]
    fn test_absorb_matches_push() {
        let data: Vec<u8> = (0..=40).collect();
        for split in 0..data.len() {
            let mut pushed = Vec::new();
            let mut a = Carry::<16>::new();
            for &b in &data {
                if let Some(block) = a.push(b) {
                    pushed.push(block);
                }
            }

            let mut absorbed = Vec::new();
            let mut b = Carry::<16>::new();
            let (x, y) = data.split_at(split);
            b.absorb(x, |block| absorbed.push(*block));
            b.absorb(y, |block| absorbed.push(*block));

            assert_eq!(pushed, absorbed, "split at {split}");
            assert_eq!(a, b);
            assert_eq!(b.len(), data.len() % 16);
        }
    }

    #[test]
    fn test_absorb_short_top_up() {
        let mut carry = Carry::<4>::from_bytes(&[9]).unwrap();
        let mut blocks = 0;
        carry.absorb(&[8], |_| blocks += 1);
        assert_eq!(blocks, 0);
        assert_eq!(carry.as_bytes(), &[9, 8]);
        carry.absorb(&[7, 6, 5], |block| {
            assert_eq!(block, &[9, 8, 7, 6]);
            blocks += 1;
        });
        assert_eq!(blocks, 1);
        assert_eq!(carry.as_bytes(), &[5]);
    }

    #[test]
    fn test_from_bytes_rejects_full_block() {
        assert_eq!(Carry::<4>::from_bytes(&[1, 2, 3]).unwrap().len(), 3);
        assert!(matches!(
            Carry::<4>::from_bytes(&[1, 2, 3, 4]),
            Err(Error::InvalidState {
                len: 4,
                block_size: 4
            })
        ));
        assert!(Carry::<16>::try_from(&[0u8; 17][..]).is_err());
        assert_eq!(Carry::<16>::BLOCK_SIZE, 16);
    }

    #[test]
    fn test_check_total_len() {
        let carry = Carry::<16>::from_bytes(&[1, 2]).unwrap();
        assert!(carry.check_total_len(2).is_ok());
        assert!(carry.check_total_len(34).is_ok());
        assert!(matches!(
            carry.check_total_len(16),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Carry::<4>::new().check_total_len(0).is_ok());
    }

    #[test]
    fn test_debug_shows_pending_bytes_only() {
        let carry = Carry::<4>::from_bytes(&[0xaa]).unwrap();
        assert_eq!(format!("{carry:?}"), "Carry([170])");
    }
}
