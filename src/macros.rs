//! Owned stream wrappers over the free `init`/`process`/`result` functions.

/// Defines an owned hasher that threads `(state, carry, total_len)` through
/// an engine's free functions, along with its `StreamingHasher`, `Hasher`
/// and `io::Write` impls.
///
/// The length counter wraps: the engines only ever fold it modulo 2^32 or
/// 2^64, so a stream resumed near `u64::MAX` keeps hashing.
macro_rules! progressive_hasher {
    (
        $(#[$meta:meta])*
        $name:ident {
            seed: $seed:ty,
            state: $state:ty,
            block: $block:literal,
            output: $output:ty,
            init: $init:path,
            process: $process:path,
            process_bytes: $process_bytes:path,
            result: $result:path,
            finish: |$digest:ident| $finish:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            h: $state,
            carry: $crate::carry::Carry<$block>,
            total_len: u64,
        }

        impl $name {
            pub const fn new(seed: $seed) -> Self {
                Self {
                    h: $init(seed),
                    carry: $crate::carry::Carry::new(),
                    total_len: 0,
                }
            }

            /// Resumes a stream from a saved `(state, carry, total_len)` triple.
            ///
            #[doc = concat!("The carry must hold fewer than ", stringify!($block), " bytes and agree with `total_len`.")]
            pub fn from_parts(
                state: $state,
                carry: &[u8],
                total_len: u64,
            ) -> $crate::error::Result<Self> {
                let carry = $crate::carry::Carry::from_bytes(carry)?;
                carry.check_total_len(total_len)?;
                Ok(Self {
                    h: state,
                    carry,
                    total_len,
                })
            }

            pub fn update(&mut self, data: &[u8]) {
                (self.h, self.carry) = $process_bytes(self.h, self.carry, data);
                self.total_len = self.total_len.wrapping_add(data.len() as u64);
            }

            pub fn update_byte(&mut self, byte: u8) {
                (self.h, self.carry) = $process(self.h, self.carry, byte);
                self.total_len = self.total_len.wrapping_add(1);
            }

            pub fn finalize(&self) -> $output {
                $result(self.h, &self.carry, self.total_len)
            }

            pub const fn state(&self) -> $state {
                self.h
            }

            pub const fn carry(&self) -> &$crate::carry::Carry<$block> {
                &self.carry
            }

            pub const fn total_len(&self) -> u64 {
                self.total_len
            }
        }

        impl $crate::StreamingHasher for $name {
            type Output = $output;

            fn update(&mut self, data: &[u8]) {
                $name::update(self, data);
            }

            fn finalize(&self) -> $output {
                $name::finalize(self)
            }

            fn total_len(&self) -> u64 {
                self.total_len
            }
        }

        impl ::std::hash::Hasher for $name {
            fn write(&mut self, bytes: &[u8]) {
                self.update(bytes);
            }

            fn write_u8(&mut self, i: u8) {
                self.update_byte(i);
            }

            fn finish(&self) -> u64 {
                let $digest = self.finalize();
                $finish
            }
        }

        impl ::std::io::Write for $name {
            fn write(&mut self, buf: &[u8]) -> ::std::io::Result<usize> {
                self.update(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> ::std::io::Result<()> {
                Ok(())
            }
        }
    };
}
