use core::{fmt, str::Utf8Error};
use std::borrow::Cow;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Fixed-capacity, NUL-padded UTF-8 text field.
///
/// The buffer is always exactly `N` bytes. Text shorter than `N` is followed by NUL
/// bytes up to the full width; text of exactly `N` bytes has no terminator. The value
/// read back stops at the first NUL, so text containing NUL is rejected on
/// construction.
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(transparent)]
pub struct FixedStr<const N: usize>([u8; N]);

impl<const N: usize> FixedStr<N> {
    /// Field width in bytes.
    pub const CAPACITY: usize = N;

    /// Encode `text` into a NUL-padded field.
    ///
    /// Fails if the UTF-8 encoding is longer than `N` bytes or contains a NUL.
    pub fn new(text: &str) -> Result<Self, FixedStrError> {
        let bytes = text.as_bytes();
        if bytes.len() > N {
            return Err(FixedStrError::TooLong {
                len: bytes.len(),
                capacity: N,
            });
        }
        if let Some(position) = bytes.iter().position(|&b| b == 0) {
            return Err(FixedStrError::InteriorNul { position });
        }

        let mut buf = [0u8; N];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// An all-NUL field.
    pub const fn empty() -> Self {
        Self([0; N])
    }

    /// The full padded buffer.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// The text bytes, up to (excluding) the first NUL.
    pub fn text_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(N);
        &self.0[..len]
    }

    /// Whether the field holds no text.
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Decode the text as UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.text_bytes())
    }

    /// Decode the text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.text_bytes())
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedStr<{N}>({:?})", self.to_string_lossy())
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const N: usize> TryFrom<&str> for FixedStr<N> {
    type Error = FixedStrError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

/// Text cannot be stored in a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FixedStrError {
    /// Encoded text is wider than the field
    #[error("text too long: {len} bytes (max {capacity})")]
    TooLong {
        /// Encoded length in bytes
        len: usize,
        /// Field width in bytes
        capacity: usize,
    },
    /// Text contains a NUL, which would end the value early
    #[error("text contains NUL at byte {position}")]
    InteriorNul {
        /// Byte offset of the first NUL
        position: usize,
    },
}
