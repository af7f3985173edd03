//! Binary payload type

use serde::{Deserialize, Serialize};

/// Generic binary subtype.
pub const SUBTYPE_GENERIC: u8 = 0x00;

/// Read-only view over a run of bytes: length plus indexed access.
///
/// The comparator treats anything implementing this as a byte container.
pub trait ByteView {
    fn byte_len(&self) -> usize;
    fn byte_at(&self, index: usize) -> Option<u8>;
}

impl ByteView for [u8] {
    fn byte_len(&self) -> usize {
        self.len()
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.get(index).copied()
    }
}

impl ByteView for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.get(index).copied()
    }
}

/// Binary payload stored on a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binary {
    pub subtype: u8,
    pub bytes: Vec<u8>,
}

impl Binary {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_subtype(SUBTYPE_GENERIC, bytes)
    }

    pub fn with_subtype(subtype: u8, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            subtype,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn subtype(&self) -> u8 {
        self.subtype
    }
}

impl ByteView for Binary {
    fn byte_len(&self) -> usize {
        self.len()
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.get(index)
    }
}

impl From<&str> for Binary {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

/// Byte-for-byte comparison of any two byte views.
pub fn bytes_equal(a: &(impl ByteView + ?Sized), b: &(impl ByteView + ?Sized)) -> bool {
    let len = a.byte_len();
    if len != b.byte_len() {
        return false;
    }
    (0..len).all(|i| a.byte_at(i) == b.byte_at(i))
}
