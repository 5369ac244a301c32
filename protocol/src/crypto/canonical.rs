//! Canonical byte encodings for signing.
//!
//! Anything a wallet signs implements [`Signable`]. The encoding must be a
//! function of the value's logical content only: two values that compare
//! equal must produce identical bytes, whatever order their parts were
//! assembled in. JSON is avoided for the same reason.

/// A value with a deterministic byte encoding suitable for signing.
pub trait Signable {
    /// Canonical bytes for this value.
    fn signable_bytes(&self) -> Vec<u8>;
}

impl Signable for [u8] {
    fn signable_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl Signable for str {
    fn signable_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Signable for String {
    fn signable_bytes(&self) -> Vec<u8> {
        self.as_str().signable_bytes()
    }
}

impl<T: Signable + ?Sized> Signable for &T {
    fn signable_bytes(&self) -> Vec<u8> {
        (**self).signable_bytes()
    }
}

/// Appends `bytes` with a little-endian `u32` length prefix.
///
/// Length prefixes keep concatenated fields unambiguous: `("ab", "c")` and
/// `("a", "bc")` encode differently.
pub fn put_length_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}
