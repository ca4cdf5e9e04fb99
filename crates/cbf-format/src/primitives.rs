//! Fixed-width big-endian integers and NUL-terminated ASCII strings.

use crate::constants::MAX_STRING_LEN;

/// Whether `value` fits in `width` bytes.
pub fn fits(value: u64, width: usize) -> bool {
    width >= 8 || value < 1u64 << (8 * width)
}

/// Big-endian encoding of `value` in exactly `width` bytes.
///
/// Callers check [`fits`] first; bytes above `width` are not written.
pub fn int_to_bytes(value: u64, width: usize) -> Vec<u8> {
    let width = width.min(8);
    value.to_be_bytes()[8 - width..].to_vec()
}

/// Big-endian decoding. Always succeeds for up to 8 bytes.
pub fn bytes_to_int(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, &b| (acc << 8) | b as u64)
}

/// Why a string cannot be stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringError {
    NonAscii,
    EmbeddedNul,
    TooLong(usize),
}

/// ASCII bytes of `s` followed by the NUL terminator.
pub fn str_to_bytes(s: &str) -> Result<Vec<u8>, StringError> {
    if !s.is_ascii() {
        return Err(StringError::NonAscii);
    }
    if s.contains('\0') {
        return Err(StringError::EmbeddedNul);
    }
    if s.len() > MAX_STRING_LEN {
        return Err(StringError::TooLong(s.len()));
    }
    let mut bytes = Vec::with_capacity(s.len() + 1);
    bytes.extend_from_slice(s.as_bytes());
    bytes.push(0);
    Ok(bytes)
}

/// Read a NUL-terminated string starting at `bytes[0]`.
///
/// Returns the string and the number of bytes consumed including the
/// terminator, or `None` when the buffer ends first.
pub fn bytes_to_str(bytes: &[u8]) -> Option<Result<(String, usize), StringError>> {
    let len = bytes.iter().position(|&b| b == 0)?;
    let raw = &bytes[..len];
    if !raw.is_ascii() {
        return Some(Err(StringError::NonAscii));
    }
    Some(Ok((String::from_utf8_lossy(raw).into_owned(), len + 1)))
}
