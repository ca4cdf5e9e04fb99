//! Fixed sizes and markers of the binary layout.

/// Magic bytes at offset 0.
pub const MAGIC: [u8; 3] = *b"CBF";

/// The only format version this crate reads and writes.
pub const VERSION: u8 = 0;

/// Header size: magic, version, two 1-byte table pointers.
pub const HEADER_SIZE: usize = 6;

/// Bytecode table entry: platform tag, 2-byte address, 2-byte size.
pub const BYTECODE_ENTRY_SIZE: usize = 5;

/// Properties table entry: kind, 2-byte address.
pub const PROPERTY_ENTRY_SIZE: usize = 3;

/// Tag or kind byte that ends a table.
pub const TERMINATOR: u8 = 0x00;

/// Width of the header's table pointers.
pub const TABLE_POINTER_WIDTH: usize = 1;

/// Width of in-table addresses and sizes.
pub const DATA_POINTER_WIDTH: usize = 2;

/// Longest string payload, leaving room for the NUL terminator in a 2-byte
/// addressable segment.
pub const MAX_STRING_LEN: usize = 65_534;
