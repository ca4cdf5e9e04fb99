//! File header (6 bytes).
//!
//! Layout:
//! - 0-2: magic `CBF`
//! - 3: version
//! - 4: offset of the bytecode table, 0 when absent
//! - 5: offset of the properties table, 0 when absent

use crate::constants::{HEADER_SIZE, MAGIC, VERSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 3],
    pub version: u8,
    pub bytecode_table: u8,
    pub properties_table: u8,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            bytecode_table: 0,
            properties_table: 0,
        }
    }
}

impl Header {
    /// Decode the header, or `None` if the buffer is shorter than a header.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; HEADER_SIZE] = bytes.get(..HEADER_SIZE)?.try_into().ok()?;
        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2]],
            version: bytes[3],
            bytecode_table: bytes[4],
            properties_table: bytes[5],
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..3].copy_from_slice(&self.magic);
        bytes[3] = self.version;
        bytes[4] = self.bytecode_table;
        bytes[5] = self.properties_table;
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    pub fn bytecode_table_offset(&self) -> Option<usize> {
        pointer(self.bytecode_table)
    }

    pub fn properties_table_offset(&self) -> Option<usize> {
        pointer(self.properties_table)
    }
}

fn pointer(raw: u8) -> Option<usize> {
    (raw != 0).then_some(raw as usize)
}
