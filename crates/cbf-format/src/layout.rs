//! Segment ordering and address resolution.
//!
//! Planning happens in two steps so that no segment needs an address before
//! every size is known:
//! 1. [`Layout::plan`] orders `(id, size)` pairs and assigns cumulative offsets
//! 2. [`Layout::resolve`] turns an address or size reference into a
//!    fixed-width field, checking that it fits
//!
//! Order: the header first, then the tables ascending by size, then the data
//! segments ascending by size. Ties keep the order the segments were given in.

use std::collections::HashMap;
use std::fmt;

use cbf_core::{Diagnostics, ErrorKind};

use crate::primitives::{fits, int_to_bytes};

/// Name of one segment of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentId {
    Header,
    BytecodeTable,
    PropertiesTable,
    /// Bytes of the n-th bytecode variant.
    BytecodeData(usize),
    /// Payload of the n-th encoded property value.
    PropertyData(usize),
}

impl SegmentId {
    fn rank(self) -> u8 {
        match self {
            Self::Header => 0,
            Self::BytecodeTable | Self::PropertiesTable => 1,
            Self::BytecodeData(_) | Self::PropertyData(_) => 2,
        }
    }

    pub fn is_table(self) -> bool {
        self.rank() == 1
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::BytecodeTable => f.write_str("bytecode-table"),
            Self::PropertiesTable => f.write_str("properties-table"),
            Self::BytecodeData(i) => write!(f, "bytecode-data[{i}]"),
            Self::PropertyData(i) => write!(f, "property-data[{i}]"),
        }
    }
}

/// A segment with its resolved offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub id: SegmentId,
    pub offset: usize,
    pub size: usize,
}

impl Placement {
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// A field that stores another segment's address or size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    AddressOf(SegmentId),
    SizeOf(SegmentId),
}

impl Reference {
    fn target(self) -> SegmentId {
        match self {
            Self::AddressOf(id) | Self::SizeOf(id) => id,
        }
    }

    fn what(self) -> &'static str {
        match self {
            Self::AddressOf(_) => "address",
            Self::SizeOf(_) => "size",
        }
    }
}

/// Final segment order with offsets.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    placements: Vec<Placement>,
    index: HashMap<SegmentId, usize>,
}

impl Layout {
    /// Order the segments and assign each the cumulative size of those before it.
    pub fn plan(segments: impl IntoIterator<Item = (SegmentId, usize)>) -> Self {
        let mut segments: Vec<(SegmentId, usize)> = segments.into_iter().collect();
        // Stable: equal keys keep construction order.
        segments.sort_by_key(|&(id, size)| (id.rank(), size));

        let mut placements = Vec::with_capacity(segments.len());
        let mut index = HashMap::with_capacity(segments.len());
        let mut offset = 0;
        for (id, size) in segments {
            index.insert(id, placements.len());
            placements.push(Placement { id, offset, size });
            offset += size;
        }

        Self { placements, index }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, id: SegmentId) -> Option<&Placement> {
        self.index.get(&id).map(|&i| &self.placements[i])
    }

    pub fn address_of(&self, id: SegmentId) -> Option<usize> {
        self.get(id).map(|p| p.offset)
    }

    pub fn size_of(&self, id: SegmentId) -> Option<usize> {
        self.get(id).map(|p| p.size)
    }

    /// Total file size.
    pub fn total_size(&self) -> usize {
        self.placements.last().map_or(0, Placement::end)
    }

    /// Encode `reference` as a `width`-byte big-endian field stored at `field_offset`.
    ///
    /// A reference to an unplanned segment is an internal error; a value wider
    /// than the field is an overflow. Both are reported and encoded as zeros so
    /// the rest of the file can still be checked.
    pub fn resolve(
        &self,
        reference: Reference,
        width: usize,
        field_offset: usize,
        diag: &mut Diagnostics,
    ) -> Vec<u8> {
        let target = reference.target();
        let value = match reference {
            Reference::AddressOf(id) => self.address_of(id),
            Reference::SizeOf(id) => self.size_of(id),
        };

        let Some(value) = value else {
            diag.report(ErrorKind::Internal)
                .message(format!("reference to unplanned segment `{target}`"))
                .at(field_offset)
                .emit();
            return vec![0; width];
        };

        if !fits(value as u64, width) {
            diag.report(ErrorKind::Overflow)
                .message(format!(
                    "{} of `{target}` ({value}) does not fit {width} byte(s)",
                    reference.what()
                ))
                .at(field_offset)
                .emit();
            return vec![0; width];
        }

        int_to_bytes(value as u64, width)
    }
}
