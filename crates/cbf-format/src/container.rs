//! Packing a cartridge into ordered, fully encoded segments.

use indexmap::IndexMap;

use cbf_core::{BytecodeVariant, Diagnostics, ErrorKind, Platform, PropertyKind, PropertySet};

use crate::constants::{
    BYTECODE_ENTRY_SIZE, DATA_POINTER_WIDTH, HEADER_SIZE, PROPERTY_ENTRY_SIZE,
    TABLE_POINTER_WIDTH, TERMINATOR,
};
use crate::header::Header;
use crate::layout::{Layout, Placement, Reference, SegmentId};
use crate::property_codec::encode_property;

/// One encoded segment at its final offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Segment {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Every segment of a packed file, in file order.
///
/// Concatenating the segments yields the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    segments: Vec<Segment>,
}

impl Container {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn total_size(&self) -> usize {
        self.segments.iter().map(Segment::size).sum()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.total_size());
        for segment in &self.segments {
            bytes.extend_from_slice(&segment.bytes);
        }
        bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.to_bytes()
    }
}

/// Segment content before addresses are known.
enum Body {
    Header,
    BytecodeTable(Vec<(Platform, SegmentId)>),
    PropertiesTable(Vec<(PropertyKind, SegmentId)>),
    Data(Vec<u8>),
}

impl Body {
    fn size(&self) -> usize {
        match self {
            Self::Header => HEADER_SIZE,
            Self::BytecodeTable(entries) => entries.len() * BYTECODE_ENTRY_SIZE + 1,
            Self::PropertiesTable(entries) => entries.len() * PROPERTY_ENTRY_SIZE + 1,
            Self::Data(bytes) => bytes.len(),
        }
    }
}

/// Build, order and encode every segment for `properties` and `variants`.
pub(crate) fn build(
    properties: &PropertySet,
    variants: &[BytecodeVariant],
) -> Result<Container, Diagnostics> {
    let mut diag = Diagnostics::new();

    let mut bodies: IndexMap<SegmentId, Body> = IndexMap::new();
    bodies.insert(SegmentId::Header, Body::Header);

    let (bytecode_entries, bytecode_data) = bytecode_segments(variants, &mut diag);
    let (property_entries, property_data) = property_segments(properties, &mut diag);

    if !bytecode_entries.is_empty() {
        bodies.insert(SegmentId::BytecodeTable, Body::BytecodeTable(bytecode_entries));
    }
    if !property_entries.is_empty() {
        bodies.insert(SegmentId::PropertiesTable, Body::PropertiesTable(property_entries));
    }
    bodies.extend(bytecode_data);
    bodies.extend(property_data);

    let layout = Layout::plan(bodies.iter().map(|(id, body)| (*id, body.size())));
    tracing::debug!(
        segments = layout.placements().len(),
        size = layout.total_size(),
        "planned layout"
    );

    let mut segments = Vec::with_capacity(bodies.len());
    for placement in layout.placements() {
        tracing::trace!(
            segment = %placement.id,
            offset = placement.offset,
            size = placement.size,
            "placed segment"
        );
        let Some(body) = bodies.get(&placement.id) else {
            diag.report(ErrorKind::Internal)
                .message(format!("segment `{}` has no content", placement.id))
                .at(placement.offset)
                .emit();
            continue;
        };
        segments.push(Segment {
            id: placement.id,
            offset: placement.offset,
            bytes: encode_body(body, placement, &layout, &mut diag),
        });
    }

    diag.into_result(Container { segments })
}

type Segments = Vec<(SegmentId, Body)>;

fn bytecode_segments(
    variants: &[BytecodeVariant],
    diag: &mut Diagnostics,
) -> (Vec<(Platform, SegmentId)>, Segments) {
    let mut entries = Vec::new();
    let mut data = Vec::new();

    for (i, variant) in variants.iter().enumerate() {
        if variant.platforms.is_empty() {
            diag.report(ErrorKind::Value)
                .message(format!("bytecode variant {i} has no platforms"))
                .emit();
            continue;
        }
        if variant.bytecode.is_empty() {
            diag.report(ErrorKind::Value)
                .message(format!(
                    "bytecode variant {i} for {} is empty",
                    variant.platform_names().join(", ")
                ))
                .emit();
            continue;
        }

        let id = SegmentId::BytecodeData(i);
        entries.extend(variant.platforms.iter().map(|&p| (p, id)));
        data.push((id, Body::Data(variant.bytecode.clone())));
    }

    (entries, data)
}

fn property_segments(
    properties: &PropertySet,
    diag: &mut Diagnostics,
) -> (Vec<(PropertyKind, SegmentId)>, Segments) {
    let mut entries = Vec::new();
    let mut data = Vec::new();

    for (kind, values) in properties.iter() {
        if !kind.is_multi() && values.len() > 1 {
            diag.report(ErrorKind::Multiplicity)
                .message(format!(
                    "`{kind}` takes a single value, found {}",
                    values.len()
                ))
                .emit();
            continue;
        }
        for value in values {
            let Some(bytes) = encode_property(kind, value, diag) else {
                continue;
            };
            let id = SegmentId::PropertyData(data.len());
            entries.push((kind, id));
            data.push((id, Body::Data(bytes)));
        }
    }

    (entries, data)
}

fn encode_body(
    body: &Body,
    placement: &Placement,
    layout: &Layout,
    diag: &mut Diagnostics,
) -> Vec<u8> {
    let base = placement.offset;
    match body {
        Body::Header => {
            let header = Header {
                bytecode_table: table_pointer(SegmentId::BytecodeTable, base + 4, layout, diag),
                properties_table: table_pointer(SegmentId::PropertiesTable, base + 5, layout, diag),
                ..Header::default()
            };
            header.to_bytes().to_vec()
        }
        Body::BytecodeTable(entries) => {
            let mut bytes = Vec::with_capacity(body.size());
            for (i, (platform, data)) in entries.iter().enumerate() {
                let at = base + i * BYTECODE_ENTRY_SIZE;
                bytes.push(platform.code());
                bytes.extend(layout.resolve(
                    Reference::AddressOf(*data),
                    DATA_POINTER_WIDTH,
                    at + 1,
                    diag,
                ));
                bytes.extend(layout.resolve(
                    Reference::SizeOf(*data),
                    DATA_POINTER_WIDTH,
                    at + 3,
                    diag,
                ));
            }
            bytes.push(TERMINATOR);
            bytes
        }
        Body::PropertiesTable(entries) => {
            let mut bytes = Vec::with_capacity(body.size());
            for (i, (kind, data)) in entries.iter().enumerate() {
                let at = base + i * PROPERTY_ENTRY_SIZE;
                bytes.push(kind.code());
                bytes.extend(layout.resolve(
                    Reference::AddressOf(*data),
                    DATA_POINTER_WIDTH,
                    at + 1,
                    diag,
                ));
            }
            bytes.push(TERMINATOR);
            bytes
        }
        Body::Data(bytes) => bytes.clone(),
    }
}

/// Header pointer to a table, 0 when the table is absent.
fn table_pointer(table: SegmentId, at: usize, layout: &Layout, diag: &mut Diagnostics) -> u8 {
    if layout.get(table).is_none() {
        return 0;
    }
    let field = layout.resolve(Reference::AddressOf(table), TABLE_POINTER_WIDTH, at, diag);
    field.first().copied().unwrap_or(0)
}
