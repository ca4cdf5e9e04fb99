//! Reading a packed file back into a cartridge.
//!
//! Decoding works directly on the input bytes. Every table entry is checked
//! independently so one bad entry does not hide the others.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;

use cbf_core::{BytecodeVariant, Cartridge, Diagnostics, ErrorKind, Platform, PropertyKind, PropertySet};

use crate::constants::{BYTECODE_ENTRY_SIZE, HEADER_SIZE, PROPERTY_ENTRY_SIZE, TERMINATOR};
use crate::header::Header;
use crate::primitives::bytes_to_int;
use crate::property_codec::decode_property;

pub(crate) fn read(file: &[u8]) -> Result<Cartridge, Diagnostics> {
    let mut diag = Diagnostics::new();

    let Some(header) = Header::from_bytes(file) else {
        diag.report(ErrorKind::Format)
            .message(format!(
                "file is {} bytes, shorter than the {HEADER_SIZE}-byte header",
                file.len()
            ))
            .at(0)
            .emit();
        return Err(diag);
    };
    if !header.validate_magic() {
        diag.report(ErrorKind::Format)
            .message("not a CBF file: bad magic")
            .at(0)
            .emit();
    }
    if !header.validate_version() {
        diag.report(ErrorKind::Format)
            .message(format!("unsupported version {}", header.version))
            .at(3)
            .emit();
    }
    if !diag.is_empty() {
        return Err(diag);
    }

    let bytecode = header
        .bytecode_table_offset()
        .map(|offset| read_bytecode_table(file, offset, &mut diag))
        .unwrap_or_default();
    let properties = header
        .properties_table_offset()
        .map(|offset| read_properties_table(file, offset, &mut diag))
        .unwrap_or_default();

    diag.into_result(Cartridge::new(properties, bytecode))
}

/// Walk a table of `entry_size`-byte entries until the terminator.
///
/// Calls `visit` with each entry's offset and bytes. Reports a format error if
/// the file ends before the terminator or in the middle of an entry.
fn walk_table(
    file: &[u8],
    offset: usize,
    entry_size: usize,
    name: &str,
    diag: &mut Diagnostics,
    mut visit: impl FnMut(usize, &[u8], &mut Diagnostics),
) {
    let mut pos = offset;
    loop {
        match file.get(pos) {
            Some(&TERMINATOR) => return,
            Some(_) => {}
            None => {
                diag.report(ErrorKind::Format)
                    .message(format!("{name} table at {offset:#04x} has no terminator"))
                    .at(pos)
                    .emit();
                return;
            }
        }
        let Some(entry) = file.get(pos..pos + entry_size) else {
            diag.report(ErrorKind::Format)
                .message(format!("{name} table entry is truncated"))
                .at(pos)
                .emit();
            return;
        };
        visit(pos, entry, diag);
        pos += entry_size;
    }
}

fn read_bytecode_table(file: &[u8], offset: usize, diag: &mut Diagnostics) -> Vec<BytecodeVariant> {
    // Entries sharing one (address, size) pair share one copy of the bytes.
    let mut variants: IndexMap<(usize, usize), BytecodeVariant> = IndexMap::new();
    let mut entries = 0;

    walk_table(file, offset, BYTECODE_ENTRY_SIZE, "bytecode", diag, |at, entry, diag| {
        entries += 1;
        let tag = entry[0];
        let address = bytes_to_int(&entry[1..3]) as usize;
        let size = bytes_to_int(&entry[3..5]) as usize;

        let Some(platform) = Platform::from_u8(tag) else {
            diag.report(ErrorKind::UnknownKind)
                .message(format!("unknown platform tag {tag:#04x}"))
                .at(at)
                .emit();
            return;
        };
        if size == 0 {
            diag.report(ErrorKind::Value)
                .message(format!("empty bytecode for {platform}"))
                .at(at)
                .emit();
            return;
        }

        match variants.entry((address, size)) {
            Entry::Occupied(mut shared) => shared.get_mut().platforms.push(platform),
            Entry::Vacant(slot) => match file.get(address..address + size) {
                Some(bytes) => {
                    slot.insert(BytecodeVariant::new([platform], bytes));
                }
                None => diag
                    .report(ErrorKind::Format)
                    .message(format!(
                        "bytecode for {platform} ({size} bytes at {address:#06x}) runs past the end of the file"
                    ))
                    .at(at)
                    .emit(),
            },
        }
    });

    tracing::debug!(entries, variants = variants.len(), "read bytecode table");
    variants.into_values().collect()
}

fn read_properties_table(file: &[u8], offset: usize, diag: &mut Diagnostics) -> PropertySet {
    let mut properties = PropertySet::new();
    let mut seen = HashSet::new();
    let mut entries = 0;

    walk_table(file, offset, PROPERTY_ENTRY_SIZE, "properties", diag, |at, entry, diag| {
        entries += 1;
        let code = entry[0];
        let pointer = bytes_to_int(&entry[1..3]) as usize;

        let Some(kind) = PropertyKind::from_u8(code) else {
            diag.report(ErrorKind::UnknownKind)
                .message(format!("unknown property kind {code:#04x}"))
                .at(at)
                .emit();
            return;
        };
        if !seen.insert(kind) && !kind.is_multi() {
            diag.report(ErrorKind::Multiplicity)
                .message(format!("`{kind}` is listed more than once"))
                .at(at)
                .emit();
            return;
        }

        tracing::trace!(kind = %kind, pointer, "reading property");
        if let Some(value) = decode_property(kind, file, pointer, diag) {
            properties.insert(kind, value);
        }
    });

    tracing::debug!(entries, kinds = properties.len(), "read properties table");
    properties
}
