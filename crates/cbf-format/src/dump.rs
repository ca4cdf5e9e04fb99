//! Human-readable layout dump for debugging.
//!
//! Three sections: the segment list in file order, then one line per
//! bytecode table entry, then one line per property with its decoded value.

use std::fmt;

use cbf_core::{Colors, Diagnostics, Platform, PropertyKind, PropertyValue};
use chrono::SecondsFormat;

use crate::constants::{BYTECODE_ENTRY_SIZE, PROPERTY_ENTRY_SIZE, TERMINATOR};
use crate::container::{Container, Segment};
use crate::layout::SegmentId;
use crate::primitives::bytes_to_int;
use crate::property_codec::decode_property;

/// Generate a human-readable dump of a packed container.
pub fn dump(container: &Container, colors: Colors) -> String {
    Dump {
        container,
        file: container.to_bytes(),
        colors,
    }
    .to_string()
}

struct Dump<'a> {
    container: &'a Container,
    file: Vec<u8>,
    colors: Colors,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_segments(f)?;
        if let Some(table) = self.container.segment(SegmentId::BytecodeTable) {
            writeln!(f)?;
            self.fmt_bytecode(f, table)?;
        }
        if let Some(table) = self.container.segment(SegmentId::PropertiesTable) {
            writeln!(f)?;
            self.fmt_properties(f, table)?;
        }
        Ok(())
    }
}

impl Dump<'_> {
    fn fmt_segments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.colors;
        let segments = self.container.segments();
        let names: Vec<String> = segments.iter().map(|s| s.id.to_string()).collect();
        let nw = names.iter().map(String::len).max().unwrap_or(0);
        let sw = segments
            .iter()
            .map(|s| s.size().to_string().len())
            .max()
            .unwrap_or(1);

        writeln!(f, "{}[segments]{}", c.blue, c.reset)?;
        for (segment, name) in segments.iter().zip(&names) {
            writeln!(
                f,
                "{}{:#06x}{}  {name:<nw$}  {}{:>sw$}{}",
                c.dim,
                segment.offset,
                c.reset,
                c.dim,
                segment.size(),
                c.reset
            )?;
        }
        Ok(())
    }

    fn fmt_bytecode(&self, f: &mut fmt::Formatter<'_>, table: &Segment) -> fmt::Result {
        let c = &self.colors;
        writeln!(f, "{}[bytecode]{}", c.blue, c.reset)?;
        for entry in entries(&table.bytes, BYTECODE_ENTRY_SIZE) {
            let address = bytes_to_int(&entry[1..3]);
            let size = bytes_to_int(&entry[3..5]);
            let platform = Platform::from_u8(entry[0]).map_or("?", Platform::name);
            writeln!(
                f,
                "{}{address:#06x}  {size:>5}{}  {}{platform}{}",
                c.dim, c.reset, c.green, c.reset
            )?;
        }
        Ok(())
    }

    fn fmt_properties(&self, f: &mut fmt::Formatter<'_>, table: &Segment) -> fmt::Result {
        let c = &self.colors;
        let rows: Vec<(u64, Option<PropertyKind>)> = entries(&table.bytes, PROPERTY_ENTRY_SIZE)
            .map(|entry| (bytes_to_int(&entry[1..3]), PropertyKind::from_u8(entry[0])))
            .collect();
        let kw = rows
            .iter()
            .map(|(_, kind)| kind.map_or(1, |k| k.name().len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{}[properties]{}", c.blue, c.reset)?;
        for (address, kind) in rows {
            let name = kind.map_or("?", PropertyKind::name);
            let value = kind
                .and_then(|k| {
                    let mut scratch = Diagnostics::new();
                    decode_property(k, &self.file, address as usize, &mut scratch)
                })
                .map_or_else(|| "<invalid>".to_string(), |v| format_value(&v));
            writeln!(
                f,
                "{}{address:#06x}{}  {}{name:<kw$}{}  {}{value}{}",
                c.dim, c.reset, c.blue, c.reset, c.green, c.reset
            )?;
        }
        Ok(())
    }
}

/// Table entries up to the terminator.
fn entries(table: &[u8], entry_size: usize) -> impl Iterator<Item = &[u8]> {
    table
        .chunks_exact(entry_size)
        .take_while(|entry| entry[0] != TERMINATOR)
}

fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Text(s) => format!("{s:?}"),
        PropertyValue::Integer(n) => n.to_string(),
        PropertyValue::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        PropertyValue::Image(image) => format!(
            "{}x{}, {} plane(s)",
            image.width as usize * 8,
            image.height,
            image.planes
        ),
        PropertyValue::Keys(keys) => keys
            .iter()
            .map(|(key, physical)| format!("{}={physical:#x}", key.name()))
            .collect::<Vec<_>>()
            .join(" "),
        PropertyValue::Colours(colours) => colours
            .iter()
            .map(|rgb| format!("#{:02x}{:02x}{:02x}", rgb.0[0], rgb.0[1], rgb.0[2]))
            .collect::<Vec<_>>()
            .join(" "),
        PropertyValue::Orientation(o) => o.name().to_string(),
        PropertyValue::Font(font) => {
            format!("{} bytes at {:#06x}", font.data.len(), font.address)
        }
    }
}
