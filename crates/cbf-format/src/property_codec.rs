//! Per-kind payload encoding.
//!
//! | kind              | payload                                       |
//! |-------------------|-----------------------------------------------|
//! | text kinds        | ASCII, NUL-terminated                         |
//! | cyclesPerFrame    | u24 big-endian                                |
//! | releaseDate       | u32 big-endian Unix seconds                   |
//! | image             | planes, width, height, planes×width×height    |
//! | keys              | count, count × (logical key, physical key)    |
//! | colours           | count, count × (r, g, b)                      |
//! | screenOrientation | 1 byte                                        |
//! | fontData          | u16 address, u8 length, length bytes          |

use cbf_core::{
    Diagnostics, ErrorKind, FontData, Image, Key, KeyMap, PropertyKind, PropertyValue, Rgb,
    ScreenOrientation,
};
use chrono::{DateTime, Utc};

use crate::primitives::{StringError, bytes_to_int, bytes_to_str, fits, int_to_bytes, str_to_bytes};

const CYCLES_WIDTH: usize = 3;
const TIMESTAMP_WIDTH: usize = 4;
const FONT_ADDRESS_WIDTH: usize = 2;

/// Encode one value of `kind`. Problems are reported into `diag` and yield `None`.
pub fn encode_property(
    kind: PropertyKind,
    value: &PropertyValue,
    diag: &mut Diagnostics,
) -> Option<Vec<u8>> {
    match (kind, value) {
        (k, PropertyValue::Text(s)) if k.is_text() => encode_text(kind, s, diag),
        (PropertyKind::CyclesPerFrame, PropertyValue::Integer(n)) => {
            encode_int(kind, *n as u64, CYCLES_WIDTH, diag)
        }
        (PropertyKind::ReleaseDate, PropertyValue::Timestamp(t)) => encode_timestamp(t, diag),
        (PropertyKind::Image, PropertyValue::Image(image)) => encode_image(image, diag),
        (PropertyKind::Keys, PropertyValue::Keys(keys)) => Some(encode_keys(keys)),
        (PropertyKind::Colours, PropertyValue::Colours(colours)) => encode_colours(colours, diag),
        (PropertyKind::ScreenOrientation, PropertyValue::Orientation(o)) => Some(vec![o.code()]),
        (PropertyKind::FontData, PropertyValue::Font(font)) => encode_font(font, diag),
        _ => {
            diag.report(ErrorKind::Value)
                .message(format!("`{kind}` cannot hold a {} value", value.shape()))
                .emit();
            None
        }
    }
}

fn encode_text(kind: PropertyKind, s: &str, diag: &mut Diagnostics) -> Option<Vec<u8>> {
    match str_to_bytes(s) {
        Ok(bytes) => Some(bytes),
        Err(StringError::TooLong(len)) => {
            diag.report(ErrorKind::Overflow)
                .message(format!("`{kind}` string of {len} bytes is too long"))
                .emit();
            None
        }
        Err(StringError::NonAscii) => {
            diag.report(ErrorKind::Value)
                .message(format!("`{kind}` must be ASCII: {s:?}"))
                .emit();
            None
        }
        Err(StringError::EmbeddedNul) => {
            diag.report(ErrorKind::Value)
                .message(format!("`{kind}` must not contain a NUL byte: {s:?}"))
                .emit();
            None
        }
    }
}

fn encode_int(
    kind: PropertyKind,
    value: u64,
    width: usize,
    diag: &mut Diagnostics,
) -> Option<Vec<u8>> {
    if !fits(value, width) {
        diag.report(ErrorKind::Overflow)
            .message(format!("`{kind}` value {value} does not fit {width} bytes"))
            .emit();
        return None;
    }
    Some(int_to_bytes(value, width))
}

fn encode_timestamp(t: &DateTime<Utc>, diag: &mut Diagnostics) -> Option<Vec<u8>> {
    let kind = PropertyKind::ReleaseDate;
    if t.timestamp_subsec_nanos() != 0 {
        diag.report(ErrorKind::Value)
            .message(format!("`{kind}` must be whole seconds, found {}", t.to_rfc3339()))
            .emit();
        return None;
    }
    let secs = t.timestamp();
    if secs < 0 {
        diag.report(ErrorKind::Overflow)
            .message(format!("`{kind}` before 1970 cannot be stored: {}", t.to_rfc3339()))
            .emit();
        return None;
    }
    encode_int(kind, secs as u64, TIMESTAMP_WIDTH, diag)
}

fn encode_image(image: &Image, diag: &mut Diagnostics) -> Option<Vec<u8>> {
    if !image.validate() {
        diag.report(ErrorKind::Value)
            .message(format!(
                "`image` of {} plane(s), {}×{} needs {} bytes, found {}",
                image.planes,
                image.width,
                image.height,
                image.expected_len(),
                image.data.len()
            ))
            .emit();
        return None;
    }
    let mut bytes = Vec::with_capacity(3 + image.data.len());
    bytes.extend([image.planes, image.width, image.height]);
    bytes.extend_from_slice(&image.data);
    Some(bytes)
}

fn encode_keys(keys: &KeyMap) -> Vec<u8> {
    // At most one entry per logical key, so the count always fits a byte.
    let mut bytes = Vec::with_capacity(1 + 2 * keys.len());
    bytes.push(keys.len() as u8);
    for (key, physical) in keys {
        bytes.extend([key.code(), *physical]);
    }
    bytes
}

fn encode_colours(colours: &[Rgb], diag: &mut Diagnostics) -> Option<Vec<u8>> {
    let count = count_byte(PropertyKind::Colours, colours.len(), diag)?;
    let mut bytes = Vec::with_capacity(1 + 3 * colours.len());
    bytes.push(count);
    for c in colours {
        bytes.extend_from_slice(&c.0);
    }
    Some(bytes)
}

fn encode_font(font: &FontData, diag: &mut Diagnostics) -> Option<Vec<u8>> {
    let len = count_byte(PropertyKind::FontData, font.data.len(), diag)?;
    let mut bytes = int_to_bytes(font.address as u64, FONT_ADDRESS_WIDTH);
    bytes.push(len);
    bytes.extend_from_slice(&font.data);
    Some(bytes)
}

fn count_byte(kind: PropertyKind, count: usize, diag: &mut Diagnostics) -> Option<u8> {
    match u8::try_from(count) {
        Ok(n) => Some(n),
        Err(_) => {
            diag.report(ErrorKind::Overflow)
                .message(format!("`{kind}` holds {count} items, at most 255 fit"))
                .emit();
            None
        }
    }
}

/// Bounds-checked cursor over the whole file.
struct Reader<'a> {
    file: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.file.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn byte(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn int(&mut self, width: usize) -> Option<u64> {
        self.take(width).map(bytes_to_int)
    }
}

/// Decode the payload of `kind` stored at `pointer` in `file`.
pub fn decode_property(
    kind: PropertyKind,
    file: &[u8],
    pointer: usize,
    diag: &mut Diagnostics,
) -> Option<PropertyValue> {
    if kind.is_text() {
        return decode_text(kind, file, pointer, diag);
    }

    let mut r = Reader { file, pos: pointer };
    let decoded = match kind {
        PropertyKind::CyclesPerFrame => r
            .int(CYCLES_WIDTH)
            .map(|n| Ok(PropertyValue::Integer(n as u32))),
        PropertyKind::ReleaseDate => r.int(TIMESTAMP_WIDTH).map(|secs| {
            DateTime::<Utc>::from_timestamp(secs as i64, 0)
                .map(PropertyValue::Timestamp)
                .ok_or_else(|| (ErrorKind::Value, format!("timestamp {secs} is out of range")))
        }),
        PropertyKind::Image => decode_image(&mut r).map(|image| Ok(PropertyValue::Image(image))),
        PropertyKind::Keys => decode_keys(&mut r).map(|keys| keys.map(PropertyValue::Keys)),
        PropertyKind::Colours => {
            decode_colours(&mut r).map(|colours| Ok(PropertyValue::Colours(colours)))
        }
        PropertyKind::ScreenOrientation => r.byte().map(|code| {
            ScreenOrientation::from_u8(code)
                .map(PropertyValue::Orientation)
                .ok_or_else(|| {
                    (
                        ErrorKind::UnknownKind,
                        format!("unknown screen orientation {code:#04x}"),
                    )
                })
        }),
        PropertyKind::FontData => decode_font(&mut r).map(|font| Ok(PropertyValue::Font(font))),
        _ => Some(Err((ErrorKind::Internal, format!("no decoder for `{kind}`")))),
    };

    match decoded {
        Some(Ok(value)) => Some(value),
        Some(Err((error, message))) => {
            diag.report(error)
                .message(format!("`{kind}`: {message}"))
                .at(pointer)
                .emit();
            None
        }
        None => {
            diag.report(ErrorKind::Format)
                .message(format!("`{kind}` payload runs past the end of the file"))
                .at(pointer)
                .emit();
            None
        }
    }
}

fn decode_text(
    kind: PropertyKind,
    file: &[u8],
    pointer: usize,
    diag: &mut Diagnostics,
) -> Option<PropertyValue> {
    let Some(rest) = file.get(pointer..) else {
        diag.report(ErrorKind::Format)
            .message(format!("`{kind}` points past the end of the file"))
            .at(pointer)
            .emit();
        return None;
    };
    match bytes_to_str(rest) {
        Some(Ok((s, _))) => Some(PropertyValue::Text(s)),
        Some(Err(_)) => {
            diag.report(ErrorKind::Value)
                .message(format!("`{kind}` is not ASCII"))
                .at(pointer)
                .emit();
            None
        }
        None => {
            diag.report(ErrorKind::Format)
                .message(format!("`{kind}` string is missing its terminator"))
                .at(pointer)
                .emit();
            None
        }
    }
}

fn decode_image(r: &mut Reader<'_>) -> Option<Image> {
    let planes = r.byte()?;
    let width = r.byte()?;
    let height = r.byte()?;
    let len = planes as usize * width as usize * height as usize;
    let data = r.take(len)?;
    Some(Image::new(planes, width, height, data))
}

type Decoded<T> = Result<T, (ErrorKind, String)>;

fn decode_keys(r: &mut Reader<'_>) -> Option<Decoded<KeyMap>> {
    let count = r.byte()?;
    let mut keys = KeyMap::new();
    let mut unknown = None;
    for _ in 0..count {
        let id = r.byte()?;
        let physical = r.byte()?;
        match Key::from_u8(id) {
            Some(key) => {
                keys.insert(key, physical);
            }
            None => unknown = unknown.or(Some(id)),
        }
    }
    Some(match unknown {
        Some(id) => Err((ErrorKind::UnknownKind, format!("unknown key {id:#04x}"))),
        None => Ok(keys),
    })
}

fn decode_colours(r: &mut Reader<'_>) -> Option<Vec<Rgb>> {
    let count = r.byte()?;
    (0..count)
        .map(|_| {
            let c = r.take(3)?;
            Some(Rgb::new(c[0], c[1], c[2]))
        })
        .collect()
}

fn decode_font(r: &mut Reader<'_>) -> Option<FontData> {
    let address = r.int(FONT_ADDRESS_WIDTH)? as u16;
    let len = r.byte()?;
    let data = r.take(len as usize)?;
    Some(FontData::new(address, data))
}
