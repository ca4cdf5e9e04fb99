//! Byte-exact files for one property kind each, packed alongside the IBM
//! logo ROM shared by three platforms.

use cbf_core::{
    BytecodeVariant, FontData, Image, Key, KeyMap, Platform, PropertyKind, PropertySet,
    PropertyValue, Rgb, ScreenOrientation,
};
use chrono::{DateTime, Utc};

const IBM: [u8; 132] = [
    0x00, 0xe0, 0xa2, 0x2a, 0x60, 0x0c, 0x61, 0x08, 0xd0, 0x1f, 0x70, 0x09,
    0xa2, 0x39, 0xd0, 0x1f, 0xa2, 0x48, 0x70, 0x08, 0xd0, 0x1f, 0x70, 0x04,
    0xa2, 0x57, 0xd0, 0x1f, 0x70, 0x08, 0xa2, 0x66, 0xd0, 0x1f, 0x70, 0x08,
    0xa2, 0x75, 0xd0, 0x1f, 0x12, 0x28, 0xff, 0x00, 0xff, 0x00, 0x3c, 0x00,
    0x3c, 0x00, 0x3c, 0x00, 0x3c, 0x00, 0xff, 0x00, 0xff, 0xff, 0x00, 0xff,
    0x00, 0x38, 0x00, 0x3f, 0x00, 0x3f, 0x00, 0x38, 0x00, 0xff, 0x00, 0xff,
    0x80, 0x00, 0xe0, 0x00, 0xe0, 0x00, 0x80, 0x00, 0x80, 0x00, 0xe0, 0x00,
    0xe0, 0x00, 0x80, 0xf8, 0x00, 0xfc, 0x00, 0x3e, 0x00, 0x3f, 0x00, 0x3b,
    0x00, 0x39, 0x00, 0xf8, 0x00, 0xf8, 0x03, 0x00, 0x07, 0x00, 0x0f, 0x00,
    0xbf, 0x00, 0xfb, 0x00, 0xf3, 0x00, 0xe3, 0x00, 0x43, 0xe0, 0x00, 0xe0,
    0x00, 0x80, 0x00, 0x80, 0x00, 0x80, 0x00, 0x80, 0x00, 0xe0, 0x00, 0xe0,
];

const IMAGE_DATA: [u8; 32] = [
    0x80, 0x00, 0x80, 0x50, 0x80, 0x50, 0xE2, 0x52,
    0x95, 0x55, 0x96, 0x55, 0x93, 0x52, 0x00, 0x00,
    0xFF, 0xFF, 0x00, 0x00, 0x3B, 0x9E, 0x42, 0x50,
    0x43, 0x9C, 0x42, 0x50, 0x42, 0x50, 0x3B, 0x90,
];

fn variants() -> Vec<BytecodeVariant> {
    vec![BytecodeVariant::new(
        [Platform::Chip8, Platform::SuperChip10, Platform::SuperChip11],
        IBM,
    )]
}

fn header(bytecode_table: u8, properties_table: u8) -> Vec<u8> {
    vec![b'C', b'B', b'F', 0, bytecode_table, properties_table]
}

fn bytecode_table(address: u16) -> Vec<u8> {
    let [hi, lo] = address.to_be_bytes();
    let size = IBM.len() as u8;
    vec![
        0x01, hi, lo, 0x00, size, //
        0x2C, hi, lo, 0x00, size, //
        0x2D, hi, lo, 0x00, size, //
        0x00,
    ]
}

/// Header, a one-entry properties table at 6, the bytecode table at 10, the
/// payload at 26, then the ROM.
fn single_property_file(kind: u8, payload: &[u8]) -> Vec<u8> {
    let mut file = header(10, 6);
    file.extend([kind, 0x00, 26, 0x00]);
    file.extend(bytecode_table(26 + payload.len() as u16));
    file.extend_from_slice(payload);
    file.extend_from_slice(&IBM);
    file
}

fn text(s: &str) -> Vec<u8> {
    let mut bytes = s.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

fn assert_mapping(properties: PropertySet, file: &[u8]) {
    let packed = cbf_format::pack(&properties, &variants()).unwrap();
    assert_eq!(packed, file);

    let unpacked = cbf_format::unpack(file).unwrap();
    assert_eq!(unpacked.properties, properties);
    assert_eq!(unpacked.bytecode, variants());
}

fn single(kind: PropertyKind, value: impl Into<PropertyValue>) -> PropertySet {
    PropertySet::new().with(kind, value)
}

#[test]
fn empty_file() {
    let packed = cbf_format::pack(&PropertySet::new(), &[]).unwrap();
    assert_eq!(packed, b"CBF\0\0\0");

    let unpacked = cbf_format::unpack(&packed).unwrap();
    assert!(unpacked.properties.is_empty());
    assert!(unpacked.bytecode.is_empty());
}

#[test]
fn name() {
    assert_mapping(
        single(PropertyKind::Name, "Test"),
        &single_property_file(0x02, &text("Test")),
    );
}

#[test]
fn description() {
    assert_mapping(
        single(PropertyKind::Description, "Description here"),
        &single_property_file(0x03, &text("Description here")),
    );
}

#[test]
fn single_author() {
    assert_mapping(
        single(PropertyKind::Authors, "Timendus"),
        &single_property_file(0x04, &text("Timendus")),
    );
}

#[test]
fn multiple_authors() {
    let mut file = header(13, 6);
    file.extend([0x04, 0x00, 29, 0x04, 0x00, 38, 0x00]);
    file.extend(bytecode_table(56));
    file.extend(text("Timendus"));
    file.extend(text("Joseph Weisbecker"));
    file.extend_from_slice(&IBM);

    let properties = PropertySet::new()
        .with(PropertyKind::Authors, "Timendus")
        .with(PropertyKind::Authors, "Joseph Weisbecker");
    assert_mapping(properties, &file);
}

#[test]
fn single_url() {
    assert_mapping(
        single(
            PropertyKind::Urls,
            "https://github.com/Timendus/chip8-binary-format",
        ),
        &single_property_file(
            0x05,
            &text("https://github.com/Timendus/chip8-binary-format"),
        ),
    );
}

#[test]
fn multiple_urls() {
    let mut file = header(13, 6);
    file.extend([0x05, 0x00, 29, 0x05, 0x00, 77, 0x00]);
    file.extend(bytecode_table(125));
    file.extend(text("https://github.com/Timendus/chip8-binary-format"));
    file.extend(text("https://timendus.github.io/chip8-binary-format/"));
    file.extend_from_slice(&IBM);

    let properties = PropertySet::new()
        .with(
            PropertyKind::Urls,
            "https://github.com/Timendus/chip8-binary-format",
        )
        .with(
            PropertyKind::Urls,
            "https://timendus.github.io/chip8-binary-format/",
        );
    assert_mapping(properties, &file);
}

#[test]
fn cycles_per_frame() {
    assert_mapping(
        single(PropertyKind::CyclesPerFrame, 200_000u32),
        &single_property_file(0x01, &[0x03, 0x0D, 0x40]),
    );
}

#[test]
fn release_date() {
    let date = DateTime::<Utc>::from_timestamp(1_657_377_780, 0).unwrap();
    assert_mapping(
        single(PropertyKind::ReleaseDate, date),
        &single_property_file(0x06, &[0x62, 0xC9, 0x93, 0xF4]),
    );
}

#[test]
fn image() {
    let mut payload = vec![0x01, 0x02, 0x10];
    payload.extend_from_slice(&IMAGE_DATA);
    assert_mapping(
        single(PropertyKind::Image, Image::new(1, 2, 16, IMAGE_DATA)),
        &single_property_file(0x07, &payload),
    );
}

#[test]
fn keys() {
    let mut keys = KeyMap::new();
    keys.insert(Key::Up, 5);
    keys.insert(Key::Down, 8);
    keys.insert(Key::Left, 7);
    keys.insert(Key::Right, 9);
    keys.insert(Key::A, 6);
    keys.insert(Key::B, 4);

    assert_mapping(
        single(PropertyKind::Keys, keys),
        &single_property_file(
            0x08,
            &[6, 0x00, 5, 0x01, 8, 0x02, 7, 0x03, 9, 0x04, 6, 0x05, 4],
        ),
    );
}

#[test]
fn colours() {
    assert_mapping(
        single(
            PropertyKind::Colours,
            vec![Rgb::new(0x15, 0x64, 0x11), Rgb::new(0x9a, 0xf6, 0x95)],
        ),
        &single_property_file(0x09, &[2, 0x15, 0x64, 0x11, 0x9a, 0xf6, 0x95]),
    );
}

#[test]
fn screen_orientation() {
    assert_mapping(
        single(PropertyKind::ScreenOrientation, ScreenOrientation::LeftSideUp),
        &single_property_file(0x0B, &[0x01]),
    );
}

#[test]
fn font_data() {
    assert_mapping(
        single(PropertyKind::FontData, FontData::new(0x100, [1u8, 2, 3, 4, 5])),
        &single_property_file(0x0C, &[0x01, 0x00, 5, 1, 2, 3, 4, 5]),
    );
}

#[test]
fn tool_vanity() {
    assert_mapping(
        single(PropertyKind::ToolVanity, "File created by AwesomeChip2000"),
        &single_property_file(0x0D, &text("File created by AwesomeChip2000")),
    );
}

#[test]
fn license_information() {
    assert_mapping(
        single(PropertyKind::LicenseInformation, "CC0"),
        &single_property_file(0x0E, &text("CC0")),
    );
}

#[test]
fn repack_is_identical() {
    let properties = PropertySet::new()
        .with(PropertyKind::Name, "IBM test rom")
        .with(
            PropertyKind::Description,
            "This ROM is a rite of passage for any CHIP-8 developer",
        );

    let binary = cbf_format::pack(&properties, &variants()).unwrap();
    let unpacked = cbf_format::unpack(&binary).unwrap();
    assert_eq!(unpacked.properties, properties);
    assert_eq!(unpacked.bytecode, variants());

    let binary2 = cbf_format::pack(&unpacked.properties, &unpacked.bytecode).unwrap();
    assert_eq!(binary, binary2);
}
