use chrono::{DateTime, Utc};
use serde_json::json;

use crate::{
    ErrorKind, FontData, Image, Key, KeyMap, PropertyKind, PropertySet, PropertyValue, Rgb,
    ScreenOrientation,
};

fn convert_clean(sheet: serde_json::Value) -> PropertySet {
    let (set, diag) = PropertySet::from_json(&sheet);
    assert!(diag.is_empty(), "unexpected diagnostics:\n{}", diag.render());
    set
}

#[test]
fn empty_sheet() {
    let set = convert_clean(json!({}));
    assert!(set.is_empty());
}

#[test]
fn non_object_sheet() {
    let (set, diag) = PropertySet::from_json(&json!(["name"]));
    assert!(set.is_empty());
    assert_eq!(diag.kinds(), vec![ErrorKind::Value]);
}

#[test]
fn unknown_keys_are_dropped() {
    let set = convert_clean(json!({
        "name": "Test",
        "platform": "CHIP-8",
        "favouriteColour": "blue",
    }));
    assert_eq!(set.len(), 1);
    assert_eq!(set.name(), Some("Test"));
}

#[test]
fn text_kinds() {
    let set = convert_clean(json!({
        "name": "Test",
        "description": "Description here",
        "toolVanity": "File created by AwesomeChip2000",
        "licenseInformation": "MIT",
    }));
    assert_eq!(set.description(), Some("Description here"));
    assert_eq!(
        set.first(PropertyKind::ToolVanity),
        Some(&PropertyValue::from("File created by AwesomeChip2000"))
    );
    assert_eq!(
        set.first(PropertyKind::LicenseInformation),
        Some(&PropertyValue::from("MIT"))
    );
}

#[test]
fn author_alias_accepts_string() {
    let set = convert_clean(json!({ "author": "Timendus" }));
    assert_eq!(set.authors(), vec!["Timendus"]);
}

#[test]
fn authors_accepts_array() {
    let set = convert_clean(json!({
        "authors": ["Timendus", "Joseph Weisbecker"],
        "url": ["https://a.example", "https://b.example"],
    }));
    assert_eq!(set.authors(), vec!["Timendus", "Joseph Weisbecker"]);
    assert_eq!(set.urls(), vec!["https://a.example", "https://b.example"]);
}

#[test]
fn single_kind_one_element_array_is_unwrapped() {
    let set = convert_clean(json!({ "name": ["Test"] }));
    assert_eq!(set.get(PropertyKind::Name).len(), 1);
    assert_eq!(set.name(), Some("Test"));
}

#[test]
fn single_kind_with_many_values() {
    let (set, diag) = PropertySet::from_json(&json!({ "name": ["a", "b"] }));
    assert!(!set.contains(PropertyKind::Name));
    assert_eq!(diag.kinds(), vec![ErrorKind::Multiplicity]);
}

#[test]
fn cycles_per_frame() {
    let set = convert_clean(json!({ "cyclesPerFrame": 200000 }));
    assert_eq!(set.cycles_per_frame(), Some(200_000));
}

#[test]
fn cycles_per_frame_out_of_range() {
    let (_, diag) = PropertySet::from_json(&json!({ "cyclesPerFrame": 5_000_000_000u64 }));
    assert_eq!(diag.kinds(), vec![ErrorKind::Overflow]);

    let (_, diag) = PropertySet::from_json(&json!({ "cyclesPerFrame": -1 }));
    assert_eq!(diag.kinds(), vec![ErrorKind::Value]);
}

#[test]
fn release_date_from_seconds_and_string() {
    let expected = DateTime::<Utc>::from_timestamp(1_661_990_400, 0).unwrap();

    let set = convert_clean(json!({ "releaseDate": 1_661_990_400 }));
    assert_eq!(set.release_date(), Some(expected));

    let set = convert_clean(json!({ "releaseDate": "2022-09-01T00:00:00Z" }));
    assert_eq!(set.release_date(), Some(expected));

    let set = convert_clean(json!({ "releaseDate": "2022-09-01T02:00:00+02:00" }));
    assert_eq!(set.release_date(), Some(expected));
}

#[test]
fn release_date_bad_string() {
    let (_, diag) = PropertySet::from_json(&json!({ "releaseDate": "yesterday" }));
    assert_eq!(diag.kinds(), vec![ErrorKind::Value]);
}

#[test]
fn image() {
    let set = convert_clean(json!({
        "image": { "planes": 1, "width": 1, "height": 2, "data": [255, 129] }
    }));
    assert_eq!(
        set.first(PropertyKind::Image),
        Some(&PropertyValue::Image(Image::new(1, 1, 2, vec![255u8, 129])))
    );
}

#[test]
fn image_missing_field() {
    let (_, diag) = PropertySet::from_json(&json!({ "image": { "planes": 1 } }));
    assert_eq!(diag.kinds(), vec![ErrorKind::Value]);
}

#[test]
fn keys() {
    let set = convert_clean(json!({
        "keys": { "up": 5, "down": 8, "a": 6 }
    }));
    let mut expected = KeyMap::new();
    expected.insert(Key::Up, 5);
    expected.insert(Key::Down, 8);
    expected.insert(Key::A, 6);
    assert_eq!(set.first(PropertyKind::Keys), Some(&PropertyValue::Keys(expected)));
}

#[test]
fn keys_unknown_name() {
    let (set, diag) = PropertySet::from_json(&json!({ "keys": { "fire": 1 } }));
    assert!(!set.contains(PropertyKind::Keys));
    assert_eq!(diag.kinds(), vec![ErrorKind::UnknownKind]);
}

#[test]
fn colours_is_one_value() {
    let set = convert_clean(json!({
        "colours": [[0x15, 0x64, 0x11], [0x9a, 0xf6, 0x95]]
    }));
    assert_eq!(set.get(PropertyKind::Colours).len(), 1);
    assert_eq!(
        set.first(PropertyKind::Colours),
        Some(&PropertyValue::Colours(vec![
            Rgb::new(0x15, 0x64, 0x11),
            Rgb::new(0x9a, 0xf6, 0x95),
        ]))
    );
}

#[test]
fn colours_wrong_shape() {
    let (_, diag) = PropertySet::from_json(&json!({ "colours": [[1, 2]] }));
    assert_eq!(diag.kinds(), vec![ErrorKind::Value]);
}

#[test]
fn screen_orientation_by_name_and_number() {
    let set = convert_clean(json!({ "screenOrientation": "left side up" }));
    assert_eq!(set.screen_orientation(), Some(ScreenOrientation::LeftSideUp));

    let set = convert_clean(json!({ "screenOrientation": 3 }));
    assert_eq!(set.screen_orientation(), Some(ScreenOrientation::UpsideDown));
}

#[test]
fn screen_orientation_unknown() {
    let (_, diag) = PropertySet::from_json(&json!({ "screenOrientation": "diagonal" }));
    assert_eq!(diag.kinds(), vec![ErrorKind::UnknownKind]);
}

#[test]
fn font_data() {
    let set = convert_clean(json!({
        "fontData": { "address": 256, "data": [1, 2, 3, 4, 5] }
    }));
    assert_eq!(
        set.first(PropertyKind::FontData),
        Some(&PropertyValue::Font(FontData::new(0x100, vec![1u8, 2, 3, 4, 5])))
    );
}

#[test]
fn wrong_shapes_are_all_reported() {
    let (set, diag) = PropertySet::from_json(&json!({
        "name": 5,
        "authors": ["ok", 7],
        "keys": "up",
        "description": "fine",
    }));
    assert_eq!(diag.count(ErrorKind::Value), 3);
    assert_eq!(set.authors(), vec!["ok"]);
    assert_eq!(set.description(), Some("fine"));
}

#[test]
fn to_json_uses_canonical_keys() {
    let set = PropertySet::new()
        .with(PropertyKind::Name, "Test")
        .with(PropertyKind::Authors, "Timendus")
        .with(PropertyKind::CyclesPerFrame, 30u32)
        .with(
            PropertyKind::ReleaseDate,
            DateTime::<Utc>::from_timestamp(1_661_990_400, 0).unwrap(),
        )
        .with(PropertyKind::ScreenOrientation, ScreenOrientation::RightSideUp)
        .with(PropertyKind::Colours, vec![Rgb::new(1, 2, 3)]);

    assert_eq!(
        set.to_json(),
        json!({
            "name": "Test",
            "authors": ["Timendus"],
            "cyclesPerFrame": 30,
            "releaseDate": "2022-09-01T00:00:00Z",
            "screenOrientation": "right side up",
            "colours": [[1, 2, 3]],
        })
    );
}

#[test]
fn to_json_converts_back() {
    let sheet = json!({
        "name": "Test",
        "urls": ["https://a.example", "https://b.example"],
        "keys": { "left": 7, "right": 9 },
        "image": { "planes": 1, "width": 1, "height": 1, "data": [128] },
        "fontData": { "address": 80, "data": [240] },
    });
    let set = convert_clean(sheet.clone());
    assert_eq!(set.to_json(), sheet);
    assert_eq!(convert_clean(set.to_json()), set);
}
