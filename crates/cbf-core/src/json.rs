//! JSON property sheets.
//!
//! A property sheet is a JSON object keyed by property name, as written next
//! to a ROM (`game.ch8.json`). Unrecognized keys are dropped; every other
//! problem is reported into [`Diagnostics`] while the remaining keys are still
//! converted.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::diagnostics::{Diagnostics, ErrorKind};
use crate::property::PropertyKind;
use crate::property_set::PropertySet;
use crate::value::{FontData, Image, Key, KeyMap, PropertyValue, Rgb, ScreenOrientation};

impl PropertySet {
    /// Convert a property sheet into a typed set.
    ///
    /// The returned set holds every value that converted cleanly, even when
    /// diagnostics were reported.
    pub fn from_json(sheet: &Value) -> (PropertySet, Diagnostics) {
        let mut diag = Diagnostics::new();
        let mut set = PropertySet::new();

        let Some(object) = sheet.as_object() else {
            diag.report(ErrorKind::Value)
                .message(format!("property sheet must be an object, found {}", json_type(sheet)))
                .emit();
            return (set, diag);
        };

        for (key, value) in object {
            let Some(kind) = PropertyKind::from_name(key) else {
                tracing::debug!(key = %key, "dropping unrecognized property");
                continue;
            };
            for value in values_for(kind, value, &mut diag) {
                if let Some(converted) = convert(kind, value, &mut diag) {
                    set.insert(kind, converted);
                }
            }
        }

        (set, diag)
    }

    /// Render the set as a property sheet with canonical keys.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (kind, values) in self.iter() {
            let rendered = if kind.is_multi() || values.len() > 1 {
                Value::Array(values.iter().map(value_to_json).collect())
            } else {
                values.first().map(value_to_json).unwrap_or(Value::Null)
            };
            object.insert(kind.name().to_string(), rendered);
        }
        Value::Object(object)
    }
}

/// Split a sheet entry into individual values according to the kind's multiplicity.
fn values_for<'a>(kind: PropertyKind, value: &'a Value, diag: &mut Diagnostics) -> Vec<&'a Value> {
    // A colour list is itself an array.
    if kind == PropertyKind::Colours {
        return vec![value];
    }
    match value {
        Value::Array(items) if kind.is_multi() => items.iter().collect(),
        Value::Array(items) if items.len() > 1 => {
            diag.report(ErrorKind::Multiplicity)
                .message(format!(
                    "`{kind}` takes a single value, found {}",
                    items.len()
                ))
                .emit();
            Vec::new()
        }
        Value::Array(items) => items.iter().collect(),
        _ => vec![value],
    }
}

fn convert(kind: PropertyKind, value: &Value, diag: &mut Diagnostics) -> Option<PropertyValue> {
    match kind {
        k if k.is_text() => match value {
            Value::String(s) => Some(PropertyValue::Text(s.clone())),
            other => {
                wrong_shape(diag, kind, "a string", other);
                None
            }
        },
        PropertyKind::CyclesPerFrame => {
            unsigned(kind, value, u32::MAX as u64, diag).map(|v| PropertyValue::Integer(v as u32))
        }
        PropertyKind::ReleaseDate => timestamp(value, diag).map(PropertyValue::Timestamp),
        PropertyKind::Image => deserialize::<Image>(kind, value, diag).map(PropertyValue::Image),
        PropertyKind::FontData => deserialize::<FontData>(kind, value, diag).map(PropertyValue::Font),
        PropertyKind::Colours => {
            deserialize::<Vec<Rgb>>(kind, value, diag).map(PropertyValue::Colours)
        }
        PropertyKind::Keys => keys(value, diag).map(PropertyValue::Keys),
        PropertyKind::ScreenOrientation => orientation(value, diag).map(PropertyValue::Orientation),
        _ => None,
    }
}

fn unsigned(kind: PropertyKind, value: &Value, max: u64, diag: &mut Diagnostics) -> Option<u64> {
    let Some(n) = value.as_u64() else {
        wrong_shape(diag, kind, "a non-negative integer", value);
        return None;
    };
    if n > max {
        diag.report(ErrorKind::Overflow)
            .message(format!("`{kind}` value {n} exceeds {max}"))
            .emit();
        return None;
    }
    Some(n)
}

fn timestamp(value: &Value, diag: &mut Diagnostics) -> Option<DateTime<Utc>> {
    let kind = PropertyKind::ReleaseDate;
    match value {
        Value::Number(n) => {
            let Some(secs) = n.as_i64() else {
                wrong_shape(diag, kind, "whole seconds", value);
                return None;
            };
            let parsed = DateTime::<Utc>::from_timestamp(secs, 0);
            if parsed.is_none() {
                diag.report(ErrorKind::Overflow)
                    .message(format!("`{kind}` timestamp {secs} is out of range"))
                    .emit();
            }
            parsed
        }
        Value::String(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(t) => Some(t.with_timezone(&Utc)),
            Err(e) => {
                diag.report(ErrorKind::Value)
                    .message(format!("`{kind}` is not an RFC 3339 date: {e}"))
                    .emit();
                None
            }
        },
        other => {
            wrong_shape(diag, kind, "a number or date string", other);
            None
        }
    }
}

fn keys(value: &Value, diag: &mut Diagnostics) -> Option<KeyMap> {
    let kind = PropertyKind::Keys;
    let Some(object) = value.as_object() else {
        wrong_shape(diag, kind, "an object", value);
        return None;
    };

    let errors_before = diag.len();
    let mut map = KeyMap::new();
    for (name, physical) in object {
        let Some(key) = Key::from_name(name) else {
            diag.report(ErrorKind::UnknownKind)
                .message(format!("unknown key `{name}`"))
                .emit();
            continue;
        };
        if let Some(code) = unsigned(kind, physical, u8::MAX as u64, diag) {
            map.insert(key, code as u8);
        }
    }
    (diag.len() == errors_before).then_some(map)
}

fn orientation(value: &Value, diag: &mut Diagnostics) -> Option<ScreenOrientation> {
    let kind = PropertyKind::ScreenOrientation;
    let found = match value {
        Value::String(s) => ScreenOrientation::from_name(s),
        Value::Number(_) => {
            let code = unsigned(kind, value, u8::MAX as u64, diag)?;
            ScreenOrientation::from_u8(code as u8)
        }
        other => {
            wrong_shape(diag, kind, "a name or number", other);
            return None;
        }
    };
    if found.is_none() {
        diag.report(ErrorKind::UnknownKind)
            .message(format!("unknown screen orientation {value}"))
            .emit();
    }
    found
}

fn deserialize<T: DeserializeOwned>(
    kind: PropertyKind,
    value: &Value,
    diag: &mut Diagnostics,
) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            diag.report(ErrorKind::Value)
                .message(format!("invalid `{kind}`: {e}"))
                .emit();
            None
        }
    }
}

fn wrong_shape(diag: &mut Diagnostics, kind: PropertyKind, expected: &str, found: &Value) {
    diag.report(ErrorKind::Value)
        .message(format!(
            "`{kind}` must be {expected}, found {}",
            json_type(found)
        ))
        .emit();
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn value_to_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Text(s) => Value::String(s.clone()),
        PropertyValue::Integer(n) => Value::from(*n),
        PropertyValue::Timestamp(t) => {
            Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        PropertyValue::Image(image) => serde_json::to_value(image).unwrap_or(Value::Null),
        PropertyValue::Keys(keys) => Value::Object(
            keys.iter()
                .map(|(k, v)| (k.name().to_string(), Value::from(*v)))
                .collect(),
        ),
        PropertyValue::Colours(colours) => Value::Array(
            colours
                .iter()
                .map(|c| Value::Array(c.0.iter().map(|b| Value::from(*b)).collect()))
                .collect(),
        ),
        PropertyValue::Orientation(o) => Value::String(o.name().to_string()),
        PropertyValue::Font(font) => serde_json::to_value(font).unwrap_or(Value::Null),
    }
}
