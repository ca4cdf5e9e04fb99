//! Typed property values.
//!
//! A [`PropertyValue`] carries one payload of any kind. Which variant is valid
//! for which [`PropertyKind`](crate::PropertyKind) is checked by the codec, so
//! a mismatch is reported as a value error instead of being unrepresentable.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::platform::parse_code;

/// One property payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// ASCII text (name, description, authors, urls, tool vanity, license).
    Text(String),
    /// Unsigned integer (cycles per frame).
    Integer(u32),
    /// Calendar time, stored as whole Unix seconds (release date).
    Timestamp(DateTime<Utc>),
    Image(Image),
    Keys(KeyMap),
    Colours(Vec<Rgb>),
    Orientation(ScreenOrientation),
    Font(FontData),
}

impl PropertyValue {
    /// Short name of the value shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Timestamp(_) => "timestamp",
            Self::Image(_) => "image",
            Self::Keys(_) => "key map",
            Self::Colours(_) => "colour list",
            Self::Orientation(_) => "screen orientation",
            Self::Font(_) => "font data",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        Self::Integer(v)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

impl From<Image> for PropertyValue {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

impl From<KeyMap> for PropertyValue {
    fn from(keys: KeyMap) -> Self {
        Self::Keys(keys)
    }
}

impl From<Vec<Rgb>> for PropertyValue {
    fn from(colours: Vec<Rgb>) -> Self {
        Self::Colours(colours)
    }
}

impl From<ScreenOrientation> for PropertyValue {
    fn from(o: ScreenOrientation) -> Self {
        Self::Orientation(o)
    }
}

impl From<FontData> for PropertyValue {
    fn from(font: FontData) -> Self {
        Self::Font(font)
    }
}

/// Planar cover-art bitmap.
///
/// `data` holds `planes × width × height` bytes: each plane is `height` rows
/// of `width` bytes (8 pixels per byte).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    pub planes: u8,
    /// Width in bytes.
    pub width: u8,
    /// Height in pixels.
    pub height: u8,
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(planes: u8, width: u8, height: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            planes,
            width,
            height,
            data: data.into(),
        }
    }

    /// Number of bitmap bytes implied by the dimensions.
    pub fn expected_len(&self) -> usize {
        self.planes as usize * self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> bool {
        self.data.len() == self.expected_len()
    }
}

/// Logical input key of the original hex keypad layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Key {
    Up = 0x00,
    Down = 0x01,
    Left = 0x02,
    Right = 0x03,
    A = 0x04,
    B = 0x05,
}

impl Key {
    pub const ALL: &'static [Key] = &[
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Self::Up),
            0x01 => Some(Self::Down),
            0x02 => Some(Self::Left),
            0x03 => Some(Self::Right),
            0x04 => Some(Self::A),
            0x05 => Some(Self::B),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::A => "a",
            Self::B => "b",
        }
    }

    /// Look up a key by name or by numeric code.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .or_else(|| parse_code(name).and_then(Self::from_u8))
    }
}

/// Logical key to physical CHIP-8 key, in file order.
pub type KeyMap = IndexMap<Key, u8>;

/// One palette entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

/// How the display is physically mounted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum ScreenOrientation {
    /// Display is on its feet, top is up.
    #[default]
    Normal = 0x00,
    /// Display is on its right side, left side is up.
    LeftSideUp = 0x01,
    /// Display is on its left side, right side is up.
    RightSideUp = 0x02,
    /// Display is upside down, bottom is up.
    UpsideDown = 0x03,
}

impl ScreenOrientation {
    pub const ALL: &'static [ScreenOrientation] = &[
        Self::Normal,
        Self::LeftSideUp,
        Self::RightSideUp,
        Self::UpsideDown,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Self::Normal),
            0x01 => Some(Self::LeftSideUp),
            0x02 => Some(Self::RightSideUp),
            0x03 => Some(Self::UpsideDown),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::LeftSideUp => "left side up",
            Self::RightSideUp => "right side up",
            Self::UpsideDown => "upside down",
        }
    }

    /// Look up an orientation by name or by numeric code.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.name() == name)
            .or_else(|| parse_code(name).and_then(Self::from_u8))
    }
}

/// Replacement font and its load address in interpreter memory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontData {
    pub address: u16,
    pub data: Vec<u8>,
}

impl FontData {
    pub fn new(address: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            address,
            data: data.into(),
        }
    }
}
