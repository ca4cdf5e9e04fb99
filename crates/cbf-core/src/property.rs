//! Property kinds stored in the properties table.
//!
//! The kind byte decides both how a payload is encoded and how many values a
//! file may carry for it. Multiplicity is a static per-kind rule, never
//! inferred from the shape of a value.

/// How many values a property kind may carry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Multiplicity {
    /// At most one value.
    Single,
    /// Zero or more values, one table entry each.
    Multi,
}

/// Metadata property kind.
///
/// Code `0x0A` is unassigned and `0x00` is the table terminator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum PropertyKind {
    /// Interpreter cycles per 60 Hz frame (24-bit).
    CyclesPerFrame = 0x01,
    Name = 0x02,
    Description = 0x03,
    /// One entry per author.
    Authors = 0x04,
    /// One entry per URL.
    Urls = 0x05,
    /// Unix timestamp in seconds (32-bit).
    ReleaseDate = 0x06,
    /// Cover art bitmap.
    Image = 0x07,
    /// Logical to physical key mapping.
    Keys = 0x08,
    /// Color palette, one RGB triple per plane value.
    Colours = 0x09,
    ScreenOrientation = 0x0B,
    /// Custom font and the address to load it at.
    FontData = 0x0C,
    /// Free-form credit for the tool that wrote the file.
    ToolVanity = 0x0D,
    LicenseInformation = 0x0E,
}

impl PropertyKind {
    pub const ALL: &'static [PropertyKind] = &[
        Self::CyclesPerFrame,
        Self::Name,
        Self::Description,
        Self::Authors,
        Self::Urls,
        Self::ReleaseDate,
        Self::Image,
        Self::Keys,
        Self::Colours,
        Self::ScreenOrientation,
        Self::FontData,
        Self::ToolVanity,
        Self::LicenseInformation,
    ];

    /// Convert from raw kind byte.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(Self::CyclesPerFrame),
            0x02 => Some(Self::Name),
            0x03 => Some(Self::Description),
            0x04 => Some(Self::Authors),
            0x05 => Some(Self::Urls),
            0x06 => Some(Self::ReleaseDate),
            0x07 => Some(Self::Image),
            0x08 => Some(Self::Keys),
            0x09 => Some(Self::Colours),
            0x0B => Some(Self::ScreenOrientation),
            0x0C => Some(Self::FontData),
            0x0D => Some(Self::ToolVanity),
            0x0E => Some(Self::LicenseInformation),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Canonical property-sheet key (camelCase, plural for multi-valued kinds).
    pub fn name(self) -> &'static str {
        match self {
            Self::CyclesPerFrame => "cyclesPerFrame",
            Self::Name => "name",
            Self::Description => "description",
            Self::Authors => "authors",
            Self::Urls => "urls",
            Self::ReleaseDate => "releaseDate",
            Self::Image => "image",
            Self::Keys => "keys",
            Self::Colours => "colours",
            Self::ScreenOrientation => "screenOrientation",
            Self::FontData => "fontData",
            Self::ToolVanity => "toolVanity",
            Self::LicenseInformation => "licenseInformation",
        }
    }

    /// Look up a kind by property-sheet key, accepting the singular aliases
    /// `author` and `url`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "author" => Some(Self::Authors),
            "url" => Some(Self::Urls),
            _ => Self::ALL.iter().copied().find(|k| k.name() == name),
        }
    }

    pub fn multiplicity(self) -> Multiplicity {
        match self {
            Self::Authors | Self::Urls => Multiplicity::Multi,
            _ => Multiplicity::Single,
        }
    }

    pub fn is_multi(self) -> bool {
        self.multiplicity() == Multiplicity::Multi
    }

    /// Whether the payload is a NUL-terminated ASCII string.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Description
                | Self::Authors
                | Self::Urls
                | Self::ToolVanity
                | Self::LicenseInformation
        )
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
