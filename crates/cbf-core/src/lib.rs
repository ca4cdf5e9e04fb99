#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the CHIP-8 Binary Format (CBF).
//!
//! Three layers:
//! - **Code tables**: the fixed numeric enumerations stored in a `.c8b` file
//!   ([`Platform`], [`PropertyKind`], [`Key`], [`ScreenOrientation`])
//! - **Values**: typed property values and the [`PropertySet`] that groups them
//! - **Diagnostics**: the error collector shared by the JSON boundary and the
//!   binary codec in `cbf-format`

pub mod colors;
pub mod diagnostics;
pub mod json;
pub mod platform;
pub mod property;
pub mod property_set;
pub mod value;

#[cfg(test)]
mod json_tests;

pub use colors::Colors;
pub use diagnostics::{Diagnostic, DiagnosticBuilder, Diagnostics, ErrorKind};
pub use platform::Platform;
pub use property::{Multiplicity, PropertyKind};
pub use property_set::PropertySet;
pub use value::{FontData, Image, Key, KeyMap, PropertyValue, Rgb, ScreenOrientation};

/// A pair of bytecode variants and metadata properties.
///
/// This is the value set that `pack` consumes and `unpack` produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cartridge {
    pub properties: PropertySet,
    pub bytecode: Vec<BytecodeVariant>,
}

impl Cartridge {
    pub fn new(properties: PropertySet, bytecode: Vec<BytecodeVariant>) -> Self {
        Self {
            properties,
            bytecode,
        }
    }
}

/// One stored instruction blob plus the platforms it runs on.
///
/// All listed platforms share a single copy of `bytecode` in the encoded file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BytecodeVariant {
    pub platforms: Vec<Platform>,
    pub bytecode: Vec<u8>,
}

impl BytecodeVariant {
    pub fn new(platforms: impl IntoIterator<Item = Platform>, bytecode: impl Into<Vec<u8>>) -> Self {
        Self {
            platforms: platforms.into_iter().collect(),
            bytecode: bytecode.into(),
        }
    }

    /// Display names of the platforms, in table order.
    pub fn platform_names(&self) -> Vec<&'static str> {
        self.platforms.iter().map(|p| p.name()).collect()
    }
}
