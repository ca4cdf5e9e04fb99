#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Encoder and decoder for the CHIP-8 Binary Format (CBF).
//!
//! A CBF file bundles platform-tagged bytecode with a table of metadata
//! properties. [`pack`] writes one, [`unpack`] reads it back:
//!
//! ```
//! use cbf_core::{BytecodeVariant, Platform, PropertyKind, PropertySet};
//!
//! let properties = PropertySet::new().with(PropertyKind::Name, "Test");
//! let variants = [BytecodeVariant::new([Platform::Chip8], vec![0x00u8, 0xE0])];
//!
//! let bytes = cbf_format::pack(&properties, &variants).unwrap();
//! let cartridge = cbf_format::unpack(&bytes).unwrap();
//! assert_eq!(cartridge.properties, properties);
//! ```
//!
//! Both directions report every problem they find, not just the first one,
//! through [`Error::diagnostics`].

pub mod config;
pub mod constants;
pub mod container;
pub mod dump;
pub mod header;
pub mod layout;
pub mod primitives;
pub mod property_codec;
mod unpack;


use cbf_core::{BytecodeVariant, Cartridge, Diagnostics, PropertySet};

pub use config::Config;
pub use constants::{MAGIC, VERSION};
pub use container::{Container, Segment};
pub use dump::dump;
pub use header::Header;
pub use layout::{Layout, Placement, Reference, SegmentId};

/// Errors from packing or unpacking.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("packing failed with {} errors", .0.len())]
    Pack(Diagnostics),

    #[error("unpacking failed with {} errors", .0.len())]
    Unpack(Diagnostics),
}

impl Error {
    /// Every problem found by the failed call.
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Self::Pack(diag) | Self::Unpack(diag) => diag,
        }
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        match self {
            Self::Pack(diag) | Self::Unpack(diag) => diag,
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Plan and encode every segment without flattening them.
pub fn plan(properties: &PropertySet, variants: &[BytecodeVariant]) -> Result<Container> {
    container::build(properties, variants).map_err(Error::Pack)
}

/// Encode `properties` and `variants` into a CBF file.
pub fn pack(properties: &PropertySet, variants: &[BytecodeVariant]) -> Result<Vec<u8>> {
    pack_with(&Config::default(), properties, variants)
}

/// [`pack`] with explicit options.
pub fn pack_with(
    config: &Config,
    properties: &PropertySet,
    variants: &[BytecodeVariant],
) -> Result<Vec<u8>> {
    let container = plan(properties, variants)?;
    if config.verbose {
        tracing::info!("packed layout:\n{}", dump(&container, config.colors));
    }
    Ok(container.into_bytes())
}

/// Decode a CBF file.
pub fn unpack(bytes: &[u8]) -> Result<Cartridge> {
    unpack::read(bytes).map_err(Error::Unpack)
}

/// Byte conversions on [`Cartridge`].
pub trait CartridgeExt: Sized {
    fn to_bytes(&self) -> Result<Vec<u8>>;
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

impl CartridgeExt for Cartridge {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        pack(&self.properties, &self.bytecode)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        unpack(bytes)
    }
}
