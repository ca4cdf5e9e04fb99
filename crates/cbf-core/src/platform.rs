//! Platform tags for bytecode variants.
//!
//! Each bytecode table entry names the interpreter the bytecode targets. The
//! numeric codes are fixed reference data; `0x00` is reserved for the table
//! terminator and never names a platform.

macro_rules! platforms {
    ($( $(#[$doc:meta])* $variant:ident = $code:literal => $name:literal, )+) => {
        /// Target interpreter or platform variant.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Platform {
            $( $(#[$doc])* $variant = $code, )+
        }

        impl Platform {
            /// Every platform, in code order.
            pub const ALL: &'static [Platform] = &[$(Self::$variant),+];

            /// Convert from the raw tag byte.
            pub fn from_u8(v: u8) -> Option<Self> {
                match v {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Human-readable platform name.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }
        }
    };
}

platforms! {
    Chip8 = 0x01 => "CHIP-8",
    Chip8Half = 0x02 => "CHIP-8 1/2",
    Chip8I = 0x03 => "CHIP-8I",
    Chip8II = 0x04 => "CHIP-8 II aka. Keyboard Kontrol",
    Chip8III = 0x05 => "CHIP-8III",
    Chip8TwoPage = 0x06 => "Two-page display for CHIP-8",
    Chip8C = 0x07 => "CHIP-8C",
    Chip10 = 0x08 => "CHIP-10",
    Chip8SaveRestore = 0x09 => "CHIP-8 modification for saving and restoring variables",
    Chip8ImprovedSaveRestore = 0x0A => "Improved CHIP-8 modification for saving and restoring variables",
    Chip8RelativeBranching = 0x0B => "CHIP-8 modification with relative branching",
    Chip8RelativeBranchingAlt = 0x0C => "Another CHIP-8 modification with relative branching",
    Chip8FastDxyn = 0x0D => "CHIP-8 modification with fast, single-dot DXYN",
    Chip8IoPort = 0x0E => "CHIP-8 with I/O port driver routine",
    Chip8MultiplyDivide = 0x0F => "CHIP-8 8-bit multiply and divide",
    HiResChip8 = 0x10 => "HI-RES CHIP-8 (four-page display)",
    HiResChip8Io = 0x11 => "HI-RES CHIP-8 with I/O",
    HiResChip8PageSwitching = 0x12 => "HI-RES CHIP-8 with page switching",
    Chip8E = 0x13 => "CHIP-8E",
    Chip8ImprovedBnnn = 0x14 => "CHIP-8 with improved BNNN",
    Chip8Scrolling = 0x15 => "CHIP-8 scrolling routine",
    Chip8X = 0x16 => "CHIP-8X",
    Chip8XTwoPage = 0x17 => "Two-page display for CHIP-8X",
    Chip8XHiRes = 0x18 => "Hi-res CHIP-8X",
    Chip8Y = 0x19 => "CHIP-8Y",
    Chip8CopyToScreen = 0x1A => "CHIP-8 “Copy to Screen”",
    ChipBeta = 0x1B => "CHIP-BETA",
    Chip8M = 0x1C => "CHIP-8M",
    MultipleNim = 0x1D => "Multiple Nim interpreter",
    DoubleArray = 0x1E => "Double Array Modification",
    /// CHIPOS on the DREAM 6800.
    Chipos = 0x1F => "CHIP-8 for DREAM 6800 (CHIPOS)",
    Chiposlo = 0x20 => "CHIP-8 with logical operators for DREAM 6800 (CHIPOSLO)",
    ChiposJoystick = 0x21 => "CHIP-8 for DREAM 6800 with joystick",
    Chipos2K = 0x22 => "2K CHIPOS for DREAM 6800",
    Eti660 = 0x23 => "CHIP-8 for ETI-660",
    Eti660Color = 0x24 => "CHIP-8 with color support for ETI-660",
    Eti660HiRes = 0x25 => "CHIP-8 for ETI-660 with high resolution",
    CosmacElf = 0x26 => "CHIP-8 for COSMAC ELF",
    ChipVdu = 0x27 => "CHIP-VDU / CHIP-8 for the ACE VDU",
    Chip8Ae = 0x28 => "CHIP-8 AE (ACE Extended)",
    DreamcardsExtended = 0x29 => "Dreamcards Extended CHIP-8 V2.0",
    Amiga = 0x2A => "Amiga CHIP-8 interpreter",
    Chip48 = 0x2B => "CHIP-48",
    SuperChip10 = 0x2C => "SUPER-CHIP 1.0",
    SuperChip11 = 0x2D => "SUPER-CHIP 1.1",
    GChip = 0x2E => "GCHIP",
    SchipCompatibility = 0x2F => "SCHIP Compatibility (SCHPC) and GCHIP Compatibility (GCHPC)",
    Vip2k = 0x30 => "VIP2K CHIP-8",
    SuperChipScrollUp = 0x31 => "SUPER-CHIP with scroll up",
    Chip8Run = 0x32 => "chip8run",
    MegaChip = 0x33 => "Mega-Chip",
    XoChip = 0x34 => "XO-CHIP",
    Octo = 0x35 => "Octo",
    Chip8Classic = 0x36 => "CHIP-8 Classic / Color",
}

impl Platform {
    /// Raw tag byte as stored in the bytecode table.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a platform by display name or by numeric code (`"45"`, `"0x2D"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(platform) = Self::ALL.iter().copied().find(|p| p.name() == name) {
            return Some(platform);
        }
        parse_code(name).and_then(Self::from_u8)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal code byte.
pub(crate) fn parse_code(s: &str) -> Option<u8> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}
