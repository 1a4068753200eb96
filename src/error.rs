//! The one fatal-error currency for the whole crate.
//!
//! Every condition the core treats as unrecoverable (malformed cartridge,
//! unknown opcode, illegal memory access, impossible rendering input) is a
//! variant of [`CoreError`]. The core never retries or suppresses one of
//! these; it surfaces them to the host through [`crate::cpu::Cpu::step`].

use thiserror::Error;

/// A fatal error raised by the core. See module docs for the error policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid iNES magic bytes")]
    InvalidMagic,

    #[error("unsupported iNES version (expected v1)")]
    UnsupportedVersion,

    #[error("non-zero reserved header bytes")]
    ReservedHeaderNotZero,

    #[error("cartridge mapper {0} is not supported")]
    UnsupportedMapper(u8),

    #[error("unknown opcode ${0:02X} at ${1:04X}")]
    UnknownOpcode(u8, u16),

    #[error("write to program ROM at ${0:04X}")]
    RomWrite(u16),

    #[error("read of write-only PPU port ${0:04X}")]
    WriteOnlyPortRead(u16),

    #[error("access to unused PPU address range at ${0:04X}")]
    UnusedPpuAddress(u16),

    #[error("write to pattern table at ${0:04X}")]
    PatternTableWrite(u16),

    #[error("palette index {0} out of range")]
    PaletteIndexOutOfRange(u8),
}
