// NES Emulator Library
// Core library for the NES emulator implementation

// Public modules
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod error;
pub mod ppu;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use bus::{Bus, MemoryMappedDevice};
pub use cartridge::{Cartridge, Mapper, Mirroring};
pub use controller::{Buttons, Controller};
pub use cpu::Cpu;
pub use error::CoreError;
pub use ppu::Ppu;
