// Shared test fixtures for unit tests scattered across the crate.

use crate::bus::Bus;
use crate::cartridge::{Cartridge, Mirroring};

pub(crate) fn minimal_cartridge() -> Cartridge {
    Cartridge {
        prg_rom: vec![0xEA; 16 * 1024],
        chr_rom: vec![0; 8 * 1024],
        trainer: None,
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_battery: false,
    }
}

pub(crate) fn test_bus() -> Bus {
    Bus::new(minimal_cartridge()).unwrap()
}

/// A bus whose cartridge bakes in the RESET/NMI/IRQ vectors at
/// construction time, since the real $FFFA-$FFFF range lives in ROM and a
/// `bus.write` to it is silently dropped (and faults the sticky bus error).
pub(crate) fn test_bus_with_vectors(reset: u16, nmi: u16, irq: u16) -> Bus {
    let mut cartridge = minimal_cartridge();
    let len = cartridge.prg_rom.len();
    for (addr, value) in [
        (0xFFFAu16, (nmi & 0xFF) as u8),
        (0xFFFB, (nmi >> 8) as u8),
        (0xFFFC, (reset & 0xFF) as u8),
        (0xFFFD, (reset >> 8) as u8),
        (0xFFFE, (irq & 0xFF) as u8),
        (0xFFFF, (irq >> 8) as u8),
    ] {
        cartridge.prg_rom[(addr as usize - 0x8000) % len] = value;
    }
    Bus::new(cartridge).unwrap()
}
