// PPU video memory map: name-table mirroring and palette mirroring.

use super::constants::NAMETABLE_SIZE;
use crate::cartridge::Mirroring;

/// Folds a name-table address ($2000..=$2FFF) down to a 0..2048 offset into
/// physical name-table RAM, per the mirroring mode selected by the cartridge.
pub(super) fn mirror_nametable_addr(addr: u16, mirroring: Mirroring) -> usize {
    let vram_index = (addr & 0x2FFF) - 0x2000;
    let table = vram_index as usize / NAMETABLE_SIZE;

    let physical_table = match mirroring {
        Mirroring::Vertical => table % 2,
        Mirroring::Horizontal => table / 2,
        Mirroring::FourScreen => 0,
    };

    (vram_index as usize % NAMETABLE_SIZE) + physical_table * NAMETABLE_SIZE
}

/// Folds a palette address ($3F00..=$3FFF) down into the 32-byte palette RAM,
/// remapping the four background-mirror slots onto their sprite counterparts.
pub(super) fn mirror_palette_addr(addr: u16) -> usize {
    let index = (addr - 0x3F00) % 32;
    match index {
        0x10 | 0x14 | 0x18 | 0x1C => (index - 0x10) as usize,
        _ => index as usize,
    }
}
