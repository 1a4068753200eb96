// PPU module - Picture Processing Unit implementation
//
// Models the register/memory/timing surface described in the external
// interfaces and component-design documentation: a 2KB name-table RAM, a
// 32-byte palette, a 256-byte OAM, nine memory-mapped register ports, a
// dot/scanline clock, and a whole-frame renderer that runs once per
// vertical-blank/pre-render boundary.

pub mod constants;
mod memory;
mod palette;
mod registers;
mod rendering;

use constants::{CYCLES_PER_SCANLINE, SCANLINES_PER_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};
use memory::{mirror_nametable_addr, mirror_palette_addr};
pub use palette::{palette_to_rgba, NES_PALETTE};
pub use registers::{AddressRegister, ControlRegister, MaskRegister, ScrollRegister, StatusRegister};

use crate::cartridge::{Mapper, Mirroring};
use crate::error::CoreError;

pub struct Ppu {
    nametables: [u8; 2048],
    palette: [u8; 32],
    oam: [u8; 256],
    oam_addr: u8,
    mirroring: Mirroring,
    data_buffer: u8,

    scanline: u16,
    dot: u16,

    addr: AddressRegister,
    ctrl: ControlRegister,
    mask: MaskRegister,
    status: StatusRegister,
    scroll: ScrollRegister,

    nmi_pending: bool,
    frame_buffer: Vec<u8>,
    fault: Option<CoreError>,
}

impl Ppu {
    pub fn new(mirroring: Mirroring) -> Self {
        Ppu {
            nametables: [0; 2048],
            palette: [0; 32],
            oam: [0; 256],
            oam_addr: 0,
            mirroring,
            data_buffer: 0,
            scanline: 0,
            dot: 0,
            addr: AddressRegister::new(),
            ctrl: ControlRegister::empty(),
            mask: MaskRegister::empty(),
            status: StatusRegister::empty(),
            scroll: ScrollRegister::new(),
            nmi_pending: false,
            frame_buffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * 4],
            fault: None,
        }
    }

    /// Advances the PPU clock by one dot. Returns `true` exactly on the dot
    /// that completes a frame (triggering background/sprite rendering).
    pub fn clock(&mut self, mapper: &dyn Mapper) -> bool {
        self.dot += 1;
        if self.dot < CYCLES_PER_SCANLINE {
            return false;
        }
        self.dot = 0;
        self.scanline += 1;

        if self.scanline == 241 {
            self.status.insert(StatusRegister::VBLANK_STARTED);
            if self.ctrl.generate_nmi() {
                self.nmi_pending = true;
            }
            return false;
        }

        if self.scanline == SCANLINES_PER_FRAME {
            self.scanline = 0;
            self.status.remove(StatusRegister::VBLANK_STARTED);
            self.nmi_pending = false;
            self.render_frame(mapper);
            return true;
        }

        false
    }

    /// Consumes and clears the pending-NMI flag; polled once per CPU
    /// instruction before the opcode fetch.
    pub fn take_nmi_pending(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    /// Drains the first fatal condition observed since the last drain.
    pub fn take_fault(&mut self) -> Option<CoreError> {
        self.fault.take()
    }

    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    // ---- register ports ----

    pub fn write_control(&mut self, value: u8) {
        self.ctrl = ControlRegister::from_bits_truncate(value);
    }

    pub fn write_mask(&mut self, value: u8) {
        self.mask = MaskRegister::from_bits_truncate(value);
    }

    pub fn read_status(&mut self) -> u8 {
        let value = self.status.bits();
        self.status.remove(StatusRegister::VBLANK_STARTED);
        self.addr.reset_latch();
        self.scroll.reset_latch();
        value
    }

    pub fn write_oam_addr(&mut self, value: u8) {
        self.oam_addr = value;
    }

    pub fn read_oam_data(&self) -> u8 {
        self.oam[self.oam_addr as usize]
    }

    pub fn write_oam_data(&mut self, value: u8) {
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    pub fn write_scroll(&mut self, value: u8) {
        self.scroll.write(value);
    }

    pub fn write_addr(&mut self, value: u8) {
        self.addr.update(value);
    }

    /// Reads $2007 PPUDATA: pattern/name-table reads are buffered one access
    /// behind, palette reads return directly.
    pub fn read_data(&mut self, mapper: &dyn Mapper) -> u8 {
        let addr = self.addr.get();
        self.addr.increment(self.ctrl.vram_addr_increment());

        match addr {
            0x0000..=0x1FFF => {
                let result = self.data_buffer;
                self.data_buffer = mapper.ppu_read(addr);
                result
            }
            0x2000..=0x2FFF => {
                let result = self.data_buffer;
                self.data_buffer = self.nametables[mirror_nametable_addr(addr, self.mirroring)];
                result
            }
            0x3000..=0x3EFF => {
                self.fault.get_or_insert(CoreError::UnusedPpuAddress(addr));
                0
            }
            0x3F00..=0x3FFF => self.palette[mirror_palette_addr(addr)],
            _ => unreachable!("address register is masked modulo 0x4000"),
        }
    }

    /// Writes $2007 PPUDATA: pattern-table writes and the unused
    /// $3000..=$3EFF range are fatal.
    pub fn write_data(&mut self, value: u8) {
        let addr = self.addr.get();
        self.addr.increment(self.ctrl.vram_addr_increment());

        match addr {
            0x0000..=0x1FFF => {
                self.fault.get_or_insert(CoreError::PatternTableWrite(addr));
            }
            0x2000..=0x2FFF => {
                self.nametables[mirror_nametable_addr(addr, self.mirroring)] = value;
            }
            0x3000..=0x3EFF => {
                self.fault.get_or_insert(CoreError::UnusedPpuAddress(addr));
            }
            0x3F00..=0x3FFF => {
                self.palette[mirror_palette_addr(addr)] = value;
            }
            _ => unreachable!("address register is masked modulo 0x4000"),
        }
    }

    /// OAM-DMA: streams a 256-byte page into OAM starting at the current
    /// OAM address, wrapping the pointer.
    pub fn oam_dma(&mut self, data: &[u8; 256]) {
        for &byte in data {
            self.oam[self.oam_addr as usize] = byte;
            self.oam_addr = self.oam_addr.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::mappers::create_mapper;
    use crate::cartridge::Cartridge;

    fn test_mapper() -> Box<dyn Mapper> {
        let cartridge = Cartridge {
            prg_rom: vec![0; 16 * 1024],
            chr_rom: vec![0; 8 * 1024],
            trainer: None,
            mapper: 0,
            mirroring: Mirroring::Horizontal,
            has_battery: false,
        };
        create_mapper(cartridge).unwrap()
    }

    #[test]
    fn vblank_set_at_scanline_241_dot_1() {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        for _ in 0..(CYCLES_PER_SCANLINE as u32 * 241 + 1) {
            ppu.clock(mapper.as_ref());
        }
        assert!(ppu.status.contains(StatusRegister::VBLANK_STARTED));
    }

    #[test]
    fn nmi_pending_requires_generate_nmi_bit() {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        ppu.write_control(0); // NMI disabled
        for _ in 0..(CYCLES_PER_SCANLINE as u32 * 241 + 1) {
            ppu.clock(mapper.as_ref());
        }
        assert!(!ppu.take_nmi_pending());
    }

    #[test]
    fn signals_end_of_frame_exactly_once_per_89342_ticks() {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        let mut frames = 0;
        for _ in 0..constants::CYCLES_PER_FRAME {
            if ppu.clock(mapper.as_ref()) {
                frames += 1;
            }
        }
        assert_eq!(frames, 1);
    }

    #[test]
    fn status_read_clears_vblank_and_latches() {
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        ppu.status.insert(StatusRegister::VBLANK_STARTED);
        ppu.write_addr(0x21);
        let value = ppu.read_status();
        assert_ne!(value & 0x80, 0);
        assert!(!ppu.status.contains(StatusRegister::VBLANK_STARTED));
        ppu.write_addr(0x05);
        ppu.write_addr(0x06);
        assert_eq!(ppu.addr.get(), 0x0506);
    }

    #[test]
    fn rendering_faults_on_out_of_range_palette_byte() {
        let mapper = test_mapper();
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        ppu.write_addr(0x3F);
        ppu.write_addr(0x00);
        ppu.write_data(0xFF); // raw CPU write, not masked to 6 bits

        for _ in 0..(CYCLES_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32 + 1) {
            ppu.clock(mapper.as_ref());
        }

        assert_eq!(
            ppu.take_fault(),
            Some(CoreError::PaletteIndexOutOfRange(0xFF))
        );
    }

    #[test]
    fn oam_dma_wraps_from_current_pointer() {
        let mut ppu = Ppu::new(Mirroring::Horizontal);
        ppu.write_oam_addr(0xFE);
        let mut data = [0u8; 256];
        data[0] = 0xAA;
        data[1] = 0xBB;
        ppu.oam_dma(&data);
        assert_eq!(ppu.oam[0xFE], 0xAA);
        assert_eq!(ppu.oam[0xFF], 0xBB);
    }
}
