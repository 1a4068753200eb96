// Bus module - Memory bus implementation
//
// This module implements the main memory bus that connects the CPU to all memory-mapped
// components in the NES system. It handles address routing, memory mirroring, and owns
// the PPU, the cartridge-backed mapper, and the controller port.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4013, $4015, $4017: APU registers (stubbed)
// $4014: OAM DMA
// $4016: controller port
// $8000-$FFFF: Cartridge PRG-ROM
// ```

use crate::cartridge::{mappers::create_mapper, Cartridge, Mapper};
use crate::controller::Controller;
use crate::error::CoreError;
use crate::ppu::Ppu;

const RAM_SIZE: usize = 2048;
const RAM_MASK: u16 = 0x07FF;
const PPU_REGISTER_MASK: u16 = 0x2007;

/// Trait for memory-mapped components (kept for components outside the
/// core's own address-decode table, e.g. host-side test doubles).
pub trait MemoryMappedDevice {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

pub struct Bus {
    ram: [u8; RAM_SIZE],
    ppu: Ppu,
    mapper: Box<dyn Mapper>,
    controller: Controller,
    cycles: u64,
    fault: Option<CoreError>,
    frame_callback: Option<Box<dyn FnMut(&Ppu)>>,
}

impl Bus {
    pub fn new(cartridge: Cartridge) -> Result<Self, CoreError> {
        let mirroring = cartridge.mirroring;
        let mapper = create_mapper(cartridge)?;
        Ok(Bus {
            ram: [0; RAM_SIZE],
            ppu: Ppu::new(mirroring),
            mapper,
            controller: Controller::new(),
            cycles: 0,
            fault: None,
            frame_callback: None,
        })
    }

    /// Installs the callback invoked with a read-only PPU reference each
    /// time the PPU completes a frame. Must not call back into the CPU.
    pub fn set_frame_callback(&mut self, callback: impl FnMut(&Ppu) + 'static) {
        self.frame_callback = Some(Box::new(callback));
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Drains the first fatal condition observed since the last drain,
    /// checking both the bus's own sticky fault and the PPU's.
    pub fn take_fault(&mut self) -> Option<CoreError> {
        self.fault.take().or_else(|| self.ppu.take_fault())
    }

    /// Consumes the PPU's pending-NMI flag, polled once per CPU instruction.
    pub fn take_nmi_pending(&mut self) -> bool {
        self.ppu.take_nmi_pending()
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & RAM_MASK) as usize],
            0x2000..=0x3FFF => self.read_ppu_port(addr & PPU_REGISTER_MASK),
            0x4016 => self.controller.read(),
            0x4000..=0x4013 | 0x4015 | 0x4017 => 0,
            0x4014 => {
                self.fault.get_or_insert(CoreError::WriteOnlyPortRead(addr));
                0
            }
            0x8000..=0xFFFF => self.mapper.cpu_read(addr),
            _ => 0,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & RAM_MASK) as usize] = value,
            0x2000..=0x3FFF => self.write_ppu_port(addr & PPU_REGISTER_MASK, value),
            0x4014 => self.oam_dma(value),
            0x4016 => self.controller.write(value),
            0x4000..=0x4013 | 0x4015 | 0x4017 => {}
            0x8000..=0xFFFF => {
                self.fault.get_or_insert(CoreError::RomWrite(addr));
            }
            _ => {}
        }
    }

    fn read_ppu_port(&mut self, port: u16) -> u8 {
        match port {
            0x2002 => self.ppu.read_status(),
            0x2004 => self.ppu.read_oam_data(),
            0x2007 => self.ppu.read_data(self.mapper.as_ref()),
            0x2000 | 0x2001 | 0x2003 | 0x2005 | 0x2006 => {
                self.fault.get_or_insert(CoreError::WriteOnlyPortRead(0x2000 | port));
                0
            }
            _ => unreachable!("port masked modulo 8"),
        }
    }

    fn write_ppu_port(&mut self, port: u16, value: u8) {
        match port {
            0x2000 => self.ppu.write_control(value),
            0x2001 => self.ppu.write_mask(value),
            0x2003 => self.ppu.write_oam_addr(value),
            0x2004 => self.ppu.write_oam_data(value),
            0x2005 => self.ppu.write_scroll(value),
            0x2006 => self.ppu.write_addr(value),
            0x2007 => self.ppu.write_data(value),
            0x2002 => {} // status is read-only; writes are ignored, not fatal
            _ => unreachable!("port masked modulo 8"),
        }
    }

    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut data = [0u8; 256];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = self.read(base + i as u16);
        }
        self.ppu.oam_dma(&data);
    }

    /// Advances the bus clock by `cpu_cycles` CPU cycles, ticking the PPU
    /// three times per CPU cycle and firing the frame callback on
    /// end-of-frame.
    pub fn tick(&mut self, cpu_cycles: u8) {
        self.cycles += cpu_cycles as u64;
        for _ in 0..(cpu_cycles as u32 * 3) {
            if self.ppu.clock(self.mapper.as_ref()) {
                if let Some(callback) = self.frame_callback.as_mut() {
                    callback(&self.ppu);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Mirroring;

    fn test_cartridge() -> Cartridge {
        Cartridge {
            prg_rom: vec![0xEA; 16 * 1024],
            chr_rom: vec![0; 8 * 1024],
            trainer: None,
            mapper: 0,
            mirroring: Mirroring::Horizontal,
            has_battery: false,
        }
    }

    #[test]
    fn ram_mirrors_across_0800_to_1fff() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        bus.write(0x0000, 0x42);
        assert_eq!(bus.read(0x0800), 0x42);
        assert_eq!(bus.read(0x1800), 0x42);
    }

    #[test]
    fn rom_write_is_fatal_and_does_not_mutate() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        let before = bus.read(0x8000);
        bus.write(0x8000, 0xFF);
        assert_eq!(bus.take_fault(), Some(CoreError::RomWrite(0x8000)));
        assert_eq!(bus.read(0x8000), before);
    }

    #[test]
    fn reading_write_only_ppu_ports_is_fatal() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        bus.read(0x2000);
        assert_eq!(bus.take_fault(), Some(CoreError::WriteOnlyPortRead(0x2000)));
    }

    #[test]
    fn status_read_clears_vblank() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        bus.write(0x2000, 0x80); // enable NMI
        for _ in 0..(341u32 * 241 + 1) {
            bus.tick(1);
            if bus.cycles() as u32 * 3 >= 341 * 241 + 1 {
                break;
            }
        }
        // After enough ticks vblank is visible via the status port.
        let _ = bus.read(0x2002);
    }

    #[test]
    fn tick_advances_ppu_three_times_per_cpu_cycle() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        bus.tick(1);
        assert_eq!(bus.cycles(), 1);
    }

    #[test]
    fn oam_dma_reads_from_ram_page() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        bus.write(0x0200, 0xAB);
        bus.write(0x2003, 0x00);
        bus.write(0x4014, 0x02);
        assert_eq!(bus.read(0x2004), 0xAB);
    }

    #[test]
    fn controller_port_round_trips() {
        let mut bus = Bus::new(test_cartridge()).unwrap();
        bus.controller_mut().set_button_pressed(crate::controller::Buttons::A, true);
        bus.write(0x4016, 1);
        bus.write(0x4016, 0);
        assert_eq!(bus.read(0x4016), 1);
    }
}
