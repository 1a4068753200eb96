// PPU register types: control, mask, status, address and scroll latches.

use bitflags::bitflags;

bitflags! {
    /// $2000 PPUCTRL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ControlRegister: u8 {
        const NAMETABLE1              = 0b0000_0001;
        const NAMETABLE2              = 0b0000_0010;
        const VRAM_ADD_INCREMENT      = 0b0000_0100;
        const SPRITE_PATTERN_ADDR     = 0b0000_1000;
        const BACKGROUND_PATTERN_ADDR = 0b0001_0000;
        const SPRITE_SIZE             = 0b0010_0000;
        const MASTER_SLAVE_SELECT     = 0b0100_0000;
        const GENERATE_NMI            = 0b1000_0000;
    }
}

impl ControlRegister {
    pub fn vram_addr_increment(&self) -> u16 {
        if self.contains(ControlRegister::VRAM_ADD_INCREMENT) {
            32
        } else {
            1
        }
    }

    pub fn background_pattern_bank(&self) -> u16 {
        if self.contains(ControlRegister::BACKGROUND_PATTERN_ADDR) {
            0x1000
        } else {
            0x0000
        }
    }

    pub fn sprite_pattern_bank(&self) -> u16 {
        if self.contains(ControlRegister::SPRITE_PATTERN_ADDR) {
            0x1000
        } else {
            0x0000
        }
    }

    pub fn generate_nmi(&self) -> bool {
        self.contains(ControlRegister::GENERATE_NMI)
    }
}

bitflags! {
    /// $2001 PPUMASK.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MaskRegister: u8 {
        const GREYSCALE            = 0b0000_0001;
        const SHOW_BACKGROUND_LEFT = 0b0000_0010;
        const SHOW_SPRITES_LEFT    = 0b0000_0100;
        const SHOW_BACKGROUND      = 0b0000_1000;
        const SHOW_SPRITES         = 0b0001_0000;
        const EMPHASIZE_RED        = 0b0010_0000;
        const EMPHASIZE_GREEN      = 0b0100_0000;
        const EMPHASIZE_BLUE       = 0b1000_0000;
    }
}

bitflags! {
    /// $2002 PPUSTATUS.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StatusRegister: u8 {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        const VBLANK_STARTED  = 0b1000_0000;
    }
}

/// $2006 PPUADDR: two bytes plus a hi/lo write latch, masked modulo $4000.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressRegister {
    value: [u8; 2], // [hi, lo]
    hi_latch: bool,
}

impl AddressRegister {
    pub fn new() -> Self {
        AddressRegister {
            value: [0, 0],
            hi_latch: true,
        }
    }

    pub fn get(&self) -> u16 {
        (u16::from(self.value[0]) << 8) | u16::from(self.value[1])
    }

    fn set(&mut self, value: u16) {
        self.value[0] = (value >> 8) as u8;
        self.value[1] = (value & 0xFF) as u8;
    }

    pub fn update(&mut self, byte: u8) {
        if self.hi_latch {
            self.value[0] = byte;
        } else {
            self.value[1] = byte;
        }
        if self.get() > 0x3FFF {
            self.set(self.get() & 0x3FFF);
        }
        self.hi_latch = !self.hi_latch;
    }

    pub fn increment(&mut self, step: u16) {
        let lo = self.value[1];
        self.value[1] = self.value[1].wrapping_add(step as u8);
        if self.value[1] < lo {
            self.value[0] = self.value[0].wrapping_add(1);
        }
        if self.get() > 0x3FFF {
            self.set(self.get() & 0x3FFF);
        }
    }

    pub fn reset_latch(&mut self) {
        self.hi_latch = true;
    }
}

/// $2005 PPUSCROLL: x then y, toggled by the same write latch discipline.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollRegister {
    pub x: u8,
    pub y: u8,
    expecting_x: bool,
}

impl ScrollRegister {
    pub fn new() -> Self {
        ScrollRegister {
            x: 0,
            y: 0,
            expecting_x: true,
        }
    }

    pub fn write(&mut self, byte: u8) {
        if self.expecting_x {
            self.x = byte;
        } else {
            self.y = byte;
        }
        self.expecting_x = !self.expecting_x;
    }

    pub fn reset_latch(&mut self) {
        self.expecting_x = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_register_toggles_hi_lo() {
        let mut addr = AddressRegister::new();
        addr.update(0x21);
        addr.update(0x05);
        assert_eq!(addr.get(), 0x2105);
    }

    #[test]
    fn address_register_masks_above_3fff() {
        let mut addr = AddressRegister::new();
        addr.update(0xFF);
        addr.update(0xFF);
        assert!(addr.get() <= 0x3FFF);
    }

    #[test]
    fn address_register_increment_carries() {
        let mut addr = AddressRegister::new();
        addr.update(0x20);
        addr.update(0xFF);
        addr.increment(1);
        assert_eq!(addr.get(), 0x2100);
    }

    #[test]
    fn scroll_register_writes_x_then_y() {
        let mut scroll = ScrollRegister::new();
        scroll.write(10);
        scroll.write(20);
        assert_eq!((scroll.x, scroll.y), (10, 20));
    }

    #[test]
    fn control_register_vram_increment() {
        let ctrl = ControlRegister::from_bits_truncate(0b0000_0100);
        assert_eq!(ctrl.vram_addr_increment(), 32);
        assert_eq!(ControlRegister::empty().vram_addr_increment(), 1);
    }
}
