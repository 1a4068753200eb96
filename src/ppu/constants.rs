// PPU constants

/// Size of nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Screen width in pixels
pub(super) const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub(super) const SCREEN_HEIGHT: usize = 240;

/// Nametable width in tiles (32 tiles)
pub(super) const NAMETABLE_WIDTH: usize = 32;

/// Tile size in pixels (8x8)
pub(super) const TILE_SIZE: usize = 8;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Number of PPU cycles per scanline
pub(super) const CYCLES_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame (NTSC)
pub(super) const SCANLINES_PER_FRAME: u16 = 262;

/// Total PPU cycles per frame (NTSC)
/// 341 cycles/scanline × 262 scanlines = 89,342 cycles
pub(super) const CYCLES_PER_FRAME: u32 =
    (CYCLES_PER_SCANLINE as u32) * (SCANLINES_PER_FRAME as u32);
