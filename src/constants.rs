use std::time::Duration;

/// Display geometry measured in logical pixels
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory; valid addresses are 0x000..=0xFFF
pub const MEMORY_SIZE: usize = 4096;

/// Where loaded programs begin
pub const PROGRAM_START: usize = 0x200;

/// Where the font sprite sheet begins
pub const FONT_START: usize = 0x050;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Nanoseconds per CPU cycle (500Hz)
pub const CLOCK_SPEED: u32 = 2_000_000;

/// Interval between timer decrements, approximating 60Hz
pub const TIMER_INTERVAL: Duration = Duration::from_millis(16);

/// Font sprite sheet: 16 hex characters, 5 bytes each.
///
/// Each byte is one 8-pixel row; only the high nibble carries pixels.
pub const FONT_SPRITES: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
