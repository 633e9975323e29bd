use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Screen
///
/// The logical 64x32 monochrome pixel grid. The on/off state of each pixel
/// is encoded as 1/0 in a 2d array. Only `clear` and the XOR sprite blit
/// mutate it; rasterization belongs to a presentation layer.
pub struct Screen {
    pub(crate) pixels: FrameBuffer,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    pub fn pixels(&self) -> &FrameBuffer {
        &self.pixels
    }

    /// XORs `rows` of sprite data onto the screen at (x, y).
    ///
    /// The origin wraps around the display once; the blit itself clips at
    /// the right and bottom edges rather than wrapping. Returns whether any
    /// lit pixel was erased.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = 0;

        for (row, byte) in rows.iter().enumerate() {
            let y = origin_y + row;
            if y >= DISPLAY_HEIGHT {
                break;
            }
            for bit in 0..8 {
                let x = origin_x + bit;
                if x >= DISPLAY_WIDTH {
                    break;
                }
                let pixel = (byte >> (7 - bit)) & 1;
                collision |= pixel & self.pixels[y][x];
                self.pixels[y][x] ^= pixel;
            }
        }

        collision == 1
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_screen {
    use super::*;

    #[test]
    fn test_clear_turns_every_pixel_off() {
        let mut screen = Screen::new();
        screen.pixels[0][0] = 1;
        screen.pixels[DISPLAY_HEIGHT - 1][DISPLAY_WIDTH - 1] = 1;
        screen.clear();
        assert!(screen.pixels.iter().flatten().all(|&pixel| pixel == 0));
    }

    #[test]
    fn test_draw_sprite_sets_pixels() {
        let mut screen = Screen::new();
        let collision = screen.draw_sprite(1, 1, &[0b1010_0000]);
        assert!(!collision);
        assert_eq!(screen.pixels[1][1..5], [1, 0, 1, 0]);
    }

    #[test]
    fn test_draw_sprite_xors_and_reports_collision() {
        let mut screen = Screen::new();
        screen.pixels[0][2..6].copy_from_slice(&[0, 1, 0, 1]);
        let collision = screen.draw_sprite(2, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(screen.pixels[0][2..6], [1, 0, 0, 1]);
    }

    #[test]
    fn test_draw_sprite_twice_restores_pixels() {
        let mut screen = Screen::new();
        screen.draw_sprite(3, 4, &[0xF0, 0x90, 0xF0]);
        let collision = screen.draw_sprite(3, 4, &[0xF0, 0x90, 0xF0]);
        assert!(collision);
        assert!(screen.pixels.iter().flatten().all(|&pixel| pixel == 0));
    }

    #[test]
    fn test_draw_sprite_clips_at_right_edge() {
        let mut screen = Screen::new();
        screen.draw_sprite((DISPLAY_WIDTH - 2) as u8, 0, &[0xFF]);
        // only the two rightmost columns are drawn; nothing wraps to column 0
        assert_eq!(screen.pixels[0][DISPLAY_WIDTH - 2..], [1, 1]);
        assert_eq!(screen.pixels[0][0], 0);
    }

    #[test]
    fn test_draw_sprite_clips_at_bottom_edge() {
        let mut screen = Screen::new();
        screen.draw_sprite(0, (DISPLAY_HEIGHT - 1) as u8, &[0x80, 0x80]);
        assert_eq!(screen.pixels[DISPLAY_HEIGHT - 1][0], 1);
        // the second row would land below the display and is dropped
        assert_eq!(screen.pixels[0][0], 0);
    }

    #[test]
    fn test_draw_sprite_wraps_origin_before_blitting() {
        let mut screen = Screen::new();
        let x = (DISPLAY_WIDTH + 3) as u8;
        let y = (DISPLAY_HEIGHT + 2) as u8;
        screen.draw_sprite(x, y, &[0x80]);
        assert_eq!(screen.pixels[2][3], 1);
    }
}
