use ocho::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

/// # Display
///
/// Rasterizes the machine's logical 64x32 frame buffer into an sdl2 window.
/// Only gets a call to `render` when the frame buffer changed.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw.
    /// * `scale` the magnitude by which each logical pixel is multiplied.
    pub fn new(sdl: &sdl2::Sdl, scale: usize) -> Self {
        let video_subsystem = sdl.video().unwrap();
        let window = video_subsystem
            .window(
                "ocho",
                (DISPLAY_WIDTH * scale) as u32,
                (DISPLAY_HEIGHT * scale) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();
        let canvas = window.into_canvas().build().unwrap();

        let mut display = Display { canvas };
        display.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT]);
        display
    }

    /// Renders a single frame buffer; on pixels white, off pixels black.
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                for (y, row) in frame.iter().enumerate() {
                    for (x, pixel) in row.iter().enumerate() {
                        let offset = y * pitch + x * 3;
                        let color = *pixel * 255;
                        buffer[offset..offset + 3].copy_from_slice(&[color, color, color]);
                    }
                }
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}
