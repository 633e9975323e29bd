pub use chip8::{Chip8, Step};
pub use constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use error::Error;
pub use instruction::Instruction;
pub use keypad::{Keypad, NullKeypad};
pub use screen::FrameBuffer;

mod chip8;
pub mod constants;
mod decode;
mod error;
mod instruction;
mod keypad;
mod operations;
mod screen;
mod stack;
mod timer;
