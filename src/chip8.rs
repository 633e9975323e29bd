use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, trace, warn};

use crate::constants::{FONT_SPRITES, FONT_START, MEMORY_SIZE, PROGRAM_START};
use crate::decode::decode;
use crate::error::Error;
use crate::instruction::Instruction;
use crate::keypad::{Keypad, NullKeypad};
use crate::screen::{FrameBuffer, Screen};
use crate::stack::Stack;
use crate::timer::{Ticker, Timer};

/// Outcome of a single fetch-decode-execute step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The instruction executed; the machine can keep going
    Running,
    /// The program counter reached the end of memory; clean termination
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// The machine owns 4096 bytes of memory (font sheet at 0x050, programs at
/// 0x200), 16 8-bit registers V0..VF, the 16-bit index register and program
/// counter, a checked call stack, the logical screen, and two mutex-guarded
/// countdown timers decayed at 60Hz by a ticker thread spawned at
/// construction.
///
/// VF doubles as the carry/borrow/collision flag after arithmetic and draw
/// operations. That aliasing is original CHIP-8 behavior programs rely on,
/// so it stays a plain slot of the register array.
///
/// Is interfaced with by the outside world via methods to:
/// - load programs
/// - advance the CPU one step at a time
/// - inspect its frame buffer for rendering by some display
/// - attach a key-input device
/// - request shutdown; the ticker is stopped and joined before teardown
pub struct Chip8 {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) v: [u8; 16],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) stack: Stack,
    pub(crate) screen: Screen,
    pub(crate) delay_timer: Timer,
    pub(crate) sound_timer: Timer,
    pub(crate) keypad: Box<dyn Keypad + Send>,
    pub(crate) frame_dirty: bool,
    shutdown: Arc<AtomicBool>,
    ticker: Ticker,
}

impl Chip8 {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_START..FONT_START + FONT_SPRITES.len()].copy_from_slice(&FONT_SPRITES);

        let delay_timer = Timer::default();
        let sound_timer = Timer::default();
        let shutdown = Arc::new(AtomicBool::new(false));
        let ticker = Ticker::spawn(
            delay_timer.clone(),
            sound_timer.clone(),
            Arc::clone(&shutdown),
        );

        Chip8 {
            memory,
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START as u16,
            stack: Stack::new(),
            screen: Screen::new(),
            delay_timer,
            sound_timer,
            keypad: Box::new(NullKeypad),
            frame_dirty: false,
            shutdown,
            ticker,
        }
    }

    /// Copies a program image verbatim into memory starting at 0x200.
    ///
    /// The image carries no header or length prefix and gets no validation;
    /// the only failure is an image larger than the remaining memory.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Error> {
        let capacity = MEMORY_SIZE - PROGRAM_START;
        if program.len() > capacity {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                capacity,
            });
        }
        self.memory[PROGRAM_START..PROGRAM_START + program.len()].copy_from_slice(program);
        info!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Runs a single fetch-decode-execute cycle.
    ///
    /// Unknown opcodes are reported and skipped with the program counter
    /// already advanced. Reaching the end of memory halts the machine
    /// cleanly and raises the shutdown flag so the ticker winds down too.
    pub fn step(&mut self) -> Result<Step, Error> {
        let instruction = match self.fetch() {
            Some(instruction) => instruction,
            None => {
                self.request_shutdown();
                return Ok(Step::Halted);
            }
        };
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            instruction.word(),
            self.v,
            self.i,
            self.pc
        );
        match decode(instruction) {
            Some(operation) => operation(self, instruction)?,
            None => warn!(
                "unknown opcode {:04X} at {:#05X}",
                instruction.word(),
                self.pc - 2
            ),
        }
        Ok(Step::Running)
    }

    /// Reads the two bytes at PC and combines them big-endian, advancing PC
    /// by one instruction width.
    ///
    /// Returns None once PC has advanced to or beyond the memory bound
    /// instead of reading out of bounds.
    fn fetch(&mut self) -> Option<Instruction> {
        let pc = self.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return None;
        }
        let instruction = Instruction::from_bytes(self.memory[pc], self.memory[pc + 1]);
        self.pc += 2;
        Some(instruction)
    }

    pub(crate) fn read_byte(&self, address: usize) -> Result<u8, Error> {
        self.memory
            .get(address)
            .copied()
            .ok_or(Error::MemoryOutOfBounds { address })
    }

    pub(crate) fn write_byte(&mut self, address: usize, value: u8) -> Result<(), Error> {
        match self.memory.get_mut(address) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Error::MemoryOutOfBounds { address }),
        }
    }

    /// Returns the frame buffer if the display changed since the last call.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.frame_dirty {
            self.frame_dirty = false;
            Some(*self.screen.pixels())
        } else {
            None
        }
    }

    /// Read-only view of the logical pixel grid.
    pub fn screen(&self) -> &FrameBuffer {
        self.screen.pixels()
    }

    /// Attaches a key-input device.
    ///
    /// A stub that reports no keys is attached by default.
    pub fn set_keypad(&mut self, keypad: Box<dyn Keypad + Send>) {
        self.keypad = keypad;
    }

    /// Raises the shared shutdown flag observed by the ticker and by
    /// whatever loop is driving `step`.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Stops and joins the timer ticker. Also happens on drop.
    pub fn stop(&mut self) {
        self.request_shutdown();
        self.ticker.stop();
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable snapshot of registers, PC, I, the live stack, and both
/// timers, for debugging.
impl fmt::Display for Chip8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.v.iter().enumerate() {
            writeln!(f, "V{:X}\t{:#04X}", index, value)?;
        }
        writeln!(f, "I\t{:#05X}", self.i)?;
        writeln!(f, "PC\t{:#05X}", self.pc)?;
        write!(f, "STACK:")?;
        for address in self.stack.entries() {
            write!(f, " {:#05X}", address)?;
        }
        writeln!(f)?;
        writeln!(f, "DELAY\t{:#04X}", self.delay_timer.get())?;
        write!(f, "SOUND\t{:#04X}", self.sound_timer.get())
    }
}

#[cfg(test)]
mod test_chip8 {
    use super::*;

    #[test]
    fn test_font_is_written_at_construction() {
        let chip8 = Chip8::new();
        assert_eq!(
            &chip8.memory[FONT_START..FONT_START + FONT_SPRITES.len()],
            &FONT_SPRITES
        );
    }

    #[test]
    fn test_fetch_combines_bytes_big_endian() {
        let mut chip8 = Chip8::new();
        chip8.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        let instruction = chip8.fetch().unwrap();
        assert_eq!(instruction.word(), 0xAABB);
        assert_eq!(chip8.pc, 0x202);
    }

    #[test]
    fn test_fetch_halts_at_the_memory_bound() {
        let mut chip8 = Chip8::new();
        chip8.pc = MEMORY_SIZE as u16;
        assert_eq!(chip8.fetch(), None);
        chip8.pc = (MEMORY_SIZE - 1) as u16;
        assert_eq!(chip8.fetch(), None);
    }

    #[test]
    fn test_load_program_places_bytes_at_0x200() {
        let mut chip8 = Chip8::new();
        let program = [0xDE, 0xAD, 0xBE, 0xEF];
        chip8.load_program(&program).unwrap();
        assert_eq!(&chip8.memory[0x200..0x204], &program);
    }

    #[test]
    fn test_load_program_rejects_oversized_images() {
        let mut chip8 = Chip8::new();
        let program = vec![0; MEMORY_SIZE - PROGRAM_START + 1];
        assert!(matches!(
            chip8.load_program(&program),
            Err(Error::ProgramTooLarge { .. })
        ));
    }

    #[test]
    fn test_load_program_accepts_a_full_image() {
        let mut chip8 = Chip8::new();
        let program = vec![0xAB; MEMORY_SIZE - PROGRAM_START];
        chip8.load_program(&program).unwrap();
        assert_eq!(chip8.memory[MEMORY_SIZE - 1], 0xAB);
    }

    #[test]
    fn test_step_runs_load_then_add() {
        // LD V1, 0x05 then ADD V0, 0x03
        let mut chip8 = Chip8::new();
        chip8.load_program(&[0x61, 0x05, 0x70, 0x03]).unwrap();
        assert_eq!(chip8.step().unwrap(), Step::Running);
        assert_eq!(chip8.step().unwrap(), Step::Running);
        assert_eq!(chip8.v[0x1], 0x05);
        assert_eq!(chip8.v[0x0], 0x03);
        assert_eq!(chip8.pc, 0x204);
    }

    #[test]
    fn test_step_skips_unknown_opcodes() {
        let mut chip8 = Chip8::new();
        chip8.load_program(&[0x00, 0x00]).unwrap();
        assert_eq!(chip8.step().unwrap(), Step::Running);
        assert_eq!(chip8.pc, 0x202);
    }

    #[test]
    fn test_step_halts_and_signals_shutdown_at_memory_end() {
        let mut chip8 = Chip8::new();
        chip8.pc = MEMORY_SIZE as u16;
        assert_eq!(chip8.step().unwrap(), Step::Halted);
        assert!(chip8.is_shutdown());
    }

    #[test]
    fn test_call_then_ret_round_trip() {
        // CALL 0x300 at 0x200; RET at 0x300
        let mut chip8 = Chip8::new();
        chip8.load_program(&[0x23, 0x00]).unwrap();
        chip8.memory[0x300..0x302].copy_from_slice(&[0x00, 0xEE]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc, 0x300);
        assert_eq!(chip8.stack.entries(), &[0x202]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc, 0x202);
        assert_eq!(chip8.stack.entries(), &[]);
    }

    #[test]
    fn test_take_frame_is_a_dirty_flag_handshake() {
        let mut chip8 = Chip8::new();
        assert!(chip8.take_frame().is_none());
        // CLS marks the frame dirty
        chip8.load_program(&[0x00, 0xE0]).unwrap();
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_dump_mentions_registers_and_timers() {
        let mut chip8 = Chip8::new();
        chip8.v[0x1] = 0xAB;
        chip8.delay_timer.set(0x10);
        let dump = chip8.to_string();
        assert!(dump.contains("V1\t0xAB"));
        assert!(dump.contains("DELAY\t0x10"));
        assert!(dump.contains("STACK:"));
    }
}
