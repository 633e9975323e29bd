/// # Instructions
///
/// A single 16-bit CHIP-8 instruction word. Instructions are stored
/// big-endian: the high byte sits first in memory.
///
/// Behavior is cased on some combination of nibbles:
/// - `(f, _, _, _)` broad categorization; applies to all instructions
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS)
///
/// Nibbles not used to select the operation often carry important data:
/// - `(_, n, n, n)` a 12-bit memory address
/// - `(_, _, n, n)` a byte assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` the register Vy
///
/// Every 16-bit value is syntactically decodable; whether it names a defined
/// operation is the dispatcher's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction(u16);

impl Instruction {
    /// Combines two consecutive memory bytes, high byte first.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Instruction(u16::from(high) << 8 | u16::from(low))
    }

    /// The raw instruction word.
    pub fn word(self) -> u16 {
        self.0
    }

    /// The component nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    /// The opcode family nibble.
    /// `[f___]`
    pub fn family(self) -> u8 {
        ((self.0 & 0xF000) >> 12) as u8
    }

    /// Register index X.
    /// `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// Register index Y.
    /// `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The low nibble.
    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The low byte.
    /// `[__nn]`
    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The low 12 bits, usually a memory address.
    /// `[_nnn]`
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Instruction(word)
    }
}
