/// The key-input contract a front end satisfies.
///
/// CHIP-8 has a 16-key hex keypad; `key` is always in 0x0..=0xF.
pub trait Keypad {
    /// Whether `key` is currently held down.
    fn is_key_down(&self, key: u8) -> bool;

    /// Blocks until a key is pressed and returns it.
    fn await_key(&self) -> u8;
}

/// Keypad stub for machines with no input device attached.
///
/// Reports every key as up and yields key 0 from a blocking wait, so
/// programs that poll input still make progress.
pub struct NullKeypad;

impl Keypad for NullKeypad {
    fn is_key_down(&self, _key: u8) -> bool {
        false
    }

    fn await_key(&self) -> u8 {
        0x0
    }
}
