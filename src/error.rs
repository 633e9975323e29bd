/// Faults the interpreter can raise.
///
/// Unknown opcodes are deliberately absent: they are reported and skipped,
/// never surfaced as errors. Running off the end of memory is a clean halt,
/// not a fault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Program image doesn't fit between 0x200 and the end of memory
    #[error("program is {size} bytes but only {capacity} bytes are addressable from 0x200")]
    ProgramTooLarge { size: usize, capacity: usize },

    /// A handler indexed memory past 0xFFF
    #[error("memory access out of bounds at address {address:#05X}")]
    MemoryOutOfBounds { address: usize },

    /// Subroutine call past the fixed stack capacity
    #[error("call stack overflow: more than 16 nested subroutine calls")]
    StackOverflow,

    /// Return with no saved address on the stack
    #[error("return with an empty call stack")]
    StackUnderflow,
}
