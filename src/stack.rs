use crate::constants::STACK_DEPTH;
use crate::error::Error;

/// # Stack
///
/// Fixed-depth LIFO stack of 16-bit return addresses.
///
/// The original hardware trusts programs not to overflow; here overflow and
/// underflow are checked faults so a malformed program can't corrupt state.
/// Correct programs never observe the difference.
pub struct Stack {
    entries: [u16; STACK_DEPTH],
    depth: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            entries: [0; STACK_DEPTH],
            depth: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Error> {
        if self.depth == STACK_DEPTH {
            return Err(Error::StackOverflow);
        }
        self.entries[self.depth] = address;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Error> {
        if self.depth == 0 {
            return Err(Error::StackUnderflow);
        }
        self.depth -= 1;
        Ok(self.entries[self.depth])
    }

    /// The live entries, oldest first.
    pub fn entries(&self) -> &[u16] {
        &self.entries[..self.depth]
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_stack {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x200).unwrap();
        stack.push(0x300).unwrap();
        assert_eq!(stack.pop().unwrap(), 0x300);
        assert_eq!(stack.pop().unwrap(), 0x200);
    }

    #[test]
    fn test_entries_tracks_live_depth() {
        let mut stack = Stack::new();
        assert_eq!(stack.entries(), &[]);
        stack.push(0x200).unwrap();
        stack.push(0x300).unwrap();
        assert_eq!(stack.entries(), &[0x200, 0x300]);
        stack.pop().unwrap();
        assert_eq!(stack.entries(), &[0x200]);
    }

    #[test]
    fn test_overflow_is_a_checked_fault() {
        let mut stack = Stack::new();
        for _ in 0..STACK_DEPTH {
            stack.push(0x200).unwrap();
        }
        assert!(matches!(stack.push(0x200), Err(Error::StackOverflow)));
    }

    #[test]
    fn test_underflow_is_a_checked_fault() {
        let mut stack = Stack::new();
        assert!(matches!(stack.pop(), Err(Error::StackUnderflow)));
    }
}
