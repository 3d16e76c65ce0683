//! Instruction alphabet.
//!
//! Each instruction is a single ASCII character. Decoding happens one
//! character at a time at fetch, the cleaned program stays a plain string.

use std::fmt;

/// One instruction of the tape machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>` move the data pointer right (saturating)
    Right,
    /// `<` move the data pointer left (saturating)
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.` write the current cell as a character
    Output,
    /// `,` read one character of input into the current cell
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// `#` dump machine state to the debug log
    Debug,
}

impl Instruction {
    /// The eight core instructions, without the debug marker.
    pub const CORE: [Instruction; 8] = [
        Instruction::Right,
        Instruction::Left,
        Instruction::Increment,
        Instruction::Decrement,
        Instruction::Output,
        Instruction::Input,
        Instruction::LoopStart,
        Instruction::LoopEnd,
    ];

    /// Decode a character. Returns `None` for anything outside the alphabet.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '>' => Instruction::Right,
            '<' => Instruction::Left,
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            '[' => Instruction::LoopStart,
            ']' => Instruction::LoopEnd,
            '#' => Instruction::Debug,
            _ => return None,
        })
    }

    /// Decode a byte of an already cleaned program.
    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        Self::from_char(b as char)
    }

    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Instruction::Right => '>',
            Instruction::Left => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
            Instruction::Debug => '#',
        }
    }

    /// Is `c` an instruction under the given alphabet?
    #[inline]
    pub fn is_instruction(c: char, allow_debug_marker: bool) -> bool {
        match Self::from_char(c) {
            Some(Instruction::Debug) => allow_debug_marker,
            Some(_) => true,
            None => false,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
