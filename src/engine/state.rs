//! Per-run execution state.
//!
//! Everything one run mutates lives here: instruction pointer, tape, input
//! cursor and output buffer. An engine owns exactly one of these and drops it
//! with the result.

use super::tape::Tape;
use crate::config::{EofMode, Settings};
use crate::parser::Instruction;

/// Cells on either side of the pointer included in a `#` dump.
const DEBUG_WINDOW: usize = 8;

/// Mutable machine state for a single run.
#[derive(Debug, Clone)]
pub struct ExecutionState {
    /// Index of the next instruction.
    pub(crate) ip: usize,
    pub(crate) tape: Tape,
    input: Vec<char>,
    input_cursor: usize,
    output: String,
    steps: u64,
    eof_mode: EofMode,
}

impl ExecutionState {
    pub fn new(settings: &Settings, input: &str) -> Self {
        Self {
            ip: 0,
            tape: Tape::from_settings(settings),
            input: input.chars().collect(),
            input_cursor: 0,
            output: String::new(),
            steps: 0,
            eof_mode: settings.eof_mode,
        }
    }

    #[inline]
    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Characters of input consumed so far.
    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Advance past the current instruction and count it.
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.ip += 1;
        self.steps += 1;
    }

    /// Apply a non-branching instruction. Brackets are the engine's job.
    pub(crate) fn apply(&mut self, instr: Instruction) {
        match instr {
            Instruction::Right => self.tape.move_right(),
            Instruction::Left => self.tape.move_left(),
            Instruction::Increment => self.tape.increment(),
            Instruction::Decrement => self.tape.decrement(),
            Instruction::Output => {
                let c = to_char(self.tape.get());
                self.output.push(c);
            }
            Instruction::Input => self.read_input(),
            Instruction::Debug => self.dump(),
            Instruction::LoopStart | Instruction::LoopEnd => {}
        }
    }

    fn read_input(&mut self) {
        match self.input.get(self.input_cursor) {
            Some(&c) => {
                self.input_cursor += 1;
                self.tape.set(i64::from(u32::from(c)));
            }
            None => {
                let current = self.tape.get();
                self.tape.set(self.eof_mode.apply(current));
            }
        }
    }

    fn dump(&self) {
        tracing::debug!(
            ip = self.ip,
            pointer = self.tape.pointer(),
            steps = self.steps,
            cells = ?self.tape.window(DEBUG_WINDOW),
            "debug marker"
        );
    }
}

/// The character whose code point is `value`, or U+FFFD if there is none.
#[inline]
fn to_char(value: i64) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
