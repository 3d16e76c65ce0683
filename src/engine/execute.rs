//! The interpreter loop.
//!
//! Fetch the instruction under the instruction pointer, check the execution
//! control, apply it, advance. Taken bracket jumps land exactly on the
//! partner bracket so the common advance steps past it.

use super::control::ExecutionControl;
use super::jumps::{JumpResolver, JumpTable, LinearScan};
use super::state::ExecutionState;
use crate::config::Settings;
use crate::parser::{CleanedProgram, Instruction};
use thiserror::Error;

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built, nothing executed yet.
    Ready,
    /// At least one step taken, program not finished.
    Running,
    /// Instruction pointer reached the end of the program.
    Completed,
    /// Stopped by an error.
    Failed,
}

/// An interpreter over one cleaned program, parameterized by how it matches brackets.
pub struct Interpreter<J: JumpResolver> {
    program: Vec<u8>,
    jumps: J,
    exec: ExecutionState,
    control: ExecutionControl,
    state: EngineState,
}

/// Re-scans for the partner bracket on every taken jump.
pub type BasicEngine = Interpreter<LinearScan>;

/// Resolves bracket partners once, before the first step.
pub type JumpTableEngine = Interpreter<JumpTable>;

impl<J: JumpResolver> Interpreter<J> {
    /// Bind an engine to a program, settings and input text.
    ///
    /// Settings are expected to have passed [`Settings::validate`].
    pub fn new(program: &CleanedProgram, settings: &Settings, input: &str) -> Self {
        let bytes = program.cleaned().as_bytes().to_vec();
        Self {
            jumps: J::prepare(&bytes),
            program: bytes,
            exec: ExecutionState::new(settings, input),
            control: ExecutionControl::unbounded(),
            state: EngineState::Ready,
        }
    }

    /// Replace the execution control (step budget, cancellation).
    pub fn with_control(mut self, control: ExecutionControl) -> Self {
        self.control = control;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Machine state, for inspection between steps.
    pub fn execution(&self) -> &ExecutionState {
        &self.exec
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, EngineState::Completed | EngineState::Failed)
    }

    /// Execute a single instruction.
    ///
    /// Returns the instruction that was executed, or `None` once the program
    /// has run off its end.
    pub fn step(&mut self) -> Result<Option<Instruction>, EngineError> {
        match self.state {
            EngineState::Ready => self.state = EngineState::Running,
            EngineState::Running => {}
            other => return Err(EngineError::InvalidState(other)),
        }

        let result = self.execute_next();
        match result {
            Ok(None) => self.state = EngineState::Completed,
            Err(_) => self.state = EngineState::Failed,
            Ok(Some(_)) => {}
        }
        result
    }

    /// Run to completion and return the output.
    ///
    /// An engine runs once. Calling this on an engine that has already
    /// started fails with [`EngineError::InvalidState`].
    pub fn run(&mut self) -> Result<String, EngineError> {
        if self.state != EngineState::Ready {
            return Err(EngineError::InvalidState(self.state));
        }

        tracing::debug!(instructions = self.program.len(), "run started");

        loop {
            match self.step() {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(
                        ip = self.exec.instruction_pointer(),
                        steps = self.exec.steps(),
                        error = %e,
                        "run failed"
                    );
                    return Err(e);
                }
            }
        }

        tracing::debug!(steps = self.exec.steps(), "run completed");
        Ok(self.exec.take_output())
    }

    fn execute_next(&mut self) -> Result<Option<Instruction>, EngineError> {
        // Fetch, skipping anything outside the alphabet
        let (ip, instr) = loop {
            let ip = self.exec.ip;
            let Some(&byte) = self.program.get(ip) else {
                return Ok(None);
            };
            match Instruction::from_byte(byte) {
                Some(instr) => break (ip, instr),
                None => self.exec.ip += 1,
            }
        };

        self.control.check(self.exec.steps())?;

        match instr {
            Instruction::LoopStart if self.exec.tape.is_zero() => {
                self.exec.ip = self
                    .jumps
                    .forward(&self.program, ip)
                    .ok_or(EngineError::UnmatchedBracket(ip))?;
            }
            Instruction::LoopEnd if !self.exec.tape.is_zero() => {
                self.exec.ip = self
                    .jumps
                    .backward(&self.program, ip)
                    .ok_or(EngineError::UnmatchedBracket(ip))?;
            }
            other => self.exec.apply(other),
        }

        self.exec.advance();
        Ok(Some(instr))
    }
}

impl<J: JumpResolver> std::fmt::Debug for Interpreter<J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("state", &self.state)
            .field("ip", &self.exec.instruction_pointer())
            .field("steps", &self.exec.steps())
            .field("tape", self.exec.tape())
            .finish()
    }
}

/// Errors that stop a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("engine cannot run from state {0:?}")]
    InvalidState(EngineState),

    #[error("execution cancelled after {steps} steps")]
    Cancelled { steps: u64 },

    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    #[error("no matching bracket for instruction {0}")]
    UnmatchedBracket(usize),
}
