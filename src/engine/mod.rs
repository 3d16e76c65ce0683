//! Execution engines.
//!
//! An engine interprets one [`CleanedProgram`] against a zeroed tape and an
//! input string, once. Engines are interchangeable behind the [`Engine`]
//! trait, and the runtime builds them through an [`EngineFactory`] so a
//! different strategy can be dropped in without touching orchestration.

pub mod control;
pub mod execute;
pub mod jumps;
pub mod state;
pub mod tape;

pub use control::{CancelToken, ExecutionControl};
pub use execute::{BasicEngine, EngineError, EngineState, Interpreter, JumpTableEngine};
pub use jumps::{JumpResolver, JumpTable, LinearScan};
pub use state::ExecutionState;
pub use tape::{CellRange, Tape};

use crate::config::Settings;
use crate::parser::CleanedProgram;

/// A single-use program runner.
pub trait Engine {
    /// Run to completion, returning everything written by `.`.
    fn run(&mut self) -> Result<String, EngineError>;

    fn state(&self) -> EngineState;
}

impl<J: JumpResolver> Engine for Interpreter<J> {
    fn run(&mut self) -> Result<String, EngineError> {
        Interpreter::run(self)
    }

    fn state(&self) -> EngineState {
        Interpreter::state(self)
    }
}

/// Builds a fresh engine for each run.
pub trait EngineFactory {
    fn build(
        &self,
        program: &CleanedProgram,
        settings: &Settings,
        input: &str,
        control: ExecutionControl,
    ) -> Box<dyn Engine>;
}

impl<F> EngineFactory for F
where
    F: Fn(&CleanedProgram, &Settings, &str, ExecutionControl) -> Box<dyn Engine>,
{
    fn build(
        &self,
        program: &CleanedProgram,
        settings: &Settings,
        input: &str,
        control: ExecutionControl,
    ) -> Box<dyn Engine> {
        self(program, settings, input, control)
    }
}

/// The built-in engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// [`BasicEngine`]
    #[default]
    Basic,
    /// [`JumpTableEngine`]
    JumpTable,
}

impl EngineFactory for EngineKind {
    fn build(
        &self,
        program: &CleanedProgram,
        settings: &Settings,
        input: &str,
        control: ExecutionControl,
    ) -> Box<dyn Engine> {
        match self {
            EngineKind::Basic => {
                Box::new(BasicEngine::new(program, settings, input).with_control(control))
            }
            EngineKind::JumpTable => {
                Box::new(JumpTableEngine::new(program, settings, input).with_control(control))
            }
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(EngineKind::Basic),
            "jump-table" | "jumptable" | "table" => Ok(EngineKind::JumpTable),
            _ => Err(format!("unknown engine: {} (expected basic or jump-table)", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    #[test]
    fn test_kinds_agree() {
        let settings = Settings::default();
        let program = parse_source("++++++[>++++++++<-]>+.", &settings).unwrap();

        for kind in [EngineKind::Basic, EngineKind::JumpTable] {
            let mut engine = kind.build(&program, &settings, "", ExecutionControl::unbounded());
            assert_eq!(engine.state(), EngineState::Ready);
            assert_eq!(engine.run().unwrap(), "1");
            assert_eq!(engine.state(), EngineState::Completed);
        }
    }

    #[test]
    fn test_closure_factory() {
        let factory = |p: &CleanedProgram, s: &Settings, i: &str, c: ExecutionControl| -> Box<dyn Engine> {
            Box::new(JumpTableEngine::new(p, s, i).with_control(c))
        };
        let settings = Settings::default();
        let program = parse_source(",.", &settings).unwrap();
        let mut engine = factory.build(&program, &settings, "z", ExecutionControl::unbounded());
        assert_eq!(engine.run().unwrap(), "z");
    }

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!("basic".parse::<EngineKind>().unwrap(), EngineKind::Basic);
        assert_eq!("jump-table".parse::<EngineKind>().unwrap(), EngineKind::JumpTable);
        assert!("jit".parse::<EngineKind>().is_err());
    }
}
