//! # bf-runtime
//!
//! An interpreter for the eight-instruction tape language (`> < + - . , [ ]`).
//!
//! The pipeline has three stages: settings are merged from partial
//! overrides, the source is cleaned and checked for balanced brackets, and an
//! engine interprets the cleaned program against a fixed-length tape of
//! wrapping cells. [`Runtime`] ties them together and caches the result.
//!
//! ```
//! use bfrt::{Overrides, Runtime};
//!
//! let mut rt = Runtime::new("++++++++[>++++++++<-]>+.", "", &Overrides::none());
//! assert_eq!(rt.run().output(), "A");
//! ```

pub mod config;
pub mod parser;
pub mod engine;
pub mod runtime;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use config::{ConfigError, EofMode, Overrides, Settings};
pub use parser::{parse_source, BasicParser, CleanedProgram, Instruction, ParseError, Validator};
pub use engine::{
    BasicEngine, CancelToken, Engine, EngineError, EngineFactory, EngineKind, EngineState,
    ExecutionControl, JumpTableEngine,
};
pub use runtime::{stringify_result, RunResult, Runtime};
