//! Orchestration: validate, then execute, caching both steps.
//!
//! A [`Runtime`] is bound to one source, one input and one set of settings.
//! Validation happens at most once; a failed validation short-circuits into a
//! failed run. The first completed run is cached and returned by every later
//! call to [`Runtime::run`].

pub mod result;

pub use result::{stringify_result, RunResult};

use crate::config::{Overrides, Settings};
use crate::engine::{CancelToken, EngineFactory, EngineKind, ExecutionControl};
use crate::parser::{BasicParser, CleanedProgram, ParseError, Validator};

/// Validator + engine pipeline for one program.
pub struct Runtime<V = BasicParser, F = EngineKind> {
    code: String,
    input: String,
    settings: Settings,
    validator: V,
    factory: F,
    control: ExecutionControl,
    parse_result: Option<Result<CleanedProgram, ParseError>>,
    run_result: Option<RunResult>,
}

impl Runtime {
    /// Runtime with the default validator and engine.
    pub fn new(code: impl Into<String>, input: impl Into<String>, overrides: &Overrides) -> Self {
        Runtime::with_parts(code, input, overrides, BasicParser, EngineKind::Basic)
    }
}

impl<V: Validator, F: EngineFactory> Runtime<V, F> {
    /// Runtime with a custom validator and engine factory.
    pub fn with_parts(
        code: impl Into<String>,
        input: impl Into<String>,
        overrides: &Overrides,
        validator: V,
        factory: F,
    ) -> Self {
        Self {
            code: code.into(),
            input: input.into(),
            settings: Settings::from_overrides(overrides),
            validator,
            factory,
            control: ExecutionControl::unbounded(),
            parse_result: None,
            run_result: None,
        }
    }

    /// Set the step budget and cancellation used for the run.
    pub fn with_control(mut self, control: ExecutionControl) -> Self {
        self.control = control;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Token that cancels this runtime's run, if one was configured.
    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.control.cancel_token()
    }

    pub fn has_parsed(&self) -> bool {
        self.parse_result.is_some()
    }

    pub fn has_ran(&self) -> bool {
        self.run_result.is_some()
    }

    /// Validate the source. Cached; [`run`](Self::run) calls this as needed.
    pub fn parse(&mut self) -> &Result<CleanedProgram, ParseError> {
        self.parse_result
            .get_or_insert_with(|| self.validator.validate(&self.code, &self.settings))
    }

    /// Validate and execute, or return the cached result of an earlier run.
    pub fn run(&mut self) -> &RunResult {
        let result = match self.run_result.take() {
            Some(cached) => cached,
            None => self.execute(),
        };
        self.run_result.insert(result)
    }

    /// The cached result, if [`run`](Self::run) has been called.
    pub fn result(&self) -> Option<&RunResult> {
        self.run_result.as_ref()
    }

    fn execute(&mut self) -> RunResult {
        let Self {
            code,
            input,
            settings,
            validator,
            factory,
            control,
            parse_result,
            ..
        } = self;

        let program = match parse_result.get_or_insert_with(|| validator.validate(code, settings)) {
            Ok(program) => program,
            Err(e) => {
                tracing::debug!(error = %e, "validation failed");
                return RunResult::from(e.clone());
            }
        };

        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "refusing to run with invalid settings");
            return RunResult::failure(format!("invalid configuration: {}", e));
        }

        let mut engine = factory.build(program, settings, input, control.clone());
        let result = match engine.run() {
            Ok(output) => RunResult::Success { output },
            Err(e) => RunResult::failure(e.to_string()),
        };

        tracing::info!(
            instructions = program.len(),
            success = result.is_success(),
            output_len = result.output().len(),
            "run finished"
        );
        result
    }
}

impl<V, F> std::fmt::Debug for Runtime<V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("settings", &self.settings)
            .field("has_parsed", &self.parse_result.is_some())
            .field("has_ran", &self.run_result.is_some())
            .finish()
    }
}
