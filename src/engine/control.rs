//! External control over a running engine.
//!
//! Engines check their [`ExecutionControl`] before every instruction. A host
//! can bound a run with a step budget, or stop it from another thread
//! through a [`CancelToken`].

use super::EngineError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that asks a run to stop at the next instruction boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Limits checked at every step.
#[derive(Debug, Clone, Default)]
pub struct ExecutionControl {
    max_steps: Option<u64>,
    cancel: Option<CancelToken>,
}

impl ExecutionControl {
    /// No budget, no cancellation.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Fail once `max_steps` instructions have executed and another is due.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Called with the number of instructions executed so far, before the next one.
    #[inline]
    pub fn check(&self, steps: u64) -> Result<(), EngineError> {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(EngineError::Cancelled { steps });
            }
        }
        if let Some(limit) = self.max_steps {
            if steps >= limit {
                return Err(EngineError::StepLimitExceeded { limit });
            }
        }
        Ok(())
    }
}
