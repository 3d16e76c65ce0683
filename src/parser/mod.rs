//! Source sanitation and structural validation.
//!
//! Raw source is reduced to the instruction alphabet and then checked for
//! balanced brackets. Nothing else is verified: a loop that can never run is
//! still a valid loop. Downstream code relies on the balance invariant and
//! never checks it again.

pub mod instruction;

pub use instruction::Instruction;

use crate::config::Settings;
use thiserror::Error;

/// A validated program: the original text plus the cleaned instruction string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedProgram {
    original: String,
    cleaned: String,
}

impl CleanedProgram {
    /// The source exactly as given.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The instruction string. Only alphabet characters, all ASCII.
    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.cleaned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }

    /// Decode the instruction at `ip`.
    #[inline]
    pub fn instruction_at(&self, ip: usize) -> Option<Instruction> {
        self.cleaned.as_bytes().get(ip).copied().and_then(Instruction::from_byte)
    }
}

/// Anything that can turn raw source into a [`CleanedProgram`].
pub trait Validator {
    fn validate(&self, source: &str, settings: &Settings) -> Result<CleanedProgram, ParseError>;
}

impl<F> Validator for F
where
    F: Fn(&str, &Settings) -> Result<CleanedProgram, ParseError>,
{
    fn validate(&self, source: &str, settings: &Settings) -> Result<CleanedProgram, ParseError> {
        self(source, settings)
    }
}

/// The default validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicParser;

impl Validator for BasicParser {
    fn validate(&self, source: &str, settings: &Settings) -> Result<CleanedProgram, ParseError> {
        parse_source(source, settings)
    }
}

/// Strip everything that is not an instruction, then check bracket balance.
pub fn parse_source(source: &str, settings: &Settings) -> Result<CleanedProgram, ParseError> {
    let cleaned = clean(source, settings.allow_debug_marker);
    check_brackets(&cleaned)?;

    Ok(CleanedProgram {
        original: source.to_string(),
        cleaned,
    })
}

/// Remove every character outside the instruction alphabet.
pub fn clean(source: &str, allow_debug_marker: bool) -> String {
    source
        .chars()
        .filter(|&c| Instruction::is_instruction(c, allow_debug_marker))
        .collect()
}

fn check_brackets(cleaned: &str) -> Result<(), ParseError> {
    let mut open: usize = 0;

    for c in cleaned.chars() {
        match c {
            '[' => open += 1,
            ']' => {
                open = open.checked_sub(1).ok_or(ParseError::ImbalancedBrackets)?;
            }
            _ => {}
        }
    }

    if open != 0 {
        return Err(ParseError::ImbalancedBrackets);
    }
    Ok(())
}

/// Validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Imbalanced brackets detected!")]
    ImbalancedBrackets,
}
