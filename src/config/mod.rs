//! Runtime settings for the interpreter.
//!
//! A run is configured by merging a set of partial [`Overrides`] over the
//! defaults in [`Settings::default`]. Merging never fails; range checks live
//! in [`Settings::validate`] and are applied by the runtime just before an
//! engine is built.
//!
//! The serialized key names match the options object the browser front end
//! passes around (`memoryCellCount`, `eofMode`, ...), so a JSON file written
//! for one works for the other.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of cells on the tape.
pub const DEFAULT_TAPE_LENGTH: usize = 30_000;
/// Default lowest cell value (inclusive).
pub const DEFAULT_CELL_MIN: i64 = 0;
/// Default cell upper bound (exclusive): 8-bit cells.
pub const DEFAULT_CELL_MAX: i64 = 256;
/// Largest tape accepted by [`Settings::validate`] (128 MiB of cells).
pub const MAX_TAPE_LENGTH: usize = 1 << 24;

/// What a `,` does once the input text is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EofMode {
    /// Store 0.
    #[default]
    Zero,
    /// Store -1, wrapped into the cell range.
    NegativeOne,
    /// Leave the cell as it is.
    Nop,
}

impl EofMode {
    /// All modes, in declaration order.
    pub const ALL: [EofMode; 3] = [EofMode::Zero, EofMode::NegativeOne, EofMode::Nop];

    /// The raw (unwrapped) value to store given the cell's current value.
    #[inline]
    pub fn apply(self, current: i64) -> i64 {
        match self {
            EofMode::Zero => 0,
            EofMode::NegativeOne => -1,
            EofMode::Nop => current,
        }
    }
}

impl std::str::FromStr for EofMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "zero" | "0" => Ok(EofMode::Zero),
            "negative-one" | "minus-one" | "-1" => Ok(EofMode::NegativeOne),
            "nop" | "unchanged" => Ok(EofMode::Nop),
            _ => Err(ConfigError::UnknownEofMode(s.to_string())),
        }
    }
}

/// Complete, immutable interpreter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Number of cells on the tape.
    #[serde(rename = "memoryCellCount")]
    pub tape_length: usize,
    /// Lowest cell value (inclusive).
    #[serde(rename = "memoryCellMinValue")]
    pub cell_min: i64,
    /// Cell upper bound (exclusive). Arithmetic wraps modulo `cell_max - cell_min`.
    #[serde(rename = "memoryCellMaxValue")]
    pub cell_max: i64,
    /// End-of-input behavior for `,`.
    pub eof_mode: EofMode,
    /// Keep `#` in the cleaned program as a debug dump instruction.
    #[serde(rename = "enableOctoDebug")]
    pub allow_debug_marker: bool,
}

impl Settings {
    /// Build settings from a partial set of overrides.
    pub fn from_overrides(overrides: &Overrides) -> Self {
        overrides.apply(Settings::default())
    }

    /// Number of distinct values a cell can hold, or `None` when the range
    /// is empty or too wide for an `i64`.
    #[inline]
    pub fn cell_modulus(&self) -> Option<i64> {
        self.cell_max
            .checked_sub(self.cell_min)
            .filter(|&m| m > 0)
    }

    /// Check that the settings describe a usable machine.
    ///
    /// The tape must be non-empty and at most [`MAX_TAPE_LENGTH`] cells. The
    /// cell range must be non-empty, its width must fit in an `i64`, and it
    /// must contain zero, since `[` and `]` test the current cell against it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tape_length == 0 {
            return Err(ConfigError::EmptyTape);
        }
        if self.tape_length > MAX_TAPE_LENGTH {
            return Err(ConfigError::TapeTooLong {
                length: self.tape_length,
                max: MAX_TAPE_LENGTH,
            });
        }

        let (min, max) = (self.cell_min, self.cell_max);
        if max <= min {
            return Err(ConfigError::EmptyCellRange { min, max });
        }
        if self.cell_modulus().is_none() {
            return Err(ConfigError::CellRangeTooWide { min, max });
        }
        if !(min..max).contains(&0) {
            return Err(ConfigError::ZeroOutsideRange { min, max });
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tape_length: DEFAULT_TAPE_LENGTH,
            cell_min: DEFAULT_CELL_MIN,
            cell_max: DEFAULT_CELL_MAX,
            eof_mode: EofMode::Zero,
            allow_debug_marker: false,
        }
    }
}

/// A partial [`Settings`]: every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Overrides {
    #[serde(rename = "memoryCellCount", default, skip_serializing_if = "Option::is_none")]
    pub tape_length: Option<usize>,
    #[serde(rename = "memoryCellMinValue", default, skip_serializing_if = "Option::is_none")]
    pub cell_min: Option<i64>,
    #[serde(rename = "memoryCellMaxValue", default, skip_serializing_if = "Option::is_none")]
    pub cell_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eof_mode: Option<EofMode>,
    #[serde(rename = "enableOctoDebug", default, skip_serializing_if = "Option::is_none")]
    pub allow_debug_marker: Option<bool>,
}

impl Overrides {
    /// No overrides at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse overrides from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Load overrides from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&text)
    }

    /// Merge these overrides over `base`.
    pub fn apply(&self, base: Settings) -> Settings {
        Settings {
            tape_length: self.tape_length.unwrap_or(base.tape_length),
            cell_min: self.cell_min.unwrap_or(base.cell_min),
            cell_max: self.cell_max.unwrap_or(base.cell_max),
            eof_mode: self.eof_mode.unwrap_or(base.eof_mode),
            allow_debug_marker: self.allow_debug_marker.unwrap_or(base.allow_debug_marker),
        }
    }

    pub fn tape_length(mut self, cells: usize) -> Self {
        self.tape_length = Some(cells);
        self
    }

    pub fn cell_range(mut self, min: i64, max: i64) -> Self {
        self.cell_min = Some(min);
        self.cell_max = Some(max);
        self
    }

    pub fn eof_mode(mut self, mode: EofMode) -> Self {
        self.eof_mode = Some(mode);
        self
    }

    pub fn debug_marker(mut self, enabled: bool) -> Self {
        self.allow_debug_marker = Some(enabled);
        self
    }
}

impl From<Settings> for Overrides {
    fn from(s: Settings) -> Self {
        Self {
            tape_length: Some(s.tape_length),
            cell_min: Some(s.cell_min),
            cell_max: Some(s.cell_max),
            eof_mode: Some(s.eof_mode),
            allow_debug_marker: Some(s.allow_debug_marker),
        }
    }
}

/// Errors in loading or checking settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tape must have at least one cell")]
    EmptyTape,

    #[error("tape length {length} exceeds the maximum of {max} cells")]
    TapeTooLong { length: usize, max: usize },

    #[error("cell range [{min}, {max}) is empty")]
    EmptyCellRange { min: i64, max: i64 },

    #[error("cell range [{min}, {max}) is wider than 2^63 - 1 values")]
    CellRangeTooWide { min: i64, max: i64 },

    #[error("cell range [{min}, {max}) does not contain zero")]
    ZeroOutsideRange { min: i64, max: i64 },

    #[error("unknown EOF mode: {0}")]
    UnknownEofMode(String),

    #[error("invalid settings JSON: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),
}
