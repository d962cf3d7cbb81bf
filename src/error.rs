//! Error types for dial construction and drawing.

use thiserror::Error;

/// Why a single argument was rejected before anything was drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required value argument missing")]
    MissingValue,

    #[error("Given value {value} is not within the range of the dial {min} - {max}")]
    ValueOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Required percentage argument missing")]
    MissingPercent,

    #[error("Given percentage {percent} is not within a valid range of 1 - 100")]
    PercentOutOfRange { percent: f64 },

    #[error("Cannot draw {ticks} ticks in a range of {range}")]
    DegenerateTickSpacing { ticks: f64, range: f64 },

    #[error("No tick count given and the dial has no default tick count")]
    NoTicks,

    #[error("Stroke width exceeds the requested radius (inset radius {radius})")]
    NegativeRadius { radius: f64 },
}

/// Errors surfaced by [`crate::Dial`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialError {
    #[error("Dial instantiation attempted without specifying a canvas identifier")]
    MissingIdentifier,

    #[error("ERROR in {op} for {dial}: {source}")]
    Validation {
        dial: String,
        op: String,
        #[source]
        source: ValidationError,
    },

    #[error("Dial range {min} - {max} is empty")]
    InvalidRange { min: f64, max: f64 },

    #[error("Unrecognized color: {0:?}")]
    InvalidColor(String),
}

impl DialError {
    /// The validation failure underneath, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            DialError::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}
