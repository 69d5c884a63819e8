//! Setup-time error taxonomy
//!
//! Everything here is fatal for the run being configured. Stepping itself is
//! infallible: a NaN escaping a degenerate collision is a bug in the scenario,
//! not a recoverable condition, so `step` carries no error channel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// A configured dimension, count, or rate makes no geometric sense.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rejection sampling ran out of attempts before finding a clear spot.
    #[error(
        "placement exhausted after {attempts} attempts \
         ({placed} of {requested} particles placed)"
    )]
    PlacementExhausted {
        attempts: u32,
        placed: usize,
        requested: usize,
    },
}
