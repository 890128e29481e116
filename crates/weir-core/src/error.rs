//! Error types for the port alphabets.

use thiserror::Error;

/// Errors produced when parsing a diagnostic name back into an alphabet
/// value.
///
/// The stable names emitted by the [`Display`](std::fmt::Display) impls of
/// the state, event, and action alphabets round-trip through
/// [`FromStr`](std::str::FromStr); anything else is rejected with the
/// offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAlphabetError {
    /// The token does not name a port state.
    #[error("unknown port state: {0}")]
    State(String),

    /// The token does not name a port event.
    #[error("unknown port event: {0}")]
    Event(String),

    /// The token does not name a port action.
    #[error("unknown port action: {0}")]
    Action(String),
}
