//! Error types for rendering.
//!
//! Malformed grammars never fail: unknown letters are inert and unmatched
//! `]` is ignored. The only failures are the resource guards configured in
//! [`RenderConfig`](crate::RenderConfig).

use thiserror::Error;

/// Convenience result alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors surfaced while expanding or walking a grammar.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The walk dispatched more commands than `max_commands` allows.
    #[error("command limit exceeded: more than {limit} commands dispatched")]
    CommandLimitExceeded { limit: u64 },

    /// Materialized expansion grew past `max_expansion_len` characters.
    #[error("expansion limit exceeded: produced {len} characters, limit is {limit}")]
    ExpansionLimitExceeded { len: usize, limit: usize },

    /// The host raised the cancellation flag.
    #[error("render cancelled")]
    Cancelled,
}
