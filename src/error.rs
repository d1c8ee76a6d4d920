//! Error types for the client library.
//!
//! One variant per failure condition: construction, capability gating,
//! transport, protocol-fatal server errors, and hook bookkeeping.

use thiserror::Error;

use crate::conn::Status;
use crate::event::EventKind;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Top-level client errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Required `nick` field missing or empty at construction.
    #[error("config: nick is required")]
    MissingNick,

    /// A privileged operation was invoked while the connection is not
    /// in the state that permits it.
    #[error("operation `{op}` denied while connection is {status}")]
    AccessDenied {
        /// The blocked operation.
        op: &'static str,
        /// The connection state at the call site.
        status: Status,
    },

    /// Transport-level connect failure. Recoverable: the connection is
    /// left unchanged and the caller may retry.
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    /// Read or write error on an established connection. Fatal to that
    /// connection only.
    #[error("transport fault: {0}")]
    Transport(#[source] std::io::Error),

    /// The server issued an `ERROR` command and closed the link.
    #[error("server closed the link: {0}")]
    ServerClosed(String),

    /// `unhook` on an unregistered (event, id) pair.
    #[error("no hook `{id}` registered for {event}")]
    HookNotFound {
        /// The event the removal targeted.
        event: EventKind,
        /// The caller-supplied hook id.
        id: String,
    },

    /// A raw line could not be parsed.
    #[error("invalid line: {0}")]
    Parse(#[from] ParseError),
}

/// Errors encountered when parsing a raw protocol line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Line was empty or whitespace only.
    #[error("empty line")]
    Empty,

    /// No command token after the optional prefix.
    #[error("missing command")]
    MissingCommand,
}
