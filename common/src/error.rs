//! Error kinds shared by every crate in the workspace.

use thiserror::Error;

/// A single target token could not be parsed.
///
/// Raised per comma-separated segment; the resolver records it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid target '{token}': {reason}")]
pub struct ParseError {
    pub token: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// Fatal outcomes of a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("'{0}' is not DNS-resolvable")]
    UnresolvableTarget(String),

    #[error("root privileges are required to send ICMP echo requests")]
    Privilege,

    #[error("probe transport failed: {0}")]
    Transport(String),

    #[error("aborted by operator")]
    Aborted,
}
