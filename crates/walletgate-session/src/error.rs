//! Error types for the session layer.

use walletgate_protocol::SessionId;

/// Errors that can occur during session management.
///
/// These cover the store's three failure modes: addressing a session that
/// doesn't exist (or has already been swept — the two are deliberately
/// indistinguishable), colliding with a live session id on create, and
/// replaying a finalize against an already-verified session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No live session exists for this id. An expired session and a
    /// never-issued one produce the same error, so a caller can't probe
    /// which ids were ever valid.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// A live session already uses this id.
    #[error("session {0} already exists")]
    AlreadyExists(SessionId),

    /// The session already has a verified wallet bound to it. A second
    /// finalize is rejected — accepting it would let a replayed
    /// signature re-bind a different wallet address to the session.
    #[error("session {0} is already verified")]
    AlreadyVerified(SessionId),
}
