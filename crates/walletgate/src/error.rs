//! Unified error type for the Walletgate handshake.

use walletgate_crypto::CryptoError;
use walletgate_link::LinkError;
use walletgate_protocol::SessionId;
use walletgate_session::SessionError;

/// Every way a handshake operation can fail.
///
/// Unlike a transparent wrapper over the sub-crate errors, this enum is
/// flat: each variant corresponds to exactly one reason string reported
/// to the caller, which is the contract the transport layer maps to
/// HTTP responses. All variants are recoverable — nothing here should
/// ever take down a request worker.
#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    /// Unknown or expired session id. The two cases are intentionally
    /// indistinguishable.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// Session id collision on create.
    #[error("session {0} already exists")]
    AlreadyExists(SessionId),

    /// A finalize was replayed against a session that already has a
    /// wallet bound. The existing binding is untouched.
    #[error("session {0} is already verified")]
    AlreadyVerified(SessionId),

    /// No supported encoding could decode the submitted signature.
    #[error("invalid signature format")]
    InvalidSignatureFormat,

    /// The submitted public key is not a base-58 32-byte key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Signature decoded and key parsed, but the mathematics failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// Ran out of attempts to generate an unused session id. With
    /// 128-bit random ids this indicates a broken RNG, not a full store.
    #[error("could not generate an unused session id")]
    IdSpaceExhausted,

    /// The deep-link configuration is unusable.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The QR renderer collaborator failed.
    #[error("QR rendering failed: {0}")]
    QrRender(String),
}

impl From<SessionError> for HandshakeError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => HandshakeError::NotFound(id),
            SessionError::AlreadyExists(id) => HandshakeError::AlreadyExists(id),
            SessionError::AlreadyVerified(id) => {
                HandshakeError::AlreadyVerified(id)
            }
        }
    }
}

impl From<CryptoError> for HandshakeError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidSignatureFormat => {
                HandshakeError::InvalidSignatureFormat
            }
            CryptoError::InvalidPublicKey => HandshakeError::InvalidPublicKey,
        }
    }
}
