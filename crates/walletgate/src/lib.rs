//! # Walletgate
//!
//! Wallet-signature login handshake for applications that cannot hold a
//! wallet's private key themselves (a game server, a native app).
//!
//! The flow:
//!
//! 1. The game server calls [`HandshakeOrchestrator::issue_session`] and
//!    gets `{sessionId, nonce}`.
//! 2. The user's browser (or phone, via the QR-encoded deep link) opens
//!    the login page, fetches the challenge, and asks the wallet to sign
//!    it.
//! 3. The wallet page submits `{session, publicKey, signature, message}`
//!    to [`HandshakeOrchestrator::verify_and_finalize`]; the server
//!    rebuilds the canonical challenge itself, verifies the Ed25519
//!    signature, and binds the wallet to the session exactly once.
//! 4. The game server polls [`HandshakeOrchestrator::status`] until
//!    `connected` flips to `true`.
//!
//! Sessions live in process memory and are deleted by age on a periodic
//! sweep ([`HandshakeOrchestrator::spawn_sweeper`]) — verified or not.
//! A production deployment that needs durable sessions can swap the
//! store behind the orchestrator without touching the handshake logic.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use walletgate::prelude::*;
//!
//! # async fn run() -> Result<(), HandshakeError> {
//! let gate = HandshakeOrchestrator::new(HandshakeConfig {
//!     app_name: "MyGame".into(),
//!     public_base_url: "https://auth.mygame.example".into(),
//!     cluster: Cluster::MainnetBeta,
//!     session: SessionConfig::default(),
//! })?;
//! gate.spawn_sweeper();
//!
//! let issued = gate.issue_session("Alice").await?;
//! let challenge = gate.challenge(&issued.session_id).await?;
//! // ... hand `challenge.message` to the wallet, then verify_and_finalize.
//! # Ok(())
//! # }
//! ```

mod error;
mod handshake;
mod qr;
mod sweeper;

pub use error::HandshakeError;
pub use handshake::{HandshakeConfig, HandshakeOrchestrator};
pub use qr::QrRenderer;
pub use sweeper::spawn_sweeper;

/// One-stop imports for service code and tests.
pub mod prelude {
    pub use crate::{
        HandshakeConfig, HandshakeError, HandshakeOrchestrator, QrRenderer,
    };
    pub use walletgate_link::{ChallengeBuilder, Cluster, DeepLinkBuilder};
    pub use walletgate_protocol::{
        SessionId, StatusResponse, VerifyRequest, VerifyResponse,
        WalletAddress,
    };
    pub use walletgate_session::{SessionConfig, SessionStore};
}
