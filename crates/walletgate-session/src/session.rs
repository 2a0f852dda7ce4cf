//! Session types: the data structures that represent one login attempt.
//!
//! A "session" is the server's record of a wallet-login handshake in
//! flight. It tracks:
//! - WHO is logging in (the player name the game server supplied)
//! - WHAT must be signed (the nonce baked into the challenge)
//! - WHERE the handshake stands (pending or verified)
//! - WHEN it was created (so the sweep can expire it)

use std::time::Instant;

use walletgate_protocol::{SessionId, WalletAddress};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Timing configuration for session lifecycle.
///
/// The defaults mirror a short-lived login flow: the user has five
/// minutes to pull out their phone, scan the QR code, and approve the
/// signature before the session disappears.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long (in seconds) a session lives after creation. Applies to
    /// verified sessions too: verification does not extend the clock.
    /// Default: 300 (five minutes).
    pub ttl_secs: u64,

    /// How often (in seconds) the expiry sweep runs. Default: 60.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            sweep_interval_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The current state of a login session.
///
/// A two-state machine with one legal transition:
///
/// ```text
///   Pending ──(signature accepted)──→ Verified   (terminal)
/// ```
///
/// There is no `Failed` state: a rejected signature leaves the session
/// `Pending`, and the wallet may simply try again. The only other exit
/// is deletion by the expiry sweep, which applies to both states.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Issued, challenge not yet signed (or every attempt so far failed).
    Pending,

    /// A signature was accepted; the wallet is bound to this session
    /// forever (or until the sweep deletes it).
    Verified {
        /// The wallet that signed the challenge, as submitted.
        wallet_address: WalletAddress,
        /// When the signature was accepted.
        verified_at: Instant,
    },
}

impl SessionState {
    /// `true` once a wallet is bound to the session.
    pub fn is_verified(&self) -> bool {
        matches!(self, SessionState::Verified { .. })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single login session.
///
/// Created when the game server issues a login for a player; mutated at
/// most once (Pending → Verified); deleted by the sweep once its age
/// exceeds the TTL.
///
/// The nonce and creation instant are private: the nonce is immutable
/// after creation and only readable through [`Session::nonce`], and the
/// creation time is only consulted by the store's sweep.
#[derive(Debug, Clone)]
pub struct Session {
    /// The id this session is addressed by.
    pub id: SessionId,

    /// The player this login was issued for. Opaque to Walletgate —
    /// whatever identifier the game server uses.
    pub player: String,

    /// Current lifecycle state.
    pub state: SessionState,

    /// The single-use random value embedded in the challenge text.
    pub(crate) nonce: String,

    /// When the session was created (monotonic clock).
    pub(crate) created_at: Instant,
}

impl Session {
    /// The session's nonce. Immutable for the session's whole lifetime.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// When the session was created.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// The bound wallet address, if the session has been verified.
    pub fn wallet_address(&self) -> Option<&WalletAddress> {
        match &self.state {
            SessionState::Verified { wallet_address, .. } => {
                Some(wallet_address)
            }
            SessionState::Pending => None,
        }
    }
}
