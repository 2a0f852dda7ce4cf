//! The session store: single source of truth for session lifecycle.
//!
//! Responsible for:
//! - Creating sessions when the game server issues a login
//! - Looking sessions up for challenge/status requests
//! - Binding a wallet address exactly once on successful verification
//! - Deleting sessions past their TTL
//!
//! # Concurrency note
//!
//! `SessionStore` is NOT thread-safe by itself — it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the store is
//! owned by the orchestrator and shared behind a single `tokio::sync::
//! Mutex`, which both the request handlers and the expiry sweep take.
//! Because `create`'s existence check and `mark_verified`'s idempotency
//! check run entirely under that one lock, they are check-and-set atomic
//! without any locking logic in here.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use walletgate_protocol::{SessionId, WalletAddress};

use crate::{Session, SessionError, SessionState};

/// Owns the mapping from session id to session state.
///
/// ## Lifecycle
///
/// ```text
/// create() ──→ [Pending] ──mark_verified()──→ [Verified]
///                  │                               │
///                  └────────── sweep_expired() ────┘
///                                   │
///                                   ▼ (age > ttl, either state)
///                               deleted
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    /// All live sessions, keyed by session id. Presence in this map IS
    /// liveness: the sweep removes expired entries, so an id that maps
    /// to nothing is indistinguishable from one that never existed.
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Creates a new pending session.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyExists`] if a live session already
    /// uses this id. The caller (which generates ids randomly) treats
    /// that as a collision and retries with a fresh id.
    pub fn create(
        &mut self,
        id: SessionId,
        player: impl Into<String>,
        nonce: String,
    ) -> Result<&Session, SessionError> {
        if self.sessions.contains_key(&id) {
            return Err(SessionError::AlreadyExists(id));
        }

        let player = player.into();
        let session = Session {
            id: id.clone(),
            player,
            state: SessionState::Pending,
            nonce,
            created_at: Instant::now(),
        };

        tracing::info!(session = %id, player = %session.player, "session created");

        self.sessions.insert(id.clone(), session);

        // `expect` is safe here: we inserted the entry one line above.
        Ok(self.sessions.get(&id).expect("just inserted"))
    }

    /// Looks up a session by id.
    ///
    /// Returns `None` for unknown and expired ids alike.
    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Binds a wallet address to a session. The one legal mutation.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`] — no live session for this id
    /// - [`SessionError::AlreadyVerified`] — a wallet is already bound.
    ///   A replayed finalize must not silently succeed, or a second
    ///   (attacker-controlled) signature could re-bind the session to a
    ///   different wallet after the game server has read the first one.
    pub fn mark_verified(
        &mut self,
        id: &SessionId,
        wallet_address: WalletAddress,
    ) -> Result<&Session, SessionError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        if session.state.is_verified() {
            return Err(SessionError::AlreadyVerified(id.clone()));
        }

        tracing::info!(
            session = %id,
            player = %session.player,
            wallet = %wallet_address,
            "session verified, wallet connected"
        );

        session.state = SessionState::Verified {
            wallet_address,
            verified_at: Instant::now(),
        };

        Ok(self.sessions.get(id).expect("just modified"))
    }

    /// Deletes every session older than `ttl`, regardless of state.
    ///
    /// A verified session expires on the same clock as a pending one —
    /// verification does not buy extra time. Deletion is silent: nobody
    /// is waiting on an expired session, so there is no error to report.
    ///
    /// Returns the ids that were removed.
    pub fn sweep_expired(&mut self, ttl: Duration) -> Vec<SessionId> {
        let mut removed = Vec::new();

        self.sessions.retain(|id, session| {
            if session.created_at.elapsed() > ttl {
                removed.push(id.clone());
                false // delete this entry
            } else {
                true // keep this entry
            }
        });

        for id in &removed {
            tracing::info!(session = %id, "session expired");
        }

        removed
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Generates a random 32-character hex string (128 bits of entropy).
///
/// Used for both session ids and nonces. 128 bits is enough that
/// guessing a live session id or predicting a nonce is computationally
/// infeasible, and id collisions are rare enough that `create`'s
/// collision check is a formality.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
