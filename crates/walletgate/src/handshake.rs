//! The handshake orchestrator: composes the store, challenge, codec,
//! and verifier into the five external operations.
//!
//! ```text
//! game server ──issue_session──→ {sessionId, nonce}
//! wallet page ──challenge/deep_link──→ text to sign / QR payload
//! wallet      ──verify_and_finalize──→ session flips Pending → Verified
//! game server ──status (poll)──→ {connected, walletAddress, player}
//! ```
//!
//! The orchestrator is the only writer of session state, and everything
//! it does to the store happens under one `tokio::sync::Mutex` — the
//! same lock the expiry sweeper takes. Signature decoding and the
//! Ed25519 math run *outside* the lock (they are pure CPU work), which
//! is safe because the final `mark_verified` re-checks the session
//! under the lock: of two concurrent finalize calls racing with two
//! different valid signatures, exactly one wins and the other observes
//! `AlreadyVerified`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use walletgate_crypto::{decode_signature, parse_public_key, verify_detached};
use walletgate_link::{ChallengeBuilder, Cluster, DeepLinkBuilder};
use walletgate_protocol::{
    ChallengeResponse, DeepLinkResponse, IssueSessionResponse,
    NonceResponse, SessionId, StatusResponse, VerifyRequest, WalletAddress,
};
use walletgate_session::{generate_token, SessionConfig, SessionStore};

use crate::sweeper::spawn_sweeper;
use crate::{HandshakeError, QrRenderer};

/// How many times `issue_session` retries a colliding session id before
/// giving up. Ids carry 128 bits of entropy, so more than one retry
/// already means something is deeply wrong; the bound just keeps the
/// loop provably finite.
const MAX_ID_ATTEMPTS: usize = 4;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the handshake service.
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// Application name rendered into the challenge statement.
    pub app_name: String,

    /// This service's public base URL, as reachable from the user's
    /// phone (the wallet app opens the redirect callback against it).
    pub public_base_url: String,

    /// Target network for the wallet-app deep link.
    pub cluster: Cluster,

    /// Session TTL and sweep cadence.
    pub session: SessionConfig,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            app_name: "Minecraft".into(),
            public_base_url: "http://localhost:3000".into(),
            cluster: Cluster::Devnet,
            session: SessionConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Composes the session store, challenge builder, signature pipeline,
/// and deep-link builder into the handshake's external operations.
///
/// Cheap to share: clone it (the store is behind an `Arc`) and hand a
/// copy to each request-handler task.
#[derive(Clone)]
pub struct HandshakeOrchestrator {
    store: Arc<Mutex<SessionStore>>,
    challenge: ChallengeBuilder,
    links: DeepLinkBuilder,
    session_config: SessionConfig,
}

impl HandshakeOrchestrator {
    /// Builds an orchestrator from config.
    ///
    /// # Errors
    /// [`HandshakeError::Link`] if the configured public base URL is
    /// unusable for deep links.
    pub fn new(config: HandshakeConfig) -> Result<Self, HandshakeError> {
        let links =
            DeepLinkBuilder::new(&config.public_base_url, config.cluster)?;

        Ok(Self {
            store: Arc::new(Mutex::new(SessionStore::new())),
            challenge: ChallengeBuilder::new(config.app_name),
            links,
            session_config: config.session,
        })
    }

    /// Spawns the detached expiry-sweep task for this orchestrator's
    /// store. Call once at startup; the task runs until aborted.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        spawn_sweeper(Arc::clone(&self.store), self.session_config.clone())
    }

    /// The session TTL this orchestrator was configured with.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_config.ttl_secs)
    }

    /// Runs one expiry sweep immediately. Returns the number of
    /// sessions removed. The sweeper task calls the same store
    /// operation on its own timer.
    pub async fn sweep_now(&self) -> usize {
        self.store.lock().await.sweep_expired(self.session_ttl()).len()
    }

    // -- Operations ---------------------------------------------------------

    /// Issues a fresh pending session for a player.
    ///
    /// Generates the session id and nonce (32 hex chars each); id
    /// collisions are detected by the store's create and retried with a
    /// fresh id.
    pub async fn issue_session(
        &self,
        player: &str,
    ) -> Result<IssueSessionResponse, HandshakeError> {
        let mut store = self.store.lock().await;

        for _ in 0..MAX_ID_ATTEMPTS {
            let session_id = SessionId::new(generate_token());
            let nonce = generate_token();

            match store.create(session_id.clone(), player, nonce.clone()) {
                Ok(_) => {
                    return Ok(IssueSessionResponse { session_id, nonce });
                }
                Err(walletgate_session::SessionError::AlreadyExists(id)) => {
                    tracing::warn!(session = %id, "session id collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(HandshakeError::IdSpaceExhausted)
    }

    /// Re-derives the challenge text for a session from its stored nonce.
    pub async fn challenge(
        &self,
        session_id: &SessionId,
    ) -> Result<ChallengeResponse, HandshakeError> {
        let store = self.store.lock().await;
        let session = store
            .get(session_id)
            .ok_or_else(|| HandshakeError::NotFound(session_id.clone()))?;

        Ok(ChallengeResponse {
            message: self.challenge.build(&session.id, session.nonce()),
        })
    }

    /// The session's nonce, for the login page about to request a
    /// signature. Never served to the status-polling side.
    pub async fn nonce(
        &self,
        session_id: &SessionId,
    ) -> Result<NonceResponse, HandshakeError> {
        let store = self.store.lock().await;
        let session = store
            .get(session_id)
            .ok_or_else(|| HandshakeError::NotFound(session_id.clone()))?;

        Ok(NonceResponse {
            nonce: session.nonce().to_owned(),
        })
    }

    /// The wallet-app deep link for a live session.
    ///
    /// Requires the session to exist: links are only handed out for
    /// sessions this service actually issued.
    pub async fn deep_link(
        &self,
        session_id: &SessionId,
    ) -> Result<DeepLinkResponse, HandshakeError> {
        let store = self.store.lock().await;
        if store.get(session_id).is_none() {
            return Err(HandshakeError::NotFound(session_id.clone()));
        }

        Ok(DeepLinkResponse {
            url: self.links.build(session_id),
        })
    }

    /// The deep link plus its rendered QR image, for the desktop flow.
    pub async fn connect_qr<Q: QrRenderer>(
        &self,
        renderer: &Q,
        session_id: &SessionId,
    ) -> Result<(DeepLinkResponse, Vec<u8>), HandshakeError> {
        let link = self.deep_link(session_id).await?;
        let image = renderer.render_qr(&link.url)?;
        Ok((link, image))
    }

    /// Verifies a submitted signature and finalizes the session.
    ///
    /// The expected message is reconstructed server-side from the
    /// session's stored nonce; the client-submitted `message` field is
    /// never trusted. A client that signed anything other than the
    /// canonical challenge therefore fails with `InvalidSignature`,
    /// even if its signature is valid over its own message.
    ///
    /// A failed attempt leaves the session `Pending` — the wallet may
    /// retry until the session expires.
    pub async fn verify_and_finalize(
        &self,
        request: &VerifyRequest,
    ) -> Result<(), HandshakeError> {
        // Load under the lock, then release it for the crypto work.
        let nonce = {
            let store = self.store.lock().await;
            let session = store.get(&request.session).ok_or_else(|| {
                HandshakeError::NotFound(request.session.clone())
            })?;
            if session.state.is_verified() {
                return Err(HandshakeError::AlreadyVerified(
                    request.session.clone(),
                ));
            }
            session.nonce().to_owned()
        };

        let signature = decode_signature(&request.signature)?;
        let public_key = parse_public_key(&request.public_key)?;

        let expected = self.challenge.build(&request.session, &nonce);
        if request.message != expected {
            tracing::debug!(
                session = %request.session,
                "submitted message differs from canonical challenge; \
                 verifying against the canonical bytes"
            );
        }

        if !verify_detached(expected.as_bytes(), &signature, &public_key) {
            tracing::info!(
                session = %request.session,
                "signature rejected"
            );
            return Err(HandshakeError::InvalidSignature);
        }

        // Re-taking the lock means another finalize may have won in the
        // meantime; mark_verified's check-and-set decides the race and
        // the loser surfaces AlreadyVerified.
        let mut store = self.store.lock().await;
        store.mark_verified(
            &request.session,
            WalletAddress::new(request.public_key.clone()),
        )?;

        Ok(())
    }

    /// The connection state the game server polls. Nonce-free.
    pub async fn status(
        &self,
        session_id: &SessionId,
    ) -> Result<StatusResponse, HandshakeError> {
        let store = self.store.lock().await;
        let session = store
            .get(session_id)
            .ok_or_else(|| HandshakeError::NotFound(session_id.clone()))?;

        Ok(StatusResponse {
            connected: session.state.is_verified(),
            wallet_address: session.wallet_address().cloned(),
            player: session.player.clone(),
        })
    }
}
