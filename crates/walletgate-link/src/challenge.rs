//! The challenge statement the wallet signs.

use walletgate_protocol::SessionId;

/// Renders the canonical challenge text for a session.
///
/// The challenge is a pure function of `(session id, nonce)` plus the
/// configured application name. It is never stored: the server rebuilds
/// it from the session record at verification time, so the rendered
/// string must be identical down to the last byte — a different nonce,
/// a reworded statement, or even trailing whitespace produces different
/// message bytes and the signature check fails.
///
/// The player's identity is deliberately not part of the text: existing
/// wallet clients sign this exact format, and the player is already
/// bound to the session server-side.
#[derive(Debug, Clone)]
pub struct ChallengeBuilder {
    /// The application name shown to the user inside the wallet's
    /// signing prompt ("Verify wallet ownership for {app} login. ...").
    app_name: String,
}

impl ChallengeBuilder {
    /// Creates a builder for the given application name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Renders the challenge for a session. Deterministic.
    pub fn build(&self, session_id: &SessionId, nonce: &str) -> String {
        format!(
            "Verify wallet ownership for {} login. Session: {}. Nonce: {}",
            self.app_name, session_id, nonce
        )
    }
}

impl Default for ChallengeBuilder {
    /// The application name of the original deployment.
    fn default() -> Self {
        Self::new("Minecraft")
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_renders_exact_canonical_string() {
        // Pinned byte-for-byte: wallet clients sign this exact format.
        let builder = ChallengeBuilder::default();

        let message = builder.build(&SessionId::new("abc123"), "n0nce");

        assert_eq!(
            message,
            "Verify wallet ownership for Minecraft login. \
             Session: abc123. Nonce: n0nce"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = ChallengeBuilder::new("MyGame");
        let id = SessionId::new("s1");

        assert_eq!(builder.build(&id, "n1"), builder.build(&id, "n1"));
    }

    #[test]
    fn test_build_contains_session_id_and_nonce_literally() {
        let builder = ChallengeBuilder::default();

        let message = builder.build(&SessionId::new("sess-42"), "nonce-42");

        assert!(message.contains("sess-42"));
        assert!(message.contains("nonce-42"));
    }

    #[test]
    fn test_build_has_no_trailing_whitespace() {
        // Trailing whitespace would be invisible to a human but fatal to
        // the signature check.
        let builder = ChallengeBuilder::default();

        let message = builder.build(&SessionId::new("x"), "y");

        assert_eq!(message, message.trim());
    }

    #[test]
    fn test_build_differs_when_nonce_differs() {
        let builder = ChallengeBuilder::default();
        let id = SessionId::new("s1");

        assert_ne!(builder.build(&id, "n1"), builder.build(&id, "n2"));
    }

    #[test]
    fn test_build_uses_configured_app_name() {
        let builder = ChallengeBuilder::new("SpaceMiner");

        let message = builder.build(&SessionId::new("s"), "n");

        assert!(message.starts_with("Verify wallet ownership for SpaceMiner login."));
    }
}
