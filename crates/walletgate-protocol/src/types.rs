//! The JSON contract between the game server, the wallet page, and Walletgate.
//!
//! Every struct here travels "on the wire". The wallet-side JavaScript and
//! the game-server plugin both parse these shapes, so the serde attributes
//! are part of the external contract — field names are camelCase
//! (`publicKey`, `walletAddress`) because that is what the existing wallet
//! clients send and expect.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a login session.
///
/// This is a newtype wrapper around `String`: session ids are opaque to
/// everyone but the store, and wrapping them keeps a session id from being
/// confused with a nonce or a player name in a function signature — all
/// three are strings underneath.
///
/// `#[serde(transparent)]` serializes this as the inner string, so a
/// `SessionId("abc")` is just `"abc"` in JSON, matching what wallet
/// clients put in their `session` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Creates a session id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the id as a plain `&str` (for URL building, logging).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wallet address: the base-58 rendering of a 32-byte Ed25519 public key.
///
/// Stored and reported exactly as the wallet submitted it — Walletgate
/// validates that it decodes to 32 bytes but never re-encodes it, so the
/// game server sees the same string the wallet displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Handshake responses
// ---------------------------------------------------------------------------

/// Server → game: a freshly issued session.
///
/// The game server passes both values to the wallet page (via the login
/// URL); the nonce is never handed out again after this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSessionResponse {
    /// The id the client uses for every subsequent call.
    pub session_id: SessionId,
    /// The single-use random value that ends up inside the challenge.
    pub nonce: String,
}

/// Server → wallet page: the exact text the wallet must sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Canonical challenge statement. Byte-for-byte what gets signed.
    pub message: String,
}

/// Server → wallet page: the session's nonce, fetched by the login page
/// right before it asks the wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}

/// Server → wallet page: the wallet-app deep link to open (or render as
/// a QR code for the desktop → phone flow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkResponse {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Wallet page → server: "here is my signature, please verify it."
///
/// This is the signature envelope — it exists only for the duration of one
/// verify call and is never persisted. The `message` field is what the
/// client *claims* it signed; the server reconstructs the expected
/// challenge itself and does not trust this value (see the orchestrator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Which session this signature is for.
    pub session: SessionId,
    /// Base-58 public key of the signing wallet.
    pub public_key: String,
    /// The detached signature, in any of the supported wire encodings
    /// (base-58, base-64, or hex) — wallets differ in what they emit.
    pub signature: String,
    /// The text the client claims to have signed.
    pub message: String,
}

/// Server → wallet page: the outcome of a verify call.
///
/// `reason` is present only on rejection, so the success shape stays the
/// minimal `{"ok":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerifyResponse {
    /// The signature checked out and the session is now verified.
    pub fn accepted() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    /// The signature was rejected for the given reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Status polling
// ---------------------------------------------------------------------------

/// Server → game: the connection state the game server polls for.
///
/// Deliberately nonce-free: the nonce must never be exposed to the polling
/// side, otherwise a malicious game client could sign the challenge with
/// its own key before the real wallet does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// `true` once a signature has been accepted for this session.
    pub connected: bool,
    /// The verified wallet, absent until `connected` is `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<WalletAddress>,
    /// The player this session was issued for.
    pub player: String,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! JSON-shape tests.
    //!
    //! The wallet-side JavaScript parses these exact shapes, so a changed
    //! field name or casing breaks the handshake silently. Each test pins
    //! one shape.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        // `#[serde(transparent)]` means SessionId("abc") → "abc",
        // not {"0":"abc"}.
        let json = serde_json::to_string(&SessionId::new("abc123")).unwrap();
        assert_eq!(json, "\"abc123\"");
    }

    #[test]
    fn test_session_id_deserializes_from_plain_string() {
        let id: SessionId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id, SessionId::new("abc123"));
    }

    #[test]
    fn test_wallet_address_round_trip() {
        let addr = WalletAddress::new("6dNVokE7NFVQJXGZGjHPspWMAa2t8ySeJ2mPaMjUfBgh");
        let json = serde_json::to_string(&addr).unwrap();
        let back: WalletAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }

    // =====================================================================
    // Handshake responses
    // =====================================================================

    #[test]
    fn test_issue_session_response_uses_camel_case() {
        let resp = IssueSessionResponse {
            session_id: SessionId::new("s1"),
            nonce: "n1".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["nonce"], "n1");
    }

    #[test]
    fn test_challenge_response_round_trip() {
        let resp = ChallengeResponse {
            message: "sign me".into(),
        };
        let bytes = serde_json::to_vec(&resp).unwrap();
        let back: ChallengeResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(resp, back);
    }

    // =====================================================================
    // VerifyRequest / VerifyResponse
    // =====================================================================

    #[test]
    fn test_verify_request_parses_wallet_page_json() {
        // This is the shape the existing login page POSTs.
        let json = r#"{
            "session": "abc123",
            "publicKey": "6dNVokE7NFVQJXGZGjHPspWMAa2t8ySeJ2mPaMjUfBgh",
            "signature": "deadbeef",
            "message": "Verify wallet ownership"
        }"#;
        let req: VerifyRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.session, SessionId::new("abc123"));
        assert_eq!(req.public_key, "6dNVokE7NFVQJXGZGjHPspWMAa2t8ySeJ2mPaMjUfBgh");
        assert_eq!(req.signature, "deadbeef");
    }

    #[test]
    fn test_verify_request_rejects_snake_case_public_key() {
        // The contract is camelCase — a `public_key` field must not parse.
        let json = r#"{
            "session": "abc",
            "public_key": "x",
            "signature": "y",
            "message": "z"
        }"#;
        let result: Result<VerifyRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_response_accepted_omits_reason() {
        let json = serde_json::to_string(&VerifyResponse::accepted()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn test_verify_response_rejected_includes_reason() {
        let json: serde_json::Value =
            serde_json::to_value(VerifyResponse::rejected("invalid signature"))
                .unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["reason"], "invalid signature");
    }

    // =====================================================================
    // StatusResponse
    // =====================================================================

    #[test]
    fn test_status_response_pending_omits_wallet_address() {
        let resp = StatusResponse {
            connected: false,
            wallet_address: None,
            player: "Alice".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["connected"], false);
        assert_eq!(json["player"], "Alice");
        // Absent, not null — the polling plugin checks key presence.
        assert!(json.get("walletAddress").is_none());
    }

    #[test]
    fn test_status_response_verified_uses_camel_case_wallet_address() {
        let resp = StatusResponse {
            connected: true,
            wallet_address: Some(WalletAddress::new("wallet123")),
            player: "Alice".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["connected"], true);
        assert_eq!(json["walletAddress"], "wallet123");
    }

    #[test]
    fn test_status_response_never_contains_nonce() {
        // Defense for the "nonce never exposed" invariant at the type
        // level: the struct simply has no nonce field.
        let resp = StatusResponse {
            connected: true,
            wallet_address: Some(WalletAddress::new("w")),
            player: "p".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("nonce"));
    }
}
