//! Multi-encoding signature decoding.
//!
//! Wallet integrations disagree about how to stringify a detached
//! signature: browser extensions tend to emit base-58, mobile SDKs
//! base-64, and some hand-rolled clients lowercase hex. The server
//! cannot dictate the client's choice, so it accepts every encoding
//! that decodes unambiguously, trying them in a fixed order.
//!
//! The order is [`DECODE_ORDER`] and the first decoder that parses wins.
//! Note that the encodings overlap: a string of hex digits without a `0`
//! is also valid base-58, so such input is decoded as base-58. That
//! ambiguity is inherent to accepting multiple encodings and is harmless —
//! a misdecoded signature has the wrong bytes and simply fails
//! verification downstream.
//!
//! Decoding asserts nothing about *length*. A base-64 string that decodes
//! to 17 bytes is accepted here; rejecting wrong-length signatures is the
//! verifier's job.

use base64::prelude::*;

use crate::CryptoError;

// ---------------------------------------------------------------------------
// WireEncoding
// ---------------------------------------------------------------------------

/// One supported signature encoding.
///
/// Kept as an explicit enum (rather than a chain of `if let`s) so each
/// decoder is unit-testable on its own and the fallback order is a single
/// visible constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEncoding {
    /// Base-58 with the Bitcoin alphabet — the encoding wallet extensions
    /// use for key and signature material.
    Base58,
    /// Standard base-64 (padded, `+` and `/`).
    Base64,
    /// Hex. Odd-length input is a hard failure for this decoder, never a
    /// silent truncation.
    Hex,
}

/// The fallback order: base-58 first (what the primary wallet emits),
/// then base-64, then hex.
pub const DECODE_ORDER: [WireEncoding; 3] =
    [WireEncoding::Base58, WireEncoding::Base64, WireEncoding::Hex];

impl WireEncoding {
    /// Attempts to decode `input` as this one encoding.
    ///
    /// Returns `None` if the input doesn't parse — this is a per-strategy
    /// "not mine", not a terminal error.
    pub fn decode(&self, input: &str) -> Option<Vec<u8>> {
        match self {
            WireEncoding::Base58 => bs58::decode(input).into_vec().ok(),
            WireEncoding::Base64 => BASE64_STANDARD.decode(input).ok(),
            WireEncoding::Hex => hex::decode(input).ok(),
        }
    }

    /// Human-readable name for logging.
    fn name(&self) -> &'static str {
        match self {
            WireEncoding::Base58 => "base58",
            WireEncoding::Base64 => "base64",
            WireEncoding::Hex => "hex",
        }
    }
}

// ---------------------------------------------------------------------------
// decode_signature
// ---------------------------------------------------------------------------

/// Decodes an opaque signature string into raw bytes.
///
/// Tries each encoding in [`DECODE_ORDER`]; the first that parses is
/// accepted without checking the resulting byte length.
///
/// # Errors
/// [`CryptoError::InvalidSignatureFormat`] if the input is empty or no
/// encoding can decode it.
pub fn decode_signature(signature: &str) -> Result<Vec<u8>, CryptoError> {
    // An empty string "decodes" to zero bytes in every encoding, which
    // would masquerade as a cryptographic failure later. Call it what it
    // is: a malformed request.
    if signature.is_empty() {
        return Err(CryptoError::InvalidSignatureFormat);
    }

    for encoding in DECODE_ORDER {
        if let Some(bytes) = encoding.decode(signature) {
            tracing::debug!(
                encoding = encoding.name(),
                len = bytes.len(),
                "decoded signature"
            );
            return Ok(bytes);
        }
    }

    Err(CryptoError::InvalidSignatureFormat)
}

// =========================================================================
// Tests
// =========================================================================
