//! Ed25519 public-key parsing and detached-signature verification.
//!
//! Two-stage design, matching how failures are reported to clients:
//!
//! 1. [`parse_public_key`] — syntactic. A key that isn't base-58 or isn't
//!    32 bytes is a client error ([`CryptoError::InvalidPublicKey`]) and
//!    never reaches the verifier.
//! 2. [`verify_detached`] — semantic. Everything past parsing collapses
//!    to a boolean: wrong signature length, a 32-byte blob that isn't a
//!    valid curve point, or signature math that doesn't check out are all
//!    just `false`. Verification is total over its input domain — no
//!    input can make it panic.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::CryptoError;

/// Length of an encoded Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 detached signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Parses a base-58 public key into its 32 raw bytes.
///
/// This validates the *encoding* only — whether the bytes form a valid
/// curve point is checked (and reported as `false`) by
/// [`verify_detached`].
///
/// # Errors
/// [`CryptoError::InvalidPublicKey`] if the string isn't base-58 or
/// doesn't decode to exactly [`PUBLIC_KEY_LENGTH`] bytes.
pub fn parse_public_key(
    public_key: &str,
) -> Result<[u8; PUBLIC_KEY_LENGTH], CryptoError> {
    let bytes = bs58::decode(public_key)
        .into_vec()
        .map_err(|_| CryptoError::InvalidPublicKey)?;

    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKey)
}

/// Verifies an Ed25519 detached signature.
///
/// Returns `true` only if `signature` is exactly [`SIGNATURE_LENGTH`]
/// bytes, `public_key` decompresses to a valid verifying key, and the
/// signature is valid over `message`. Every failure mode returns `false`.
pub fn verify_detached(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8; PUBLIC_KEY_LENGTH],
) -> bool {
    // The decoders upstream accept any byte length; wrong-length
    // signatures are rejected here rather than crashing the conversion.
    let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };

    // Not every 32-byte string is a point on the curve.
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };

    let sig = Signature::from_bytes(&sig_bytes);
    key.verify(message, &sig).is_ok()
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for key parsing and verification.
    //!
    //! Keypairs are built from fixed seed bytes (`SigningKey::from_bytes`
    //! is infallible for any 32 bytes), so no RNG is involved and the
    //! tests are fully deterministic.

    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    /// A deterministic keypair for tests.
    fn test_key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    // =====================================================================
    // parse_public_key
    // =====================================================================

    #[test]
    fn test_parse_public_key_round_trips_key_bytes() {
        let key = test_key(7);
        let raw = key.verifying_key().to_bytes();
        let encoded = bs58::encode(raw).into_string();

        let parsed = parse_public_key(&encoded).unwrap();
        assert_eq!(parsed, raw);
    }

    #[test]
    fn test_parse_public_key_wrong_length_returns_error() {
        // 16 bytes of valid base-58 — decodes fine, wrong size.
        let short = bs58::encode([1u8; 16]).into_string();
        let result = parse_public_key(&short);
        assert!(matches!(result, Err(CryptoError::InvalidPublicKey)));
    }

    #[test]
    fn test_parse_public_key_bad_alphabet_returns_error() {
        let result = parse_public_key("0O0O0O0O not base58");
        assert!(matches!(result, Err(CryptoError::InvalidPublicKey)));
    }

    #[test]
    fn test_parse_public_key_empty_returns_error() {
        let result = parse_public_key("");
        assert!(matches!(result, Err(CryptoError::InvalidPublicKey)));
    }

    // =====================================================================
    // verify_detached
    // =====================================================================

    #[test]
    fn test_verify_detached_valid_signature_returns_true() {
        let key = test_key(1);
        let message = b"Verify wallet ownership for Minecraft login.";
        let sig = key.sign(message);

        assert!(verify_detached(
            message,
            &sig.to_bytes(),
            &key.verifying_key().to_bytes(),
        ));
    }

    #[test]
    fn test_verify_detached_flipped_bit_returns_false() {
        // A single-bit mutation anywhere in the signature must fail.
        let key = test_key(2);
        let message = b"challenge text";
        let mut sig = key.sign(message).to_bytes();
        sig[10] ^= 0x01;

        assert!(!verify_detached(
            message,
            &sig,
            &key.verifying_key().to_bytes(),
        ));
    }

    #[test]
    fn test_verify_detached_different_message_returns_false() {
        let key = test_key(3);
        let sig = key.sign(b"the message that was signed");

        assert!(!verify_detached(
            b"a different message",
            &sig.to_bytes(),
            &key.verifying_key().to_bytes(),
        ));
    }

    #[test]
    fn test_verify_detached_wrong_key_returns_false() {
        let signer = test_key(4);
        let other = test_key(5);
        let message = b"hello";
        let sig = signer.sign(message);

        assert!(!verify_detached(
            message,
            &sig.to_bytes(),
            &other.verifying_key().to_bytes(),
        ));
    }

    #[test]
    fn test_verify_detached_short_signature_returns_false() {
        // The codec deliberately lets wrong-length signatures through;
        // the verifier must reject them without panicking.
        let key = test_key(6);
        assert!(!verify_detached(
            b"msg",
            &[0u8; 12],
            &key.verifying_key().to_bytes(),
        ));
    }

    #[test]
    fn test_verify_detached_empty_signature_returns_false() {
        let key = test_key(6);
        assert!(!verify_detached(b"msg", &[], &key.verifying_key().to_bytes()));
    }

    #[test]
    fn test_verify_detached_garbage_key_returns_false() {
        // All-0xFF is not a canonical curve point. Must be `false`,
        // not a panic.
        let key = test_key(8);
        let sig = key.sign(b"msg").to_bytes();

        assert!(!verify_detached(b"msg", &sig, &[0xFF; 32]));
    }
}
