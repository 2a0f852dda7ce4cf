//! Signature decoding and verification for Walletgate.
//!
//! This crate is the cryptographic half of the handshake:
//!
//! 1. **Wire decoding** — wallets emit signatures in different string
//!    encodings; [`decode_signature`] tries each supported one in order.
//! 2. **Key parsing** — [`parse_public_key`] validates the base-58
//!    32-byte public-key encoding used by the target wallet ecosystem.
//! 3. **Verification** — [`verify_detached`] checks an Ed25519 detached
//!    signature and is total: any malformed input yields `false`, never
//!    a panic.
//!
//! Decode failures and key-parse failures are *errors* (the caller can
//! tell the client what was wrong with its request); a signature that
//! decodes fine but doesn't check out cryptographically is just `false`.

mod codec;
mod error;
mod verify;

pub use codec::{decode_signature, WireEncoding, DECODE_ORDER};
pub use error::CryptoError;
pub use verify::{
    parse_public_key, verify_detached, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
