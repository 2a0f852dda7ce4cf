//! Error types for the crypto layer.

/// Errors from signature decoding and public-key parsing.
///
/// Deliberately small: the only two things that can go wrong *before*
/// the actual signature mathematics. A well-formed signature that fails
/// verification is not an error here — the verifier reports that as a
/// plain `false`.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The signature string is empty or not decodable as any supported
    /// encoding (base-58, base-64, hex).
    #[error("signature is not valid base-58, base-64, or hex")]
    InvalidSignatureFormat,

    /// The public key is not a base-58 string decoding to exactly
    /// 32 bytes.
    #[error("invalid public key encoding")]
    InvalidPublicKey,
}
