//! Wire types for Walletgate's login handshake.
//!
//! Walletgate sits between a game server and a browser/mobile wallet.
//! Both sides talk to it over JSON, and this crate is the single place
//! where those JSON shapes are defined:
//!
//! 1. **Identity newtypes** — [`SessionId`], [`WalletAddress`]
//! 2. **Requests** — what the wallet page submits ([`VerifyRequest`])
//! 3. **Responses** — what the service answers with ([`StatusResponse`],
//!    [`VerifyResponse`], and friends)
//!
//! # How it fits in the stack
//!
//! ```text
//! walletgate (above)       ← orchestrates sessions, produces/consumes these types
//!     ↕
//! Protocol layer (this crate)  ← defines the JSON contract
//!     ↕
//! HTTP transport (external)    ← external collaborator, out of scope
//! ```

mod types;

pub use types::{
    ChallengeResponse, DeepLinkResponse, IssueSessionResponse,
    NonceResponse, SessionId, StatusResponse, VerifyRequest,
    VerifyResponse, WalletAddress,
};
