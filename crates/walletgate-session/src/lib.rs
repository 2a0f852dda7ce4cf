//! Login session management for Walletgate.
//!
//! This crate handles the lifecycle of a wallet-login session:
//!
//! 1. **Issuing** — a session is created with a player name and a
//!    single-use nonce ([`SessionStore::create`])
//! 2. **Finalizing** — a successful signature check binds a wallet
//!    address to the session, exactly once ([`SessionStore::mark_verified`])
//! 3. **Expiry** — sessions are deleted by age on a periodic sweep,
//!    verified or not ([`SessionStore::sweep_expired`])
//!
//! # How it fits in the stack
//!
//! ```text
//! walletgate (above)   ← orchestrates: decides WHEN to create/verify/sweep
//!     ↕
//! Session layer (this crate)  ← owns the records: the only code that mutates them
//!     ↕
//! walletgate-protocol (below) ← provides SessionId, WalletAddress
//! ```

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Session, SessionConfig, SessionState};
pub use store::{generate_token, SessionStore};
