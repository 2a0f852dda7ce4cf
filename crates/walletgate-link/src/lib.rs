//! Challenge construction and wallet deep links for Walletgate.
//!
//! Two pure formatting concerns live here:
//!
//! 1. [`ChallengeBuilder`] — renders the exact text the wallet must
//!    sign. Byte-for-byte determinism is the whole contract: the server
//!    re-derives the same string at verification time.
//! 2. [`DeepLinkBuilder`] — renders the wallet-app deep link that
//!    bridges the browser/mobile flow back to this service. Also pure
//!    string work, but against an *external* contract: the wallet app
//!    silently fails to connect if the parameter names don't match.
//!
//! Neither holds any session state.

mod challenge;
mod deeplink;

pub use challenge::ChallengeBuilder;
pub use deeplink::{Cluster, DeepLinkBuilder, LinkError};
