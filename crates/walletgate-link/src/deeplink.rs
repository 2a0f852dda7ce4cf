//! Wallet-app deep links for the browser → phone bridge.
//!
//! Desktop flow: the user scans a QR code of this link; their phone
//! opens the wallet app, which connects and then calls back into this
//! service's redirect handler. The link format is the wallet app's
//! universal-link contract:
//!
//! ```text
//! https://phantom.app/ul/v1/connect?cluster=<c>&redirect_url=<enc>
//! ```
//!
//! The parameter names are fixed by the external app — an unrecognized
//! parameter set makes it silently fail to connect, so the format is
//! pinned by tests.

use std::fmt;

use url::Url;
use walletgate_protocol::SessionId;

/// Base of the wallet app's universal connect link.
const CONNECT_BASE: &str = "https://phantom.app/ul/v1/connect";

/// Path on this service the wallet app redirects back to.
const REDIRECT_PATH: &str = "/phantom-redirect";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from deep-link configuration.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The configured public base URL doesn't parse (or can't carry a
    /// path, like a `mailto:`).
    #[error("invalid public base URL: {0}")]
    InvalidBaseUrl(String),
}

// ---------------------------------------------------------------------------
// Cluster
// ---------------------------------------------------------------------------

/// The target network the wallet should connect against.
///
/// Rendered into the `cluster` query parameter with the exact names the
/// wallet app recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Devnet,
    Testnet,
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
        })
    }
}

// ---------------------------------------------------------------------------
// DeepLinkBuilder
// ---------------------------------------------------------------------------

/// Builds wallet-app deep links pointing back at this service.
///
/// Stateless formatting; both URLs are validated once at construction so
/// that building a link for a session can't fail.
#[derive(Debug, Clone)]
pub struct DeepLinkBuilder {
    /// This service's public base URL (scheme + host + port), as wallet
    /// apps on the user's phone must reach it.
    public_base: Url,
    /// Parsed [`CONNECT_BASE`], cloned per link.
    connect_base: Url,
    cluster: Cluster,
}

impl DeepLinkBuilder {
    /// Creates a builder for the given public base URL and cluster.
    ///
    /// # Errors
    /// [`LinkError::InvalidBaseUrl`] if `public_base` doesn't parse or
    /// can't carry a path.
    pub fn new(
        public_base: &str,
        cluster: Cluster,
    ) -> Result<Self, LinkError> {
        let public_base = Url::parse(public_base)
            .map_err(|e| LinkError::InvalidBaseUrl(e.to_string()))?;
        if public_base.cannot_be_a_base() {
            return Err(LinkError::InvalidBaseUrl(format!(
                "{public_base} cannot carry a redirect path"
            )));
        }

        // Parsing a constant; routed through the same error rather than
        // unwrapped so this constructor stays panic-free.
        let connect_base = Url::parse(CONNECT_BASE)
            .map_err(|e| LinkError::InvalidBaseUrl(e.to_string()))?;

        Ok(Self {
            public_base,
            connect_base,
            cluster,
        })
    }

    /// The callback URL the wallet app opens after connecting.
    pub fn redirect_url(&self, session_id: &SessionId) -> String {
        let mut url = self.public_base.clone();
        url.set_path(REDIRECT_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("session", session_id.as_str());
        url.to_string()
    }

    /// The full deep link / QR payload for a session.
    pub fn build(&self, session_id: &SessionId) -> String {
        let redirect = self.redirect_url(session_id);

        let mut link = self.connect_base.clone();
        link.query_pairs_mut()
            .append_pair("cluster", &self.cluster.to_string())
            .append_pair("redirect_url", &redirect);
        link.to_string()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DeepLinkBuilder {
        DeepLinkBuilder::new("https://auth.example.com", Cluster::Devnet)
            .expect("valid base URL")
    }

    #[test]
    fn test_new_rejects_unparseable_base_url() {
        let result = DeepLinkBuilder::new("not a url", Cluster::Devnet);
        assert!(matches!(result, Err(LinkError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_new_rejects_pathless_scheme() {
        let result = DeepLinkBuilder::new("mailto:a@b.c", Cluster::Devnet);
        assert!(matches!(result, Err(LinkError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_redirect_url_embeds_session_id() {
        let url = builder().redirect_url(&SessionId::new("abc123"));

        assert_eq!(
            url,
            "https://auth.example.com/phantom-redirect?session=abc123"
        );
    }

    #[test]
    fn test_build_matches_wallet_app_contract_exactly() {
        // Pinned in full: the external app silently fails to connect on
        // any deviation in parameter names or encoding.
        let link = builder().build(&SessionId::new("abc123"));

        assert_eq!(
            link,
            "https://phantom.app/ul/v1/connect?cluster=devnet&redirect_url=\
             https%3A%2F%2Fauth.example.com%2Fphantom-redirect%3Fsession%3Dabc123"
        );
    }

    #[test]
    fn test_build_percent_encodes_redirect_url() {
        let link = builder().build(&SessionId::new("s1"));

        // The raw redirect URL must not appear unencoded inside the link.
        assert!(!link.contains("redirect_url=https://"));
        assert!(link.contains("redirect_url=https%3A%2F%2F"));
    }

    #[test]
    fn test_build_renders_cluster_names() {
        for (cluster, name) in [
            (Cluster::MainnetBeta, "cluster=mainnet-beta"),
            (Cluster::Devnet, "cluster=devnet"),
            (Cluster::Testnet, "cluster=testnet"),
        ] {
            let link = DeepLinkBuilder::new("https://auth.example.com", cluster)
                .unwrap()
                .build(&SessionId::new("s"));
            assert!(link.contains(name), "missing {name} in {link}");
        }
    }

    #[test]
    fn test_build_strips_base_url_path_and_query() {
        // Whatever path the operator configured, the callback always
        // lands on the redirect handler.
        let b = DeepLinkBuilder::new(
            "https://auth.example.com/some/page?x=1",
            Cluster::Devnet,
        )
        .unwrap();

        let url = b.redirect_url(&SessionId::new("s1"));
        assert_eq!(
            url,
            "https://auth.example.com/phantom-redirect?session=s1"
        );
    }
}
