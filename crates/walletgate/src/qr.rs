//! QR rendering seam.
//!
//! Walletgate doesn't render QR bitmaps itself — that's the job of an
//! external collaborator (an image crate behind an HTTP handler, a
//! terminal renderer in a CLI, a no-op in tests). The core only needs
//! "text in, image bytes out", so that is the entire trait.

use crate::HandshakeError;

/// Renders a QR code image for a piece of text (here: a deep link).
///
/// # Trait bounds
///
/// - `Send + Sync` → the renderer can be shared across request-handler
///   tasks (Tokio may call it from different threads simultaneously).
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the service.
///
/// # Example
///
/// ```rust
/// use walletgate::{HandshakeError, QrRenderer};
///
/// /// Returns the text itself instead of a bitmap. Only for tests.
/// struct PassthroughRenderer;
///
/// impl QrRenderer for PassthroughRenderer {
///     fn render_qr(&self, text: &str) -> Result<Vec<u8>, HandshakeError> {
///         Ok(text.as_bytes().to_vec())
///     }
/// }
/// ```
pub trait QrRenderer: Send + Sync + 'static {
    /// Renders `text` into an encoded image (PNG bytes, data-URL bytes —
    /// whatever the transport layer serves).
    ///
    /// # Errors
    /// [`HandshakeError::QrRender`] if the backing renderer fails.
    fn render_qr(&self, text: &str) -> Result<Vec<u8>, HandshakeError>;
}
