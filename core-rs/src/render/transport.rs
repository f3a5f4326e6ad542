//! Render transport trait
//!
//! Abstracts the external diagram renderer. The orchestrator only needs
//! "diagram text + format in, image bytes or error out"; timeouts and
//! retries belong to the implementation.

use std::future::Future;

use crate::errors::Result;
use crate::model::OutputFormat;

/// External diagram renderer
///
/// Implementations must be shareable across tasks; the orchestrator holds
/// one instance behind an `Arc` for a whole batch.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct Canned;
///
/// impl RenderTransport for Canned {
///     async fn render(&self, _diagram: String, _format: OutputFormat) -> Result<Vec<u8>> {
///         Ok(b"<svg/>".to_vec())
///     }
/// }
/// ```
pub trait RenderTransport: Send + Sync + 'static {
    fn render(&self, diagram: String, format: OutputFormat) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
