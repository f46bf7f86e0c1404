//! Identity provider abstract Trait

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::CoreResult;
use crate::types::Identity;

/// Identity Provider Trait
///
/// Platform implementation:
/// - TUI: `LocalIdentityProvider` (configured or OS user name)
///
/// Implementations publish every sign-in, sign-out and session expiry on the
/// channel returned by [`IdentityProvider::watch`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start a session
    ///
    /// # Errors
    /// `CoreError::AuthError` when the provider refuses or cannot be reached
    async fn sign_in(&self) -> CoreResult<Identity>;

    /// End the current session (no-op when signed out)
    async fn sign_out(&self) -> CoreResult<()>;

    /// Current identity, updated on every change
    fn watch(&self) -> watch::Receiver<Option<Identity>>;
}
