//! Session context: who is signed in, injected into every data operation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{CoreError, CoreResult};
use crate::traits::IdentityProvider;
use crate::types::Identity;

/// Current identity, backed by an [`IdentityProvider`]
#[derive(Clone)]
pub struct SessionContext {
    provider: Arc<dyn IdentityProvider>,
    identity: watch::Receiver<Option<Identity>>,
}

impl SessionContext {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let identity = provider.watch();
        Self { provider, identity }
    }

    pub async fn sign_in(&self) -> CoreResult<Identity> {
        match self.provider.sign_in().await {
            Ok(identity) => {
                log::info!("Signed in as {}", identity.label());
                Ok(identity)
            }
            Err(e) => {
                e.log("Sign-in");
                Err(e)
            }
        }
    }

    pub async fn sign_out(&self) -> CoreResult<()> {
        self.provider.sign_out().await.inspect_err(|e| e.log("Sign-out"))?;
        log::info!("Signed out");
        Ok(())
    }

    /// Identity right now, `None` while signed out
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Identity for a data operation.
    ///
    /// # Errors
    /// `NotSignedIn` while signed out; callers must not touch the store then.
    pub fn require(&self) -> CoreResult<Identity> {
        self.current().ok_or(CoreError::NotSignedIn)
    }

    /// Receiver that observes every sign-in and sign-out
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.clone()
    }
}
