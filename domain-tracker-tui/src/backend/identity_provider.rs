//! 本地身份提供者
//!
//! 单机运行时没有远端认证：以配置的用户名（或系统用户名）登录

use async_trait::async_trait;
use domain_tracker_core::traits::IdentityProvider;
use domain_tracker_core::types::Identity;
use domain_tracker_core::{CoreError, CoreResult};
use tokio::sync::watch;

/// 本地身份提供者
pub struct LocalIdentityProvider {
    user_name: Option<String>,
    sender: watch::Sender<Option<Identity>>,
}

impl LocalIdentityProvider {
    /// `configured` 为空时回退到 `$USER` / `$USERNAME`
    pub fn new(configured: Option<String>) -> Self {
        let user_name = configured
            .filter(|name| !name.trim().is_empty())
            .or_else(system_user_name);
        Self {
            user_name,
            sender: watch::channel(None).0,
        }
    }
}

fn system_user_name() -> Option<String> {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self) -> CoreResult<Identity> {
        let Some(name) = self.user_name.as_deref().map(str::trim) else {
            return Err(CoreError::AuthError(
                "no user name configured and none found in the environment".to_string(),
            ));
        };
        let identity = Identity::new(name.to_lowercase(), Some(name.to_string()));
        self.sender.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> CoreResult<()> {
        self.sender.send_replace(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}
