//! Live, owner-scoped list of domain records

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{DomainQuery, Snapshot, Subscription};
use crate::types::DomainRecord;

/// Rows of the signed-in user, kept current by one live query.
///
/// The row list is replaced wholesale on every snapshot. At most one
/// subscription is open at a time, and it belongs to the current identity.
pub struct DomainCollectionView {
    ctx: Arc<ServiceContext>,
    owner: Option<String>,
    subscription: Option<Subscription>,
    rows: Snapshot,
}

impl DomainCollectionView {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            owner: None,
            subscription: None,
            rows: Snapshot::default(),
        }
    }

    /// Follow the session's current identity.
    ///
    /// Closes the old subscription and opens one for the new identity when it
    /// changed; signing out leaves the view empty with nothing open. Returns
    /// whether anything changed.
    pub async fn sync_identity(&mut self) -> CoreResult<bool> {
        let owner = self.ctx.session.current().map(|identity| identity.id);
        if owner == self.owner && (owner.is_none() || self.is_active()) {
            return Ok(false);
        }

        self.close();
        let Some(owner) = owner else {
            log::debug!("No identity, domain list suspended");
            return Ok(true);
        };

        let mut subscription = self
            .ctx
            .document_store
            .subscribe(DomainQuery::owned_by(owner.clone()))
            .await
            .inspect_err(|e| e.log("Subscribe"))?;
        self.rows = subscription.latest();
        self.subscription = Some(subscription);
        log::info!("Watching domains of {owner} ({} rows)", self.rows.len());
        self.owner = Some(owner);
        Ok(true)
    }

    /// Adopt the newest snapshot if one arrived. Never waits.
    pub fn refresh(&mut self) -> bool {
        match self.subscription.as_mut() {
            Some(sub) if sub.has_changed() => {
                self.rows = sub.latest();
                true
            }
            _ => false,
        }
    }

    /// Wait for the next snapshot and adopt it.
    ///
    /// # Errors
    /// `NotSignedIn` when no subscription is open
    pub async fn changed(&mut self) -> CoreResult<()> {
        let sub = self.subscription.as_mut().ok_or(CoreError::NotSignedIn)?;
        self.rows = sub.changed().await?;
        Ok(())
    }

    /// Cancel the subscription and drop the rows
    pub fn close(&mut self) {
        if let Some(mut sub) = self.subscription.take() {
            sub.cancel();
        }
        self.owner = None;
        self.rows = Snapshot::default();
    }

    #[must_use]
    pub fn rows(&self) -> &[DomainRecord] {
        &self.rows
    }

    /// Shared handle on the current rows
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.rows.clone()
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|sub| !sub.is_cancelled())
    }
}
