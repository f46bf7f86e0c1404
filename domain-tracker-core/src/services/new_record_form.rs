//! Add-row form

use std::sync::Arc;

use crate::error::CoreResult;
use crate::schema::{self, CHECKBOX_CHECKED, CHECKBOX_UNCHECKED};
use crate::services::ServiceContext;
use crate::types::{FieldKey, NewDomainRecord, RecordFields};

/// Transient values of the add-row form.
///
/// Submitting creates one record owned by the signed-in identity. The store
/// picks the id. Values survive a failed submit so the user can retry.
pub struct NewRecordForm {
    ctx: Arc<ServiceContext>,
    fields: RecordFields,
    clear_on_create: bool,
}

impl NewRecordForm {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            fields: RecordFields::default(),
            clear_on_create: false,
        }
    }

    /// Empty the form after every successful submit
    #[must_use]
    pub fn with_clear_on_create(mut self, clear: bool) -> Self {
        self.clear_on_create = clear;
        self
    }

    #[must_use]
    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }

    #[must_use]
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(key)
    }

    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) -> CoreResult<()> {
        schema::ensure_writable(key)?;
        self.fields.set(key, value)
    }

    pub fn toggle_checkbox(&mut self, key: FieldKey) -> CoreResult<()> {
        let next = if self.fields.get(key) == Some(CHECKBOX_CHECKED) {
            CHECKBOX_UNCHECKED
        } else {
            CHECKBOX_CHECKED
        };
        self.set_field(key, next)
    }

    pub fn reset(&mut self) {
        self.fields = RecordFields::default();
    }

    /// Create a record from the current values, returning its new id.
    ///
    /// Fields never touched are left out of the record.
    pub async fn submit(&mut self) -> CoreResult<String> {
        let identity = self.ctx.require_identity()?;
        schema::validate(&self.fields)?;

        let record = NewDomainRecord::new(identity.id, self.fields.clone());
        let id = self
            .ctx
            .document_store
            .create(&record)
            .await
            .inspect_err(|e| e.log("Create"))?;

        log::info!("Created domain record {id}");
        if self.clear_on_create {
            self.reset();
        }
        Ok(id)
    }
}
