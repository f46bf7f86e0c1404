//! Per-row view/edit state machine

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::schema::{self, CHECKBOX_CHECKED, CHECKBOX_UNCHECKED};
use crate::services::ServiceContext;
use crate::types::{DomainRecord, FieldKey, RecordFields, RecordPatch};
use crate::utils::date::renew_expiry;

/// Editor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    /// Holds the working copy; nothing is persisted until save
    Editing { working: RecordFields },
}

/// Editor for one domain row.
///
/// Edits go to a private working copy. Save overwrites the stored record with
/// it, cancel throws it away. Renew and delete act on the stored record and
/// are only offered while viewing.
pub struct RowEditor {
    ctx: Arc<ServiceContext>,
    record: DomainRecord,
    state: EditorState,
}

impl RowEditor {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, record: DomainRecord) -> Self {
        Self {
            ctx,
            record,
            state: EditorState::Viewing,
        }
    }

    /// Last known stored record
    #[must_use]
    pub fn record(&self) -> &DomainRecord {
        &self.record
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Working copy while editing
    #[must_use]
    pub fn working(&self) -> Option<&RecordFields> {
        match &self.state {
            EditorState::Editing { working } => Some(working),
            EditorState::Viewing => None,
        }
    }

    /// Start editing from the current record
    pub fn begin_edit(&mut self) -> CoreResult<()> {
        if self.is_editing() {
            return Err(CoreError::InvalidState("already editing".to_string()));
        }
        self.state = EditorState::Editing {
            working: self.record.fields.clone(),
        };
        Ok(())
    }

    /// Change one field of the working copy
    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) -> CoreResult<()> {
        schema::ensure_writable(key)?;
        self.working_mut()?.set(key, value)
    }

    /// Flip a checkbox field between `"yes"` and empty
    pub fn toggle_checkbox(&mut self, key: FieldKey) -> CoreResult<()> {
        let checked = self.working_mut()?.get(key) == Some(CHECKBOX_CHECKED);
        let next = if checked {
            CHECKBOX_UNCHECKED
        } else {
            CHECKBOX_CHECKED
        };
        self.set_field(key, next)
    }

    /// Drop the working copy. Never touches the store.
    pub fn cancel(&mut self) {
        self.state = EditorState::Viewing;
    }

    /// Persist the working copy as a full overwrite.
    ///
    /// On failure the editor stays in `Editing` with the working copy intact.
    pub async fn save(&mut self) -> CoreResult<()> {
        let EditorState::Editing { working } = &self.state else {
            return Err(CoreError::InvalidState("not editing".to_string()));
        };
        self.ctx.require_identity()?;
        schema::validate(working)?;

        let patch = RecordPatch::Overwrite {
            fields: working.clone(),
        };
        self.ctx
            .document_store
            .update(&self.record.id, &patch)
            .await
            .inspect_err(|e| e.log("Save"))?;

        log::info!("Saved domain record {}", self.record.id);
        if let EditorState::Editing { working } =
            std::mem::replace(&mut self.state, EditorState::Viewing)
        {
            self.record.fields = working;
        }
        Ok(())
    }

    /// Push `currentExpiry` out by one year, writing only that field.
    ///
    /// Returns the new expiry.
    pub async fn renew(&mut self) -> CoreResult<String> {
        self.ensure_viewing("renew")?;
        self.ctx.require_identity()?;

        let current = self.record.fields.current_expiry.as_deref().ok_or_else(|| {
            CoreError::ValidationError("no current expiry to renew from".to_string())
        })?;
        let renewed = renew_expiry(current)?;

        let patch = RecordPatch::SetField {
            key: FieldKey::CurrentExpiry,
            value: renewed.clone(),
        };
        self.ctx
            .document_store
            .update(&self.record.id, &patch)
            .await
            .inspect_err(|e| e.log("Renew"))?;

        log::info!("Renewed {} until {renewed}", self.record.id);
        self.record.fields.current_expiry = Some(renewed.clone());
        Ok(renewed)
    }

    /// Remove the record from the store. No confirmation, no undo.
    pub async fn delete(&self) -> CoreResult<()> {
        self.ensure_viewing("delete")?;
        self.ctx.require_identity()?;
        self.ctx
            .document_store
            .delete(&self.record.id)
            .await
            .inspect_err(|e| e.log("Delete"))?;
        log::info!("Deleted domain record {}", self.record.id);
        Ok(())
    }

    /// Adopt a fresher copy of the stored record from a snapshot.
    ///
    /// A working copy in progress is left alone.
    pub fn sync_record(&mut self, record: DomainRecord) {
        if record.id == self.record.id {
            self.record = record;
        }
    }

    fn ensure_viewing(&self, action: &str) -> CoreResult<()> {
        if self.is_editing() {
            return Err(CoreError::InvalidState(format!(
                "cannot {action} while editing"
            )));
        }
        Ok(())
    }

    fn working_mut(&mut self) -> CoreResult<&mut RecordFields> {
        match &mut self.state {
            EditorState::Editing { working } => Ok(working),
            EditorState::Viewing => Err(CoreError::InvalidState("not editing".to_string())),
        }
    }
}
