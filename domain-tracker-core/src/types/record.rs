//! Domain record type definitions

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Column identifier of a domain record.
///
/// `ExpiresIn` is derived from `CurrentExpiry` at render time and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Purpose,
    CurrentRegistrar,
    FirstRegistered,
    CurrentExpiry,
    ExpiresIn,
    Released,
}

impl FieldKey {
    /// Stored attribute name (camelCase, as it appears in documents)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Purpose => "purpose",
            Self::CurrentRegistrar => "currentRegistrar",
            Self::FirstRegistered => "firstRegistered",
            Self::CurrentExpiry => "currentExpiry",
            Self::ExpiresIn => "expiresIn",
            Self::Released => "released",
        }
    }

    /// Whether the key maps to a persisted attribute
    #[must_use]
    pub fn is_stored(self) -> bool {
        !matches!(self, Self::ExpiresIn)
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authored attributes of a domain record.
///
/// Everything except the store-assigned `id` and the creation-time `owner`.
/// Absent fields are skipped on serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Free text or a registrar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_registrar: Option<String>,

    /// ISO date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_registered: Option<String>,

    /// ISO date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_expiry: Option<String>,

    /// `"yes"` when the domain has been let go
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
}

impl RecordFields {
    /// Read a stored field. Always `None` for derived keys.
    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::Name => self.name.as_deref(),
            FieldKey::Purpose => self.purpose.as_deref(),
            FieldKey::CurrentRegistrar => self.current_registrar.as_deref(),
            FieldKey::FirstRegistered => self.first_registered.as_deref(),
            FieldKey::CurrentExpiry => self.current_expiry.as_deref(),
            FieldKey::Released => self.released.as_deref(),
            FieldKey::ExpiresIn => None,
        }
    }

    /// Write a stored field.
    ///
    /// Fails with `ValidationError` for derived keys.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) -> CoreResult<()> {
        let slot = match key {
            FieldKey::Name => &mut self.name,
            FieldKey::Purpose => &mut self.purpose,
            FieldKey::CurrentRegistrar => &mut self.current_registrar,
            FieldKey::FirstRegistered => &mut self.first_registered,
            FieldKey::CurrentExpiry => &mut self.current_expiry,
            FieldKey::Released => &mut self.released,
            FieldKey::ExpiresIn => {
                return Err(CoreError::ValidationError(format!(
                    "'{key}' is derived and cannot be written"
                )))
            }
        };
        *slot = Some(value.into());
        Ok(())
    }

    /// Whether no field has been filled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the record is marked released
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released.as_deref() == Some("yes")
    }
}

/// One entry in the `domains` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    /// Store-assigned identifier, immutable
    pub id: String,
    /// Identity id of the creator, used as the query filter
    pub owner: String,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl DomainRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, owner: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            fields,
        }
    }

    /// Shorthand for `self.fields.get(key)`
    #[must_use]
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(key)
    }
}

/// Create command payload: a record before the store has assigned its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDomainRecord {
    pub owner: String,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl NewDomainRecord {
    #[must_use]
    pub fn new(owner: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            owner: owner.into(),
            fields,
        }
    }

    /// Persisted form once the store has picked an id
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> DomainRecord {
        DomainRecord::new(id, self.owner, self.fields)
    }
}

/// Update command payload. Never carries the record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RecordPatch {
    /// Full overwrite of the authored fields
    Overwrite { fields: RecordFields },
    /// Change exactly one field, leaving the rest untouched
    SetField { key: FieldKey, value: String },
}

impl RecordPatch {
    /// Apply the patch to stored fields
    pub fn apply_to(&self, fields: &mut RecordFields) -> CoreResult<()> {
        match self {
            Self::Overwrite { fields: new_fields } => {
                fields.clone_from(new_fields);
                Ok(())
            }
            Self::SetField { key, value } => fields.set(*key, value.clone()),
        }
    }

    /// Keys this patch writes
    #[must_use]
    pub fn touched_keys(&self) -> Vec<FieldKey> {
        match self {
            Self::Overwrite { .. } => crate::schema::FIELDS
                .iter()
                .map(|f| f.key)
                .filter(|k| k.is_stored())
                .collect(),
            Self::SetField { key, .. } => vec![*key],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_round_through_keys() {
        let mut fields = RecordFields::default();
        assert!(fields.is_empty());

        fields.set(FieldKey::CurrentRegistrar, "GoDaddy").unwrap();
        fields.set(FieldKey::CurrentExpiry, "2025-01-01").unwrap();

        assert_eq!(fields.get(FieldKey::CurrentRegistrar), Some("GoDaddy"));
        assert_eq!(fields.get(FieldKey::CurrentExpiry), Some("2025-01-01"));
        assert_eq!(fields.get(FieldKey::Name), None);
        assert!(!fields.is_empty());
    }

    #[test]
    fn derived_key_is_not_writable() {
        let mut fields = RecordFields::default();
        let err = fields.set(FieldKey::ExpiresIn, "5").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(fields.get(FieldKey::ExpiresIn), None);
    }

    #[test]
    fn released_only_for_literal_yes() {
        let mut fields = RecordFields::default();
        assert!(!fields.is_released());
        fields.released = Some(String::new());
        assert!(!fields.is_released());
        fields.released = Some("YES".into());
        assert!(!fields.is_released());
        fields.released = Some("yes".into());
        assert!(fields.is_released());
    }

    #[test]
    fn record_serializes_flat_camel_case_and_skips_absent() {
        let mut fields = RecordFields::default();
        fields.name = Some("example.com".into());
        fields.first_registered = Some("2019-05-01".into());
        let record = DomainRecord::new("doc-1", "user-1", fields);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "doc-1");
        assert_eq!(json["owner"], "user-1");
        assert_eq!(json["name"], "example.com");
        assert_eq!(json["firstRegistered"], "2019-05-01");
        assert!(json.get("purpose").is_none());
        assert!(json.get("expiresIn").is_none());

        let back: DomainRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn set_field_patch_touches_one_key() {
        let mut fields = RecordFields {
            name: Some("a.com".into()),
            current_expiry: Some("2024-03-15".into()),
            ..RecordFields::default()
        };
        let patch = RecordPatch::SetField {
            key: FieldKey::CurrentExpiry,
            value: "2025-03-15".into(),
        };
        patch.apply_to(&mut fields).unwrap();

        assert_eq!(patch.touched_keys(), vec![FieldKey::CurrentExpiry]);
        assert_eq!(fields.current_expiry.as_deref(), Some("2025-03-15"));
        assert_eq!(fields.name.as_deref(), Some("a.com"));
    }

    #[test]
    fn overwrite_patch_replaces_everything() {
        let mut fields = RecordFields {
            name: Some("a.com".into()),
            purpose: Some("blog".into()),
            ..RecordFields::default()
        };
        let patch = RecordPatch::Overwrite {
            fields: RecordFields {
                name: Some("b.com".into()),
                ..RecordFields::default()
            },
        };
        patch.apply_to(&mut fields).unwrap();

        assert_eq!(fields.name.as_deref(), Some("b.com"));
        assert_eq!(fields.purpose, None);
        assert!(!patch.touched_keys().contains(&FieldKey::ExpiresIn));
    }
}
