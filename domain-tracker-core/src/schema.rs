//! Field schema
//!
//! The ordered column table every front end iterates for headers, rows, the
//! edit inputs and the add-row form. Keeping one order for all of them is what
//! keeps the columns aligned.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::format::{format_expiry, format_registrar, format_released, Rendered};
use crate::types::{DomainRecord, FieldKey, RecordFields};
use crate::utils::date::parse_iso_date;

/// Value stored by a checked checkbox
pub const CHECKBOX_CHECKED: &str = "yes";

/// Value stored by an unchecked checkbox
pub const CHECKBOX_UNCHECKED: &str = "";

/// Input widget kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Date,
    Checkbox,
}

/// Formatter attached to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    Registrar,
    Expiry,
    Released,
}

impl Formatter {
    pub fn apply(self, value: Option<&str>, record: &DomainRecord, now: DateTime<Utc>) -> Rendered {
        match self {
            Self::Registrar => format_registrar(value),
            Self::Expiry => format_expiry(value, record, now),
            Self::Released => format_released(value),
        }
    }
}

/// One column definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub key: FieldKey,
    pub display_name: &'static str,
    pub input_kind: InputKind,
    /// Shown but never editable, never offered on the add form
    pub read_only: bool,
    pub format: Option<Formatter>,
    /// Relative column width in tenths, uniform when `None`
    pub layout_weight: Option<u16>,
}

impl FieldDef {
    const fn new(key: FieldKey, display_name: &'static str) -> Self {
        Self {
            key,
            display_name,
            input_kind: InputKind::Text,
            read_only: false,
            format: None,
            layout_weight: None,
        }
    }

    const fn input(mut self, kind: InputKind) -> Self {
        self.input_kind = kind;
        self
    }

    const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    const fn format(mut self, formatter: Formatter) -> Self {
        self.format = Some(formatter);
        self
    }

    const fn weight(mut self, tenths: u16) -> Self {
        self.layout_weight = Some(tenths);
        self
    }

    /// Layout weight in tenths with the uniform default applied
    #[must_use]
    pub fn layout_weight(&self) -> u16 {
        self.layout_weight.unwrap_or(DEFAULT_WEIGHT)
    }

    /// Display form of this column for `record`
    #[must_use]
    pub fn render(&self, record: &DomainRecord, now: DateTime<Utc>) -> Rendered {
        let raw = record.value(self.key);
        match self.format {
            Some(formatter) => formatter.apply(raw, record, now),
            None => raw.map_or(Rendered::Empty, Rendered::text),
        }
    }
}

/// Weight of a column without an explicit one, in tenths
pub const DEFAULT_WEIGHT: u16 = 10;

/// All columns, in display order
pub static FIELDS: [FieldDef; 7] = [
    FieldDef::new(FieldKey::Name, "Domain Name"),
    FieldDef::new(FieldKey::Purpose, "Purpose").weight(5),
    FieldDef::new(FieldKey::CurrentRegistrar, "Registrar").format(Formatter::Registrar),
    FieldDef::new(FieldKey::FirstRegistered, "First Registered")
        .input(InputKind::Date)
        .weight(5),
    FieldDef::new(FieldKey::CurrentExpiry, "Current Expiry")
        .input(InputKind::Date)
        .weight(5),
    FieldDef::new(FieldKey::ExpiresIn, "Expires In")
        .read_only()
        .format(Formatter::Expiry),
    FieldDef::new(FieldKey::Released, "Released")
        .input(InputKind::Checkbox)
        .format(Formatter::Released)
        .weight(2),
];

/// Definition for `key`
#[must_use]
pub fn field(key: FieldKey) -> &'static FieldDef {
    FIELDS
        .iter()
        .find(|f| f.key == key)
        .unwrap_or(&FIELDS[0])
}

/// Columns offered as inputs (add form and edit mode)
pub fn editable_fields() -> impl Iterator<Item = &'static FieldDef> {
    FIELDS.iter().filter(|f| !f.read_only)
}

/// Rejects writes to read-only columns.
pub fn ensure_writable(key: FieldKey) -> CoreResult<()> {
    if field(key).read_only || !key.is_stored() {
        return Err(CoreError::ValidationError(format!("'{key}' is read-only")));
    }
    Ok(())
}

/// Field-level validation run before create and update.
///
/// Non-empty date fields must parse; everything else is accepted as typed.
pub fn validate(fields: &RecordFields) -> CoreResult<()> {
    for def in FIELDS.iter().filter(|f| f.input_kind == InputKind::Date) {
        match fields.get(def.key) {
            Some(value) if !value.trim().is_empty() => {
                parse_iso_date(value).map_err(|_| {
                    CoreError::ValidationError(format!(
                        "{}: '{value}' is not a YYYY-MM-DD date",
                        def.display_name
                    ))
                })?;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn column_order_is_fixed() {
        let keys: Vec<FieldKey> = FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                FieldKey::Name,
                FieldKey::Purpose,
                FieldKey::CurrentRegistrar,
                FieldKey::FirstRegistered,
                FieldKey::CurrentExpiry,
                FieldKey::ExpiresIn,
                FieldKey::Released,
            ]
        );
    }

    #[test]
    fn field_lookup_matches_key() {
        for def in &FIELDS {
            assert_eq!(field(def.key).key, def.key);
        }
        assert_eq!(field(FieldKey::Released).input_kind, InputKind::Checkbox);
        assert_eq!(field(FieldKey::CurrentExpiry).input_kind, InputKind::Date);
    }

    #[test]
    fn read_only_columns_are_not_editable() {
        assert!(editable_fields().all(|f| f.key != FieldKey::ExpiresIn));
        assert_eq!(editable_fields().count(), FIELDS.len() - 1);
        assert!(ensure_writable(FieldKey::ExpiresIn).is_err());
        assert!(ensure_writable(FieldKey::Name).is_ok());
    }

    #[test]
    fn default_weight_is_uniform() {
        assert_eq!(field(FieldKey::Name).layout_weight(), DEFAULT_WEIGHT);
        assert_eq!(field(FieldKey::Purpose).layout_weight(), 5);
        assert_eq!(field(FieldKey::Released).layout_weight(), 2);
    }

    #[test]
    fn render_uses_formatter_or_raw_value() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = DomainRecord::new(
            "d1",
            "u1",
            RecordFields {
                name: Some("example.com".into()),
                current_expiry: Some("2024-01-11".into()),
                released: Some("yes".into()),
                ..RecordFields::default()
            },
        );

        assert_eq!(
            field(FieldKey::Name).render(&record, now),
            Rendered::text("example.com")
        );
        assert_eq!(field(FieldKey::Purpose).render(&record, now), Rendered::Empty);
        assert!(field(FieldKey::ExpiresIn).render(&record, now).is_warning());
        assert_eq!(
            field(FieldKey::Released).render(&record, now).visible_text(),
            crate::format::CHECK_MARK
        );
    }

    #[test]
    fn validate_checks_dates_only() {
        let mut fields = RecordFields {
            name: Some("anything goes".into()),
            first_registered: Some(String::new()),
            current_expiry: Some("2025-06-30".into()),
            ..RecordFields::default()
        };
        assert!(validate(&fields).is_ok());

        fields.current_expiry = Some("30/06/2025".into());
        let err = validate(&fields).unwrap_err();
        assert!(err.to_string().contains("Current Expiry"));
    }
}
