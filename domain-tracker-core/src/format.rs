//! Display formatters
//!
//! Pure functions turning a stored value (plus its record) into something a front end can draw.
//! Nothing here reads the system clock; `now` is always passed in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::DomainRecord;
use crate::utils::date::{days_until, parse_iso_date};

/// Countdowns below this many days get the warning presentation
pub const EXPIRY_WARNING_DAYS: i64 = 28;

/// Glyph shown for released domains
pub const CHECK_MARK: &str = "✔️";

/// Presentation class attached to styled output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    Warning,
}

/// Formatter output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Rendered {
    Empty,
    Text { text: String },
    Link { text: String, href: String },
    Styled { text: String, presentation: Presentation },
}

impl Rendered {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Visible text, without link target or styling
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Text { text } | Self::Link { text, .. } | Self::Styled { text, .. } => text,
        }
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::Styled {
                presentation: Presentation::Warning,
                ..
            }
        )
    }
}

/// Links registrar URLs, showing only the host.
pub fn format_registrar(value: Option<&str>) -> Rendered {
    let Some(value) = value else {
        return Rendered::Empty;
    };
    if !has_http_scheme(value) {
        return Rendered::text(value);
    }

    match url::Url::parse(value) {
        Ok(url) => match url.host_str() {
            Some(host) => {
                let text = match url.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_string(),
                };
                Rendered::Link {
                    text,
                    href: value.to_string(),
                }
            }
            None => Rendered::text(value),
        },
        Err(e) => {
            log::debug!("registrar '{value}' looks like a URL but does not parse: {e}");
            Rendered::text(value)
        }
    }
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Countdown to `record.currentExpiry`.
///
/// The column's own value is ignored; the countdown is derived from the record.
pub fn format_expiry(_value: Option<&str>, record: &DomainRecord, now: DateTime<Utc>) -> Rendered {
    let Some(expiry) = record.fields.current_expiry.as_deref() else {
        return Rendered::Empty;
    };
    let Ok(date) = parse_iso_date(expiry) else {
        return Rendered::Empty;
    };

    let days = days_until(date, now);
    if days >= 0 {
        let text = format!("Expires in {days} days");
        if days < EXPIRY_WARNING_DAYS {
            Rendered::Styled {
                text,
                presentation: Presentation::Warning,
            }
        } else {
            Rendered::Text { text }
        }
    } else {
        Rendered::text(format!("Expired {} days ago", -days))
    }
}

/// Check mark for `"yes"`, nothing otherwise.
pub fn format_released(value: Option<&str>) -> Rendered {
    if value == Some("yes") {
        Rendered::text(CHECK_MARK)
    } else {
        Rendered::Empty
    }
}
