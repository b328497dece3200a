//! Reader-side view of the widget bridge file.
//!
//! The home-screen renderer lives in another process and must never
//! crash on whatever it finds in the bridge file, so fields are
//! extracted one by one and each missing field simply omits the
//! corresponding display element.

use std::path::Path;

use url::Url;

use crate::error::{CoreError, Result};

/// What the widget surface has to work with. Every field is optional;
/// an all-`None` snapshot renders the no-data placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub quote_id: Option<String>,
    pub text: Option<String>,
    pub author: Option<String>,
    pub updated_at: Option<String>,
}

impl WidgetSnapshot {
    /// Field-by-field extraction from the raw bridge file contents.
    /// Anything unparsable yields an empty snapshot.
    pub fn parse(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let field = |key: &str| value.get(key).and_then(|v| v.as_str()).map(String::from);
        Self {
            quote_id: field("id"),
            text: field("text"),
            author: field("author"),
            updated_at: field("updatedAt"),
        }
    }

    /// Read and parse the bridge file; missing file means placeholder.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::default(),
        }
    }

    /// True when there is nothing to display but the placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.text.is_none() && self.author.is_none()
    }

    /// Quote line as the widget shows it, quotation marks included.
    pub fn display_text(&self) -> Option<String> {
        self.text.as_ref().map(|t| format!("\"{t}\""))
    }

    /// Attribution line as the widget shows it.
    pub fn display_author(&self) -> Option<String> {
        self.author.as_ref().map(|a| format!("— {a}"))
    }
}

/// Deep link for the widget tap action: `{scheme}://quote/{quote_id}`.
/// The host OS routes it to the quote detail view.
pub fn deep_link_uri(scheme: &str, quote_id: &str) -> Result<Url> {
    Url::parse(&format!("{scheme}://quote/{quote_id}"))
        .map_err(|e| CoreError::Persistence(format!("invalid deep link: {e}")))
}
