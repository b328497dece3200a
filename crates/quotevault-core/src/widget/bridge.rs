//! File-based hand-off between the app and the home-screen widget.
//!
//! The main process is the only writer; the widget renderer runs in a
//! different process and polls the file. There is no synchronization
//! primitive between the two beyond atomic file replacement: the record
//! is written to a temporary path in the same directory and renamed over
//! the well-known file, so the reader never observes a torn write.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::quote::Quote;
use crate::storage::data_dir;

/// Well-known file name of the bridge record under the data directory.
pub const WIDGET_DATA_FILE: &str = "widget_quote.json";

/// The persisted widget record. A single instance, fully replaced on
/// every publish; never versioned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeaturedQuoteRecord {
    pub id: String,
    pub text: String,
    pub author: String,
    /// ISO-8601 timestamp of the last publish.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    /// In-app route to the quote detail view, e.g. `/quote/{id}`.
    #[serde(rename = "deepLink")]
    pub deep_link: String,
}

/// Writer/reader for the widget bridge file.
pub struct WidgetDataBridge {
    path: PathBuf,
}

impl WidgetDataBridge {
    /// Bridge over the default well-known location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(data_dir()?.join(WIDGET_DATA_FILE)))
    }

    /// Bridge over an explicit path (tests, alternate data dirs).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Publish the featured quote, fully overwriting any prior record.
    ///
    /// Write failures are non-fatal to the application: the caller logs
    /// and continues without a widget update, leaving whatever record
    /// was previously visible to the renderer intact.
    pub fn publish(&self, quote: &Quote) -> Result<FeaturedQuoteRecord> {
        let record = FeaturedQuoteRecord {
            id: quote.id.clone(),
            text: quote.content.clone(),
            author: quote.author.clone(),
            updated_at: Utc::now().to_rfc3339(),
            deep_link: format!("/quote/{}", quote.id),
        };

        let json = serde_json::to_string(&record)?;

        // Write-to-temp-then-rename keeps the record atomic from the
        // out-of-process reader's point of view.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes())
            .map_err(|e| CoreError::Persistence(format!("widget bridge write: {e}")))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| CoreError::Persistence(format!("widget bridge rename: {e}")))?;

        Ok(record)
    }

    /// The last-published record, or `None` if nothing was published yet
    /// or the file is corrupt. Never fails: the widget surface renders a
    /// placeholder on `None`.
    pub fn read(&self) -> Option<FeaturedQuoteRecord> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("ignoring unreadable widget record: {e}");
                None
            }
        }
    }

    /// Remove the bridge file. Missing file is a no-op.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Persistence(format!("widget bridge clear: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_quote() -> Quote {
        Quote {
            id: "q-42".into(),
            content: "The secret of getting ahead is getting started.".into(),
            author: "Mark Twain".into(),
            category_id: Some("cat-1".into()),
            category_name: Some("Motivation".into()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn read_before_any_publish_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join(WIDGET_DATA_FILE));
        assert_eq!(bridge.read(), None);
    }

    #[test]
    fn publish_then_read_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join(WIDGET_DATA_FILE));

        let quote = sample_quote();
        let published = bridge.publish(&quote).unwrap();
        let read = bridge.read().unwrap();

        assert_eq!(read, published);
        assert_eq!(read.id, "q-42");
        assert_eq!(read.text, quote.content);
        assert_eq!(read.author, "Mark Twain");
        assert_eq!(read.deep_link, "/quote/q-42");
    }

    #[test]
    fn publish_fully_replaces_prior_record() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join(WIDGET_DATA_FILE));

        bridge.publish(&sample_quote()).unwrap();
        let mut second = sample_quote();
        second.id = "q-43".into();
        second.content = "It always seems impossible until it's done.".into();
        bridge.publish(&second).unwrap();

        let read = bridge.read().unwrap();
        assert_eq!(read.id, "q-43");
        assert_eq!(read.deep_link, "/quote/q-43");
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(WIDGET_DATA_FILE);
        let bridge = WidgetDataBridge::at(&path);
        bridge.publish(&sample_quote()).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(WIDGET_DATA_FILE);
        std::fs::write(&path, b"{\"id\": \"trunc").unwrap();
        let bridge = WidgetDataBridge::at(&path);
        assert_eq!(bridge.read(), None);
    }

    #[test]
    fn write_failure_is_surfaced_not_fatal() {
        // Target a directory that does not exist.
        let bridge = WidgetDataBridge::at("/nonexistent-dir/widget_quote.json");
        assert!(matches!(
            bridge.publish(&sample_quote()),
            Err(CoreError::Persistence(_))
        ));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join(WIDGET_DATA_FILE));
        bridge.publish(&sample_quote()).unwrap();
        bridge.clear().unwrap();
        bridge.clear().unwrap();
        assert_eq!(bridge.read(), None);
    }
}
