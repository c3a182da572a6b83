use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BookmarkError {
    #[error("bookmarks belong to set {found:?}, but the active set is {expected:?}")]
    SetMismatch { expected: String, found: String },

    #[error("invalid bookmark file: {0}")]
    Format(String),
}

/// Portable bookmark file: `{ "set": <name>, "bookmarks": [ids] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookmarkExport {
    #[serde(rename = "set")]
    set_name: String,
    bookmarks: Vec<QuestionId>,
}

impl BookmarkExport {
    #[must_use]
    pub fn new(set_name: impl Into<String>, bookmarks: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            set_name: set_name.into(),
            bookmarks: bookmarks.into_iter().collect(),
        }
    }

    /// Parse and validate an exported bookmark file.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::Format` if the text is not an object with a
    /// non-empty `set` string and a `bookmarks` id array.
    pub fn from_json(text: &str) -> Result<Self, BookmarkError> {
        let export: Self =
            serde_json::from_str(text).map_err(|e| BookmarkError::Format(e.to_string()))?;
        if export.set_name.trim().is_empty() {
            return Err(BookmarkError::Format("set name is empty".into()));
        }
        Ok(export)
    }

    /// Serialize to the portable text form.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::Format` if serialization fails.
    pub fn to_json(&self) -> Result<String, BookmarkError> {
        serde_json::to_string_pretty(self).map_err(|e| BookmarkError::Format(e.to_string()))
    }

    /// Fails with `SetMismatch` unless this export belongs to `active_set`.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::SetMismatch` when the set names differ.
    pub fn ensure_set(&self, active_set: &str) -> Result<(), BookmarkError> {
        if self.set_name == active_set {
            Ok(())
        } else {
            Err(BookmarkError::SetMismatch {
                expected: active_set.to_owned(),
                found: self.set_name.clone(),
            })
        }
    }

    #[must_use]
    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    #[must_use]
    pub fn bookmarks(&self) -> &[QuestionId] {
        &self.bookmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_id_kinds() {
        let export = BookmarkExport::from_json(r#"{"set":"2020","bookmarks":[2,"5","q-9"]}"#)
            .unwrap();

        assert_eq!(export.set_name(), "2020");
        assert_eq!(
            export.bookmarks(),
            &[
                QuestionId::new(2),
                QuestionId::new(5),
                QuestionId::Text("q-9".into())
            ]
        );
    }

    #[test]
    fn rejects_wrong_shape() {
        for text in [
            "[]",
            r#"{"set":"2020"}"#,
            r#"{"set":2020,"bookmarks":[]}"#,
            r#"{"set":"2020","bookmarks":{}}"#,
            r#"{"set":" ","bookmarks":[]}"#,
            "not json",
        ] {
            let err = BookmarkExport::from_json(text).unwrap_err();
            assert!(matches!(err, BookmarkError::Format(_)), "accepted {text}");
        }
    }

    #[test]
    fn ensure_set_reports_both_names() {
        let export = BookmarkExport::new("2008", [QuestionId::new(2)]);
        let err = export.ensure_set("2020").unwrap_err();

        assert_eq!(
            err,
            BookmarkError::SetMismatch {
                expected: "2020".into(),
                found: "2008".into()
            }
        );
    }

    #[test]
    fn written_file_uses_set_key() {
        let json = BookmarkExport::new("2020", [QuestionId::new(1)])
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["set"], "2020");
        assert_eq!(value["bookmarks"], serde_json::json!([1]));
    }
}
