use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Where a named data set can be loaded from, in fallback order.
///
/// The remote sheet is tried first, then the local file. The built-in set is
/// always available and needs no configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSetSource {
    name: String,
    sheet_url: Option<Url>,
    local_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct DataSetSourceDraft {
    pub name: String,
    pub sheet_url: Option<String>,
    pub local_path: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceConfigError {
    #[error("data set name cannot be empty")]
    EmptyName,
    #[error("invalid sheet URL: {0}")]
    InvalidSheetUrl(String),
}

impl DataSetSourceDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError` if the name is blank or the sheet URL is
    /// present but not an absolute http(s) URL.
    pub fn validate(self) -> Result<DataSetSource, SourceConfigError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(SourceConfigError::EmptyName);
        }

        let sheet_url = match normalize_optional(self.sheet_url) {
            Some(raw) => {
                let url = Url::parse(&raw)
                    .map_err(|_| SourceConfigError::InvalidSheetUrl(raw.clone()))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(SourceConfigError::InvalidSheetUrl(raw));
                }
                Some(url)
            }
            None => None,
        };
        let local_path = normalize_optional(self.local_path).map(PathBuf::from);

        Ok(DataSetSource {
            name,
            sheet_url,
            local_path,
        })
    }
}

impl DataSetSource {
    /// A source with no remote or local location; loads resolve to the built-in set.
    ///
    /// # Errors
    ///
    /// Returns `SourceConfigError::EmptyName` for a blank name.
    pub fn builtin_only(name: impl Into<String>) -> Result<Self, SourceConfigError> {
        DataSetSourceDraft::new(name).validate()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sheet_url(&self) -> Option<&Url> {
        self.sheet_url.as_ref()
    }

    #[must_use]
    pub fn local_path(&self) -> Option<&PathBuf> {
        self.local_path.as_ref()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}
