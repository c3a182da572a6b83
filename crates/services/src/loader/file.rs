use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use quiz_core::model::QuestionRecord;

use super::rows::records_from_json;
use super::{QuestionSource, SourceKind};
use crate::error::LoadError;

/// Secondary source: a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Option<PathBuf>,
}

impl FileSource {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    async fn fetch(&self) -> Result<Vec<QuestionRecord>, LoadError> {
        let Some(path) = self.path.as_ref() else {
            return Err(LoadError::NotConfigured);
        };
        debug!(path = %path.display(), "reading question file");
        let text = tokio::fs::read_to_string(path).await?;
        records_from_json(&text)
    }
}
