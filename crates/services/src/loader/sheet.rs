use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use quiz_core::model::QuestionRecord;

use super::rows::{SheetPayload, records_from_payload};
use super::{QuestionSource, SourceKind};
use crate::error::LoadError;

/// Primary source: a published spreadsheet reachable over HTTP.
#[derive(Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    url: Option<Url>,
}

impl SheetSource {
    #[must_use]
    pub fn new(client: reqwest::Client, url: Option<Url>) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl QuestionSource for SheetSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn fetch(&self) -> Result<Vec<QuestionRecord>, LoadError> {
        let Some(url) = self.url.as_ref() else {
            return Err(LoadError::NotConfigured);
        };
        debug!(%url, "fetching sheet");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus(status));
        }
        let payload: SheetPayload = response.json().await?;
        records_from_payload(payload)
    }
}
