use std::sync::Arc;

use tracing::{info, warn};

use quiz_core::model::DataSetSource;
use storage::repository::SessionPreferences;

use super::service::{LoadTicket, StudySession};
use crate::error::SessionError;
use crate::loader::{LoadReport, LoadedSet, QuestionLoader};

/// Orchestrates opening a data set: fetch through the fallback chain, commit
/// into the session, remember the choice.
///
/// Fetching does not borrow the session, so a caller can start a second load
/// while the first is still resolving; only the newest ticket commits.
#[derive(Clone)]
pub struct SessionLoadService {
    client: reqwest::Client,
    preferences: Arc<dyn SessionPreferences>,
}

impl SessionLoadService {
    #[must_use]
    pub fn new(client: reqwest::Client, preferences: Arc<dyn SessionPreferences>) -> Self {
        Self {
            client,
            preferences,
        }
    }

    /// The data set opened most recently, if one was remembered.
    #[must_use]
    pub fn remembered_set(&self) -> Option<String> {
        self.preferences.last_set().unwrap_or_else(|e| {
            warn!(error = %e, "could not read last data set");
            None
        })
    }

    #[must_use]
    pub fn loader_for(&self, source: &DataSetSource) -> QuestionLoader {
        QuestionLoader::for_source(source, self.client.clone())
    }

    /// Resolve the fallback chain for `source`. Never fails.
    pub async fn fetch(&self, source: &DataSetSource) -> LoadedSet {
        self.loader_for(source).load().await
    }

    /// Commit fetched records into `session` under `set_name`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleLoad` if a newer load superseded `ticket`.
    pub fn commit(
        &self,
        session: &mut StudySession,
        ticket: LoadTicket,
        loaded: LoadedSet,
        set_name: &str,
    ) -> Result<LoadReport, SessionError> {
        session.finish_load(ticket, loaded.records, set_name)?;
        if let Err(e) = self.preferences.set_last_set(set_name) {
            warn!(set = %set_name, error = %e, "could not remember data set");
        }
        info!(set = %set_name, source = %loaded.report.used, "data set opened");
        Ok(loaded.report)
    }

    /// Fetch and commit `source` in one step.
    ///
    /// # Errors
    ///
    /// Same as `commit`.
    pub async fn open(
        &self,
        session: &mut StudySession,
        source: &DataSetSource,
    ) -> Result<LoadReport, SessionError> {
        self.open_with(session, &self.loader_for(source), source.name())
            .await
    }

    /// Like `open`, with an explicit loader.
    ///
    /// # Errors
    ///
    /// Same as `commit`.
    pub async fn open_with(
        &self,
        session: &mut StudySession,
        loader: &QuestionLoader,
        set_name: &str,
    ) -> Result<LoadReport, SessionError> {
        let ticket = session.begin_load();
        let loaded = loader.load().await;
        self.commit(session, ticket, loaded, set_name)
    }
}
