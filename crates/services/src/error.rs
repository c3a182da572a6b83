//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::StoreError;
use quiz_core::model::{BookmarkError, FilterError};

/// Errors emitted by question sources while loading a data set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("source is not configured")]
    NotConfigured,
    #[error("source returned no usable questions")]
    NoQuestions,
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not parse question data: {0}")]
    Parse(String),
    #[error(transparent)]
    InvalidData(#[from] StoreError),
}

/// Errors emitted by session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidData(#[from] StoreError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
    #[error("load {ticket} was superseded by load {latest}")]
    StaleLoad { ticket: u64, latest: u64 },
    #[error("no data set is loaded")]
    NoDataSet,
}

/// Errors emitted by a speech engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech engine failed: {0}")]
    Engine(String),
}
