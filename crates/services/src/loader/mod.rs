//! Question loading with a fixed fallback chain.
//!
//! Sources are tried in order: remote sheet, local file, built-in set. The
//! caller only ever sees the final list. Any failure falls through to the next
//! source; the report records why, so "not configured" can be told apart from
//! a real failure.

mod builtin;
mod file;
pub mod rows;
mod sheet;

use std::fmt;

use async_trait::async_trait;
use tracing::{info, warn};

use quiz_core::QuestionStore;
use quiz_core::model::{DataSetSource, QuestionRecord};

use crate::error::LoadError;

pub use builtin::BuiltinSource;
pub use file::FileSource;
pub use sheet::SheetSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Local,
    Builtin,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Remote => "remote sheet",
            Self::Local => "local file",
            Self::Builtin => "built-in set",
        };
        f.write_str(name)
    }
}

/// A place question records can be fetched from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Fetch the full record list.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotConfigured` when the source has no location, or
    /// any fetch/parse failure.
    async fn fetch(&self) -> Result<Vec<QuestionRecord>, LoadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotConfigured,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub kind: SourceKind,
    pub reason: SkipReason,
}

/// Which source produced the data and what was skipped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub used: SourceKind,
    pub skipped: Vec<SkippedSource>,
}

impl LoadReport {
    /// True if some configured source failed before the one used.
    #[must_use]
    pub fn had_failures(&self) -> bool {
        self.skipped
            .iter()
            .any(|s| matches!(s.reason, SkipReason::Failed(_)))
    }
}

#[derive(Debug, Clone)]
pub struct LoadedSet {
    pub records: Vec<QuestionRecord>,
    pub report: LoadReport,
}

/// Runs the fallback chain. The built-in set always terminates it.
pub struct QuestionLoader {
    sources: Vec<Box<dyn QuestionSource>>,
}

impl QuestionLoader {
    /// A loader that resolves straight to the built-in set.
    #[must_use]
    pub fn builtin_only() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Remote sheet, then local file, for the given data set.
    #[must_use]
    pub fn for_source(source: &DataSetSource, client: reqwest::Client) -> Self {
        Self::builtin_only()
            .with_source(SheetSource::new(client, source.sheet_url().cloned()))
            .with_source(FileSource::new(source.local_path().cloned()))
    }

    /// Append a source to try before the built-in set.
    #[must_use]
    pub fn with_source(mut self, source: impl QuestionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub async fn load(&self) -> LoadedSet {
        let mut skipped = Vec::new();

        for source in &self.sources {
            let kind = source.kind();
            let result = source
                .fetch()
                .await
                .and_then(|records| match QuestionStore::validate(&records) {
                    Ok(()) => Ok(records),
                    Err(e) => Err(LoadError::from(e)),
                });
            match result {
                Ok(records) => {
                    info!(source = %kind, count = records.len(), "loaded questions");
                    return LoadedSet {
                        records,
                        report: LoadReport {
                            used: kind,
                            skipped,
                        },
                    };
                }
                Err(LoadError::NotConfigured) => skipped.push(SkippedSource {
                    kind,
                    reason: SkipReason::NotConfigured,
                }),
                Err(e) => {
                    warn!(source = %kind, error = %e, "question source failed, falling back");
                    skipped.push(SkippedSource {
                        kind,
                        reason: SkipReason::Failed(e.to_string()),
                    });
                }
            }
        }

        let records = BuiltinSource::records();
        info!(count = records.len(), "using built-in questions");
        LoadedSet {
            records,
            report: LoadReport {
                used: SourceKind::Builtin,
                skipped,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(SourceKind, Result<Vec<QuestionRecord>, &'static str>);

    #[async_trait]
    impl QuestionSource for Fixed {
        fn kind(&self) -> SourceKind {
            self.0
        }

        async fn fetch(&self) -> Result<Vec<QuestionRecord>, LoadError> {
            self.1.clone().map_err(|e| LoadError::Parse(e.into()))
        }
    }

    fn one(id: u64) -> Vec<QuestionRecord> {
        vec![QuestionRecord::new(id, "Q", "A")]
    }

    #[tokio::test]
    async fn first_successful_source_wins() {
        let loader = QuestionLoader::builtin_only()
            .with_source(Fixed(SourceKind::Remote, Ok(one(1))))
            .with_source(Fixed(SourceKind::Local, Ok(one(2))));

        let loaded = loader.load().await;

        assert_eq!(loaded.report.used, SourceKind::Remote);
        assert!(loaded.report.skipped.is_empty());
        assert_eq!(loaded.records, one(1));
    }

    #[tokio::test]
    async fn failure_falls_through_to_next_source() {
        let loader = QuestionLoader::builtin_only()
            .with_source(Fixed(SourceKind::Remote, Err("offline")))
            .with_source(Fixed(SourceKind::Local, Ok(one(2))));

        let loaded = loader.load().await;

        assert_eq!(loaded.report.used, SourceKind::Local);
        assert!(loaded.report.had_failures());
        assert_eq!(loaded.records, one(2));
    }

    #[tokio::test]
    async fn invalid_data_is_treated_as_failure() {
        let duplicated = vec![
            QuestionRecord::new(1_u64, "Q", "A"),
            QuestionRecord::new(1_u64, "Q again", "A"),
        ];
        let loader = QuestionLoader::builtin_only()
            .with_source(Fixed(SourceKind::Remote, Ok(duplicated)))
            .with_source(Fixed(SourceKind::Local, Ok(Vec::new())));

        let loaded = loader.load().await;

        assert_eq!(loaded.report.used, SourceKind::Builtin);
        assert_eq!(loaded.report.skipped.len(), 2);
        assert_eq!(loaded.records, BuiltinSource::records());
    }

    #[tokio::test]
    async fn unconfigured_sources_are_reported_separately() {
        let source = DataSetSource::builtin_only("2020").unwrap();
        let loader = QuestionLoader::for_source(&source, reqwest::Client::new());

        let loaded = loader.load().await;

        assert_eq!(loaded.report.used, SourceKind::Builtin);
        assert!(!loaded.report.had_failures());
        assert_eq!(
            loaded.report.skipped,
            vec![
                SkippedSource {
                    kind: SourceKind::Remote,
                    reason: SkipReason::NotConfigured
                },
                SkippedSource {
                    kind: SourceKind::Local,
                    reason: SkipReason::NotConfigured
                },
            ]
        );
    }
}
