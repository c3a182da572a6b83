use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::model::{QuestionId, QuestionRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("data set contains no questions")]
    Empty,

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
}

/// Holds the full, unfiltered question set of the active data set.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    records: Vec<QuestionRecord>,
}

impl QuestionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored set wholesale.
    ///
    /// The store is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Empty` for an empty list and
    /// `StoreError::DuplicateId` if two records share an id.
    pub fn load(&mut self, records: Vec<QuestionRecord>) -> Result<(), StoreError> {
        Self::validate(&records)?;
        self.records = records;
        Ok(())
    }

    /// Check that `records` would be accepted by `load`.
    ///
    /// # Errors
    ///
    /// Same as `load`.
    pub fn validate(records: &[QuestionRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Err(StoreError::Empty);
        }
        let mut seen: HashSet<&QuestionId> = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id()) {
                return Err(StoreError::DuplicateId(record.id().clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn all(&self) -> &[QuestionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique non-empty categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        sorted_unique(self.records.iter().map(QuestionRecord::category))
    }

    /// Unique non-empty sub-categories under `category`, sorted.
    ///
    /// `None` (the `All` selection) spans every record.
    #[must_use]
    pub fn sub_categories_for(&self, category: Option<&str>) -> Vec<String> {
        sorted_unique(
            self.records
                .iter()
                .filter(|r| category.is_none_or(|c| r.category() == c))
                .map(QuestionRecord::sub_category),
        )
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, category: &str, sub: &str) -> QuestionRecord {
        QuestionRecord::new(id, format!("Q{id}"), format!("A{id}"))
            .with_category(category)
            .with_sub_category(sub)
    }

    fn sample() -> Vec<QuestionRecord> {
        vec![
            record(1, "Science", "Physics"),
            record(2, "History", "Wars"),
            record(3, "History", "Kings"),
            record(4, "Science", "Biology"),
            record(5, "", ""),
            record(6, "History", "Wars"),
        ]
    }

    #[test]
    fn categories_are_sorted_unique_and_skip_empty() {
        let mut store = QuestionStore::new();
        store.load(sample()).unwrap();

        assert_eq!(store.categories(), vec!["History", "Science"]);
    }

    #[test]
    fn sub_categories_follow_selected_category() {
        let mut store = QuestionStore::new();
        store.load(sample()).unwrap();

        assert_eq!(store.sub_categories_for(Some("History")), vec!["Kings", "Wars"]);
        assert_eq!(
            store.sub_categories_for(None),
            vec!["Biology", "Kings", "Physics", "Wars"]
        );
        assert!(store.sub_categories_for(Some("Art")).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected_without_mutation() {
        let mut store = QuestionStore::new();
        store.load(sample()).unwrap();

        let err = store
            .load(vec![record(9, "A", ""), record(9, "B", "")])
            .unwrap_err();

        assert_eq!(err, StoreError::DuplicateId(QuestionId::new(9)));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn empty_load_is_rejected() {
        let mut store = QuestionStore::new();
        assert_eq!(store.load(Vec::new()).unwrap_err(), StoreError::Empty);
        assert!(store.is_empty());
    }

    #[test]
    fn load_replaces_wholesale() {
        let mut store = QuestionStore::new();
        store.load(sample()).unwrap();
        store.load(vec![record(100, "Art", "")]).unwrap();

        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id(), &QuestionId::new(100));
    }
}
