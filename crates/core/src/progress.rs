use std::collections::BTreeSet;

use crate::model::{BookmarkError, BookmarkExport, QuestionId, QuestionRecord};

/// Aggregated completion numbers for a view, useful for UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    pub answered: usize,
    pub percent: u32,
}

impl ProgressStats {
    /// Build stats, rounding the percentage half up. An empty view is 0%.
    #[must_use]
    pub fn new(total: usize, answered: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            let scaled = (answered.saturating_mul(200) + total) / (2 * total);
            u32::try_from(scaled).unwrap_or(u32::MAX)
        };
        Self {
            total,
            answered,
            percent,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered >= self.total
    }
}

/// Tracks answered and bookmarked question ids for the active data set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    answered: BTreeSet<QuestionId>,
    bookmarked: BTreeSet<QuestionId>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` answered. Returns true if it was not answered before.
    pub fn mark_answered(&mut self, id: &QuestionId) -> bool {
        if self.answered.contains(id) {
            return false;
        }
        self.answered.insert(id.clone())
    }

    /// Flip bookmark membership and return the new membership.
    pub fn toggle_bookmark(&mut self, id: &QuestionId) -> bool {
        if self.bookmarked.remove(id) {
            false
        } else {
            self.bookmarked.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.answered.contains(id)
    }

    #[must_use]
    pub fn is_bookmarked(&self, id: &QuestionId) -> bool {
        self.bookmarked.contains(id)
    }

    #[must_use]
    pub fn answered_ids(&self) -> &BTreeSet<QuestionId> {
        &self.answered
    }

    #[must_use]
    pub fn bookmarked_ids(&self) -> &BTreeSet<QuestionId> {
        &self.bookmarked
    }

    /// Completion numbers over `view`; answered ids outside the view don't count.
    #[must_use]
    pub fn stats(&self, view: &[QuestionRecord]) -> ProgressStats {
        let answered = view.iter().filter(|r| self.is_answered(r.id())).count();
        ProgressStats::new(view.len(), answered)
    }

    /// Clear answered ids; bookmarks are kept.
    pub fn reset_progress(&mut self) {
        self.answered.clear();
    }

    /// Clear bookmarks; answered ids are kept.
    pub fn reset_bookmarks(&mut self) {
        self.bookmarked.clear();
    }

    /// Replace the bookmark set, e.g. after reading it from persistence.
    pub fn replace_bookmarks(&mut self, ids: impl IntoIterator<Item = QuestionId>) {
        self.bookmarked = ids.into_iter().collect();
    }

    /// Merge an exported bookmark file into the current bookmarks.
    ///
    /// Returns how many ids were newly added.
    ///
    /// # Errors
    ///
    /// Returns `BookmarkError::SetMismatch` without mutating anything if the
    /// export belongs to a different data set than `active_set`.
    pub fn import_bookmarks(
        &mut self,
        export: &BookmarkExport,
        active_set: &str,
    ) -> Result<usize, BookmarkError> {
        export.ensure_set(active_set)?;
        let before = self.bookmarked.len();
        self.bookmarked.extend(export.bookmarks().iter().cloned());
        Ok(self.bookmarked.len() - before)
    }

    #[must_use]
    pub fn export_bookmarks(&self, set_name: &str) -> BookmarkExport {
        BookmarkExport::new(set_name, self.bookmarked.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(ids: &[u64]) -> Vec<QuestionRecord> {
        ids.iter()
            .map(|&id| QuestionRecord::new(id, "Q", "A"))
            .collect()
    }

    #[test]
    fn mark_answered_is_idempotent() {
        let mut progress = ProgressTracker::new();
        assert!(progress.mark_answered(&QuestionId::new(1)));
        assert!(!progress.mark_answered(&QuestionId::new(1)));
        assert_eq!(progress.answered_ids().len(), 1);
    }

    #[test]
    fn toggle_bookmark_is_its_own_inverse() {
        let mut progress = ProgressTracker::new();
        let id = QuestionId::new(3);

        assert!(progress.toggle_bookmark(&id));
        assert!(progress.is_bookmarked(&id));
        assert!(!progress.toggle_bookmark(&id));
        assert!(!progress.is_bookmarked(&id));
    }

    #[test]
    fn stats_count_only_view_members() {
        let mut progress = ProgressTracker::new();
        for id in [1, 2, 99] {
            progress.mark_answered(&QuestionId::new(id));
        }

        let stats = progress.stats(&view(&[1, 2, 3]));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.answered, 2);
        assert_eq!(stats.percent, 67);
        assert_eq!(stats.remaining(), 1);
    }

    #[test]
    fn percent_rounds_half_up_and_handles_empty() {
        assert_eq!(ProgressStats::new(0, 0).percent, 0);
        assert_eq!(ProgressStats::new(8, 1).percent, 13);
        assert_eq!(ProgressStats::new(3, 1).percent, 33);
        assert_eq!(ProgressStats::new(2, 2).percent, 100);
        assert!(ProgressStats::new(2, 2).is_complete());
    }

    #[test]
    fn resets_touch_one_slice_each() {
        let mut progress = ProgressTracker::new();
        progress.mark_answered(&QuestionId::new(1));
        progress.toggle_bookmark(&QuestionId::new(2));

        progress.reset_progress();
        assert!(progress.answered_ids().is_empty());
        assert!(progress.is_bookmarked(&QuestionId::new(2)));

        progress.mark_answered(&QuestionId::new(1));
        progress.reset_bookmarks();
        assert!(progress.bookmarked_ids().is_empty());
        assert!(progress.is_answered(&QuestionId::new(1)));
    }

    #[test]
    fn import_merges_matching_set() {
        let mut progress = ProgressTracker::new();
        progress.toggle_bookmark(&QuestionId::new(2));
        let export = BookmarkExport::new("2020", [QuestionId::new(2), QuestionId::new(5)]);

        let added = progress.import_bookmarks(&export, "2020").unwrap();

        assert_eq!(added, 1);
        assert!(progress.is_bookmarked(&QuestionId::new(5)));
    }

    #[test]
    fn import_with_other_set_leaves_bookmarks_unchanged() {
        let mut progress = ProgressTracker::new();
        progress.toggle_bookmark(&QuestionId::new(1));
        let before = progress.clone();
        let export = BookmarkExport::from_json(r#"{"set":"2008","bookmarks":[2,5]}"#).unwrap();

        let err = progress.import_bookmarks(&export, "2020").unwrap_err();

        assert!(matches!(err, BookmarkError::SetMismatch { .. }));
        assert_eq!(progress, before);
    }
}
