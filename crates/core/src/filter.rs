use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::model::{FilterConfig, QuestionRecord};
use crate::progress::ProgressTracker;

/// Derives the ordered filtered view from the full question set.
///
/// Filtering is a logical AND across every active dimension and preserves the
/// source order. With `shuffle_unasked` on, unanswered records are shuffled
/// to the front and answered records follow in source order.
pub struct FilterEngine<'a> {
    config: &'a FilterConfig,
    progress: &'a ProgressTracker,
}

impl<'a> FilterEngine<'a> {
    #[must_use]
    pub fn new(config: &'a FilterConfig, progress: &'a ProgressTracker) -> Self {
        Self { config, progress }
    }

    /// Compute the view. Never fails; empty input yields an empty view.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        records: &[QuestionRecord],
        rng: &mut R,
    ) -> Vec<QuestionRecord> {
        let bookmarked = self.progress.bookmarked_ids();
        let filtered: Vec<QuestionRecord> = records
            .iter()
            .filter(|r| self.config.matches(r, bookmarked))
            .cloned()
            .collect();

        debug!(
            total = records.len(),
            kept = filtered.len(),
            shuffle = self.config.shuffle_unasked(),
            "filtered question view"
        );

        if self.config.shuffle_unasked() {
            self.shuffle_unasked(filtered, rng)
        } else {
            filtered
        }
    }

    fn shuffle_unasked<R: Rng + ?Sized>(
        &self,
        filtered: Vec<QuestionRecord>,
        rng: &mut R,
    ) -> Vec<QuestionRecord> {
        let (mut unanswered, answered): (Vec<_>, Vec<_>) = filtered
            .into_iter()
            .partition(|r| !self.progress.is_answered(r.id()));

        unanswered.as_mut_slice().shuffle(rng);
        unanswered.extend(answered);
        unanswered
    }
}
