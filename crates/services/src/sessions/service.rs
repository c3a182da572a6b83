use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use quiz_core::model::{BookmarkExport, FilterChange, FilterConfig, QuestionId, QuestionRecord};
use quiz_core::{
    FilterEngine, NavigationController, NavigationStep, ProgressStats, ProgressTracker,
    QuestionStore,
};
use storage::repository::{BookmarkStore, InMemoryStore};

use super::view::{CurrentQuestion, FilterOptions, SessionObserver, SessionSnapshot};
use crate::error::SessionError;

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// Policy knobs for a study session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Turn shuffle off whenever a data set is (re)loaded.
    pub reset_shuffle_on_load: bool,
}

/// Identifies one in-flight data-set load.
///
/// Only the ticket handed out last can commit; older ones are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The question-session state machine.
///
/// Owns the loaded set, the filter configuration, progress, the filtered view
/// and navigation over it. Every mutation runs to completion and then notifies
/// the observer with a fresh snapshot.
pub struct StudySession {
    options: SessionOptions,
    set_name: Option<String>,
    store: QuestionStore,
    config: FilterConfig,
    progress: ProgressTracker,
    view: Vec<QuestionRecord>,
    nav: NavigationController,
    bookmarks: Arc<dyn BookmarkStore>,
    observer: Option<Box<dyn SessionObserver>>,
    rng: StdRng,
    load_generation: u64,
}

impl StudySession {
    #[must_use]
    pub fn new(bookmarks: Arc<dyn BookmarkStore>) -> Self {
        Self {
            options: SessionOptions::default(),
            set_name: None,
            store: QuestionStore::new(),
            config: FilterConfig::new(),
            progress: ProgressTracker::new(),
            view: Vec::new(),
            nav: NavigationController::new(),
            bookmarks,
            observer: None,
            rng: StdRng::from_os_rng(),
            load_generation: 0,
        }
    }

    /// A session whose bookmarks live only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Use a deterministic random source for shuffling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_observer(&mut self, observer: impl SessionObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // ─── LOADING ───────────────────────────────────────────────────────────────

    /// Replace the active data set.
    ///
    /// Supersedes any load started with `begin_load`, unless the records are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidData` for an empty or duplicate-id list;
    /// the session, including pending load tickets, is left untouched.
    pub fn load_data_set(
        &mut self,
        records: Vec<QuestionRecord>,
        set_name: impl Into<String>,
    ) -> Result<(), SessionError> {
        QuestionStore::validate(&records)?;
        let ticket = self.begin_load();
        self.finish_load(ticket, records, set_name)
    }

    /// Start a load whose records arrive later.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        debug!(generation = self.load_generation, "load started");
        LoadTicket(self.load_generation)
    }

    /// Commit the records of a load started with `begin_load`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleLoad` if a newer load has started since
    /// `ticket` was issued, and `SessionError::InvalidData` for an unusable
    /// record list. Nothing is mutated on error.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        records: Vec<QuestionRecord>,
        set_name: impl Into<String>,
    ) -> Result<(), SessionError> {
        if ticket.0 != self.load_generation {
            warn!(ticket = ticket.0, latest = self.load_generation, "dropping stale load");
            return Err(SessionError::StaleLoad {
                ticket: ticket.0,
                latest: self.load_generation,
            });
        }

        self.store.load(records)?;
        let set_name = set_name.into();

        self.progress.reset_progress();
        let saved = self.bookmarks.load_bookmarks(&set_name).unwrap_or_else(|e| {
            warn!(set = %set_name, error = %e, "could not read bookmarks, starting empty");
            Vec::new()
        });
        self.progress.replace_bookmarks(saved);
        self.config.reset(!self.options.reset_shuffle_on_load);

        info!(
            set = %set_name,
            questions = self.store.len(),
            bookmarks = self.progress.bookmarked_ids().len(),
            "data set loaded"
        );
        self.set_name = Some(set_name);
        self.refresh_view(None);
        self.notify();
        Ok(())
    }

    // ─── FILTERING ─────────────────────────────────────────────────────────────

    /// Apply one filter change and rebuild the view.
    ///
    /// The current question stays current if it survives the change.
    pub fn change_filter(&mut self, change: FilterChange) {
        debug!(dimension = %change.dimension(), "filter changed");
        let keep = self.current_id();
        self.config.apply(change);
        self.refresh_view(keep.as_ref());
        self.notify();
    }

    /// `change_filter` from a dimension name and display value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Filter` for an unknown dimension or value; the
    /// session is left untouched.
    pub fn change_filter_text(&mut self, dimension: &str, value: &str) -> Result<(), SessionError> {
        let change = FilterChange::parse(dimension, value)?;
        self.change_filter(change);
        Ok(())
    }

    // ─── NAVIGATION ────────────────────────────────────────────────────────────

    /// Reveal the current answer, or move on once it is revealed.
    pub fn reveal_or_advance(&mut self) -> NavigationStep {
        let step = self.nav.reveal_or_advance(
            &self.view,
            self.progress.answered_ids(),
            self.config.shuffle_unasked(),
            &mut self.rng,
        );
        if let NavigationStep::Revealed { id, .. } = &step {
            self.progress.mark_answered(id);
        }
        if step != NavigationStep::Idle {
            self.notify();
        }
        step
    }

    /// Step back. As with `NavigationController::go_back`, the next
    /// `reveal_or_advance` reveals the restored item and the one after replays.
    pub fn go_back(&mut self) -> NavigationStep {
        let step = self.nav.go_back();
        if step != NavigationStep::Idle {
            self.notify();
        }
        step
    }

    // ─── BOOKMARKS ─────────────────────────────────────────────────────────────

    /// Flip the bookmark on the current question.
    ///
    /// Returns the new membership, or `None` when the view is empty.
    pub fn toggle_bookmark(&mut self) -> Option<bool> {
        let id = self.current_id()?;
        let bookmarked = self.progress.toggle_bookmark(&id);
        debug!(%id, bookmarked, "bookmark toggled");
        self.persist_bookmarks();
        if self.config.bookmarked_only() {
            self.refresh_view(Some(&id));
        }
        self.notify();
        Some(bookmarked)
    }

    /// Merge bookmarks from an export file into the active set.
    ///
    /// Returns how many ids were newly bookmarked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoDataSet` before any load,
    /// `SessionError::Bookmark` for malformed text or a set-name mismatch.
    /// Nothing is mutated on error.
    pub fn import_bookmarks(&mut self, text: &str) -> Result<usize, SessionError> {
        let set_name = self.set_name.clone().ok_or(SessionError::NoDataSet)?;
        let added = BookmarkExport::from_json(text)
            .and_then(|export| self.progress.import_bookmarks(&export, &set_name))
            .inspect_err(|e| warn!(set = %set_name, error = %e, "bookmark import rejected"))?;
        info!(set = %set_name, added, "bookmarks imported");
        self.persist_bookmarks();
        if self.config.bookmarked_only() {
            let keep = self.current_id();
            self.refresh_view(keep.as_ref());
        }
        self.notify();
        Ok(added)
    }

    /// Serialize the active set's bookmarks as an export file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoDataSet` before any load.
    pub fn export_bookmarks(&self) -> Result<String, SessionError> {
        let set_name = self.set_name.as_deref().ok_or(SessionError::NoDataSet)?;
        Ok(self.progress.export_bookmarks(set_name).to_json()?)
    }

    // ─── RESETS ────────────────────────────────────────────────────────────────

    /// Clear filters, progress and bookmarks and start over from the first question.
    pub fn reset_all(&mut self) {
        self.config.reset(false);
        self.progress.reset_progress();
        self.progress.reset_bookmarks();
        self.persist_bookmarks();
        info!("session reset");
        self.refresh_view(None);
        self.notify();
    }

    /// Restore every filter dimension, including shuffle, to its default.
    pub fn reset_filters(&mut self) {
        let keep = self.current_id();
        self.config.reset(false);
        self.refresh_view(keep.as_ref());
        self.notify();
    }

    /// Forget which questions were answered. Bookmarks are kept.
    pub fn reset_progress(&mut self) {
        let keep = self.current_id();
        self.progress.reset_progress();
        self.refresh_view(keep.as_ref());
        self.notify();
    }

    /// Remove every bookmark of the active set. Answered state is kept.
    pub fn reset_bookmarks(&mut self) {
        let keep = self.current_id();
        self.progress.reset_bookmarks();
        self.persist_bookmarks();
        self.refresh_view(keep.as_ref());
        self.notify();
    }

    // ─── QUERIES ───────────────────────────────────────────────────────────────

    #[must_use]
    pub fn current_question(&self) -> CurrentQuestion {
        match (self.nav.current_index(), self.nav.current(&self.view)) {
            (Some(index), Some(record)) => CurrentQuestion::Question {
                record: record.clone(),
                index,
                revealed: self.nav.is_revealed(),
                bookmarked: self.progress.is_bookmarked(record.id()),
            },
            _ => CurrentQuestion::Empty,
        }
    }

    /// Progress over the current filtered view.
    #[must_use]
    pub fn progress_stats(&self) -> ProgressStats {
        self.progress.stats(&self.view)
    }

    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            categories: self.store.categories(),
            sub_categories: self.store.sub_categories_for(self.config.category()),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            set_name: self.set_name.clone(),
            current: self.current_question(),
            progress: self.progress_stats(),
            view_len: self.view.len(),
            can_go_back: !self.nav.back_stack().is_empty(),
        }
    }

    #[must_use]
    pub fn set_name(&self) -> Option<&str> {
        self.set_name.as_deref()
    }

    #[must_use]
    pub fn filter_config(&self) -> &FilterConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &[QuestionRecord] {
        &self.view
    }

    #[must_use]
    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    #[must_use]
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    // ─── INTERNALS ─────────────────────────────────────────────────────────────

    fn current_id(&self) -> Option<QuestionId> {
        self.nav.current(&self.view).map(|r| r.id().clone())
    }

    /// Recompute the view and re-initialize navigation, pointing at `keep`
    /// when it is still present.
    fn refresh_view(&mut self, keep: Option<&QuestionId>) {
        self.view =
            FilterEngine::new(&self.config, &self.progress).apply(self.store.all(), &mut self.rng);
        let index = keep
            .and_then(|id| self.view.iter().position(|r| r.id() == id))
            .unwrap_or(0);
        self.nav.initialize_at(self.view.len(), index);
    }

    fn persist_bookmarks(&self) {
        let Some(set_name) = self.set_name.as_deref() else {
            return;
        };
        let ids: Vec<QuestionId> = self.progress.bookmarked_ids().iter().cloned().collect();
        if let Err(e) = self.bookmarks.save_bookmarks(set_name, &ids) {
            warn!(set = %set_name, error = %e, "could not save bookmarks");
        }
    }

    fn notify(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_change(&snapshot);
        }
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("set_name", &self.set_name)
            .field("questions", &self.store.len())
            .field("view_len", &self.view.len())
            .field("config", &self.config)
            .field("nav", &self.nav)
            .field("load_generation", &self.load_generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::BookmarkError;
    use std::sync::Mutex;

    fn record(id: u64, category: &str, sub: &str) -> QuestionRecord {
        QuestionRecord::new(id, format!("Q{id}"), format!("A{id}"))
            .with_category(category)
            .with_sub_category(sub)
    }

    fn sample() -> Vec<QuestionRecord> {
        vec![
            record(1, "History", "Wars"),
            record(2, "Science", "Physics"),
            record(3, "History", "Kings"),
            record(4, "Science", "Biology"),
            record(5, "History", "Wars"),
        ]
    }

    fn loaded() -> StudySession {
        let mut session = StudySession::in_memory().with_seed(7);
        session.load_data_set(sample(), "2020").unwrap();
        session
    }

    fn current_id(session: &StudySession) -> Option<QuestionId> {
        session.current_question().record().map(|r| r.id().clone())
    }

    #[test]
    fn load_positions_on_first_question_unrevealed() {
        let session = loaded();

        let current = session.current_question();
        assert_eq!(current.record().map(QuestionRecord::id), Some(&QuestionId::new(1)));
        assert!(!current.is_revealed());
        assert_eq!(session.progress_stats(), ProgressStats::new(5, 0));
    }

    #[test]
    fn invalid_load_leaves_session_untouched() {
        let mut session = loaded();

        let err = session
            .load_data_set(vec![record(9, "A", ""), record(9, "B", "")], "other")
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidData(_)));
        assert_eq!(session.set_name(), Some("2020"));
        assert_eq!(session.view().len(), 5);
    }

    #[test]
    fn reveal_marks_answered_and_counts_in_stats() {
        let mut session = loaded();

        let step = session.reveal_or_advance();

        assert!(matches!(step, NavigationStep::Revealed { index: 0, .. }));
        assert!(session.current_question().is_revealed());
        assert_eq!(session.progress_stats().answered, 1);
        assert_eq!(session.progress_stats().percent, 20);
    }

    #[test]
    fn replay_after_going_back_takes_two_steps() {
        let mut session = loaded();
        session.reveal_or_advance();
        session.reveal_or_advance();
        assert_eq!(current_id(&session), Some(QuestionId::new(2)));

        assert_eq!(
            session.go_back(),
            NavigationStep::WentBack { from: 1, to: 0 }
        );
        assert!(!session.current_question().is_revealed());

        assert!(matches!(
            session.reveal_or_advance(),
            NavigationStep::Revealed { index: 0, .. }
        ));
        assert_eq!(
            session.reveal_or_advance(),
            NavigationStep::Replayed { from: 0, to: 1 }
        );
        assert_eq!(current_id(&session), Some(QuestionId::new(2)));
    }

    #[test]
    fn filter_change_keeps_current_question_when_present() {
        let mut session = loaded();
        session.reveal_or_advance();
        session.reveal_or_advance();
        session.reveal_or_advance();
        session.reveal_or_advance();
        assert_eq!(current_id(&session), Some(QuestionId::new(3)));

        session.change_filter(FilterChange::Category(Some("History".into())));

        assert_eq!(session.view().len(), 3);
        assert_eq!(current_id(&session), Some(QuestionId::new(3)));
        assert!(!session.current_question().is_revealed());
    }

    #[test]
    fn filter_change_falls_back_to_first_when_current_drops_out() {
        let mut session = loaded();
        session.reveal_or_advance();
        session.reveal_or_advance();
        assert_eq!(current_id(&session), Some(QuestionId::new(2)));

        session.change_filter(FilterChange::Category(Some("History".into())));

        assert_eq!(current_id(&session), Some(QuestionId::new(1)));
    }

    #[test]
    fn category_change_resets_sub_category() {
        let mut session = loaded();
        session.change_filter_text("category", "History").unwrap();
        session.change_filter_text("subCategory", "Kings").unwrap();
        assert_eq!(session.view().len(), 1);

        session.change_filter_text("category", "Science").unwrap();

        assert_eq!(session.filter_config().sub_category(), None);
        assert_eq!(session.view().len(), 2);
    }

    #[test]
    fn unknown_filter_dimension_is_rejected() {
        let mut session = loaded();

        let err = session.change_filter_text("colour", "red").unwrap_err();

        assert!(matches!(err, SessionError::Filter(_)));
        assert!(session.filter_config().selects_all());
    }

    #[test]
    fn empty_view_is_renderable_and_inert() {
        let mut session = loaded();
        session.change_filter(FilterChange::BookmarkedOnly(true));

        assert_eq!(session.current_question(), CurrentQuestion::Empty);
        assert_eq!(session.reveal_or_advance(), NavigationStep::Idle);
        assert_eq!(session.go_back(), NavigationStep::Idle);
        assert_eq!(session.toggle_bookmark(), None);
        assert_eq!(session.progress_stats(), ProgressStats::new(0, 0));
    }

    #[test]
    fn unbookmarking_under_bookmark_filter_drops_current_question() {
        let mut session = loaded();
        assert_eq!(session.toggle_bookmark(), Some(true));
        session.change_filter(FilterChange::BookmarkedOnly(true));
        assert_eq!(session.view().len(), 1);

        assert_eq!(session.toggle_bookmark(), Some(false));

        assert!(session.view().is_empty());
        assert_eq!(session.current_question(), CurrentQuestion::Empty);
    }

    #[test]
    fn bookmarks_persist_across_reloads_of_same_set() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = StudySession::new(store.clone()).with_seed(1);
        session.load_data_set(sample(), "2020").unwrap();
        session.toggle_bookmark();

        session.load_data_set(sample(), "2008").unwrap();
        assert!(session.progress().bookmarked_ids().is_empty());

        session.load_data_set(sample(), "2020").unwrap();
        assert!(session.progress().is_bookmarked(&QuestionId::new(1)));
        assert_eq!(store.load_bookmarks("2020").unwrap(), vec![QuestionId::new(1)]);
    }

    #[test]
    fn reload_clears_answered_but_keeps_shuffle_by_default() {
        let mut session = loaded();
        session.change_filter(FilterChange::ShuffleUnasked(true));
        session.change_filter(FilterChange::Category(Some("Science".into())));
        session.reveal_or_advance();

        session.load_data_set(sample(), "2020").unwrap();

        assert!(session.progress().answered_ids().is_empty());
        assert!(session.filter_config().shuffle_unasked());
        assert_eq!(session.filter_config().category(), None);
    }

    #[test]
    fn reload_can_reset_shuffle() {
        let mut session = StudySession::in_memory().with_options(SessionOptions {
            reset_shuffle_on_load: true,
        });
        session.load_data_set(sample(), "2020").unwrap();
        session.change_filter(FilterChange::ShuffleUnasked(true));

        session.load_data_set(sample(), "2020").unwrap();

        assert!(!session.filter_config().shuffle_unasked());
    }

    #[test]
    fn stale_ticket_cannot_commit() {
        let mut session = StudySession::in_memory();
        let first = session.begin_load();
        let second = session.begin_load();

        session
            .finish_load(second, vec![record(10, "Art", "")], "second")
            .unwrap();
        let err = session.finish_load(first, sample(), "first").unwrap_err();

        assert!(matches!(err, SessionError::StaleLoad { ticket: 1, latest: 2 }));
        assert_eq!(session.set_name(), Some("second"));
        assert_eq!(session.view().len(), 1);
    }

    #[test]
    fn rejected_load_does_not_supersede_pending_load() {
        let mut session = StudySession::in_memory();
        let pending = session.begin_load();

        let err = session.load_data_set(Vec::new(), "typo").unwrap_err();
        assert!(matches!(err, SessionError::InvalidData(_)));

        session.finish_load(pending, sample(), "2020").unwrap();
        assert_eq!(session.set_name(), Some("2020"));
        assert_eq!(session.view().len(), 5);
    }

    #[test]
    fn import_with_other_set_name_is_rejected_without_mutation() {
        let mut session = loaded();
        session.toggle_bookmark();

        let err = session
            .import_bookmarks(r#"{"set":"2008","bookmarks":[2,5]}"#)
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Bookmark(BookmarkError::SetMismatch { .. })
        ));
        assert_eq!(session.progress().bookmarked_ids().len(), 1);
    }

    #[test]
    fn import_merges_and_export_round_trips() {
        let mut session = loaded();
        session.toggle_bookmark();

        let added = session
            .import_bookmarks(r#"{"set":"2020","bookmarks":[1,4]}"#)
            .unwrap();
        assert_eq!(added, 1);

        let exported = BookmarkExport::from_json(&session.export_bookmarks().unwrap()).unwrap();
        assert_eq!(exported.set_name(), "2020");
        assert_eq!(exported.bookmarks(), &[QuestionId::new(1), QuestionId::new(4)]);
    }

    #[test]
    fn import_before_load_fails() {
        let mut session = StudySession::in_memory();

        let err = session
            .import_bookmarks(r#"{"set":"2020","bookmarks":[1]}"#)
            .unwrap_err();

        assert!(matches!(err, SessionError::NoDataSet));
    }

    #[test]
    fn reset_progress_keeps_bookmarks() {
        let mut session = loaded();
        session.toggle_bookmark();
        session.reveal_or_advance();

        session.reset_progress();

        assert!(session.progress().answered_ids().is_empty());
        assert!(session.progress().is_bookmarked(&QuestionId::new(1)));
    }

    #[test]
    fn reset_bookmarks_keeps_progress() {
        let mut session = loaded();
        session.toggle_bookmark();
        session.reveal_or_advance();

        session.reset_bookmarks();

        assert!(session.progress().bookmarked_ids().is_empty());
        assert_eq!(session.progress_stats().answered, 1);
    }

    #[test]
    fn reset_filters_restores_full_view_and_shuffle() {
        let mut session = loaded();
        session.change_filter(FilterChange::ShuffleUnasked(true));
        session.change_filter(FilterChange::Category(Some("Science".into())));

        session.reset_filters();

        assert!(session.filter_config().selects_all());
        assert!(!session.filter_config().shuffle_unasked());
        assert_eq!(session.view(), sample().as_slice());
    }

    #[test]
    fn reset_all_starts_over() {
        let mut session = loaded();
        session.toggle_bookmark();
        session.reveal_or_advance();
        session.reveal_or_advance();
        session.change_filter(FilterChange::AsteriskOnly(true));

        session.reset_all();

        assert!(session.filter_config().selects_all());
        assert!(session.progress().answered_ids().is_empty());
        assert!(session.progress().bookmarked_ids().is_empty());
        assert_eq!(current_id(&session), Some(QuestionId::new(1)));
    }

    #[test]
    fn filter_options_follow_selected_category() {
        let mut session = loaded();
        session.change_filter(FilterChange::Category(Some("History".into())));

        let options = session.filter_options();

        assert_eq!(options.categories, vec!["History", "Science"]);
        assert_eq!(options.sub_categories, vec!["Kings", "Wars"]);
    }

    #[test]
    fn observer_sees_every_mutation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut session = StudySession::in_memory();
        session.set_observer(move |snapshot: &SessionSnapshot| {
            sink.lock().unwrap().push(snapshot.clone());
        });

        session.load_data_set(sample(), "2020").unwrap();
        session.reveal_or_advance();
        session.toggle_bookmark();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[1].current.is_revealed());
        assert!(seen[2].current.is_bookmarked());
        assert_eq!(seen[2].set_name.as_deref(), Some("2020"));
    }
}
