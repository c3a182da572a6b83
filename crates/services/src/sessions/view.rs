use quiz_core::ProgressStats;
use quiz_core::model::QuestionRecord;

/// What the renderer should show for the current position.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - markup in question/answer is passed through untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentQuestion {
    /// The filtered view is empty.
    Empty,
    Question {
        record: QuestionRecord,
        index: usize,
        revealed: bool,
        bookmarked: bool,
    },
}

impl CurrentQuestion {
    #[must_use]
    pub fn record(&self) -> Option<&QuestionRecord> {
        match self {
            Self::Empty => None,
            Self::Question { record, .. } => Some(record),
        }
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Question { revealed: true, .. })
    }

    #[must_use]
    pub fn is_bookmarked(&self) -> bool {
        matches!(self, Self::Question { bookmarked: true, .. })
    }
}

/// Options for the category and sub-category pickers.
///
/// `sub_categories` is scoped to the selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
}

/// Everything a renderer needs after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub set_name: Option<String>,
    pub current: CurrentQuestion,
    pub progress: ProgressStats,
    pub view_len: usize,
    pub can_go_back: bool,
}

/// Receives a snapshot after every state-mutating session operation.
pub trait SessionObserver: Send {
    fn on_change(&mut self, snapshot: &SessionSnapshot);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionSnapshot) + Send,
{
    fn on_change(&mut self, snapshot: &SessionSnapshot) {
        self(snapshot);
    }
}
