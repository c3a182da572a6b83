use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::model::{QuestionId, QuestionRecord};

/// What a navigation call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationStep {
    /// The answer of the item at `index` was revealed; the caller marks `id` answered.
    Revealed { index: usize, id: QuestionId },
    /// A step undone by `go_back` was replayed.
    Replayed { from: usize, to: usize },
    /// Moved to a fresh position.
    Advanced { from: usize, to: usize },
    /// Stepped back through history.
    WentBack { from: usize, to: usize },
    /// Nothing to do: empty view or empty history.
    Idle,
}

/// Position, reveal state and back/forward history over one filtered view.
///
/// The controller stores indices only; every call takes the view it was
/// initialized against. `revealed` is false right after any index change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationController {
    current: Option<usize>,
    revealed: bool,
    back: Vec<usize>,
    forward: Vec<usize>,
}

impl NavigationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset against a view of `len` items, positioned at the first one.
    pub fn initialize(&mut self, len: usize) {
        self.initialize_at(len, 0);
    }

    /// Reset against a view of `len` items, positioned at `index`
    /// (clamped to the first item when out of range).
    ///
    /// The starting position is seeded into the back stack.
    pub fn initialize_at(&mut self, len: usize, index: usize) {
        self.current = (len > 0).then(|| if index < len { index } else { 0 });
        self.revealed = false;
        self.back = self.current.into_iter().collect();
        self.forward.clear();
    }

    /// The primary "next" action.
    ///
    /// Reveals the current answer if hidden. Otherwise replays a step undone by
    /// `go_back`, or advances: sequentially, or with `shuffle` to a random
    /// unanswered index (sequential when every item is answered).
    pub fn reveal_or_advance<R: Rng + ?Sized>(
        &mut self,
        view: &[QuestionRecord],
        answered: &BTreeSet<QuestionId>,
        shuffle: bool,
        rng: &mut R,
    ) -> NavigationStep {
        let Some(from) = self.current.filter(|&i| i < view.len()) else {
            return NavigationStep::Idle;
        };

        if !self.revealed {
            self.revealed = true;
            return NavigationStep::Revealed {
                index: from,
                id: view[from].id().clone(),
            };
        }

        if let Some(to) = self.forward.pop() {
            self.back.push(from);
            self.move_to(to);
            debug!(from, to, "replayed forward step");
            return NavigationStep::Replayed { from, to };
        }

        self.back.push(from);
        let to = if shuffle {
            let unanswered: Vec<usize> = (0..view.len())
                .filter(|&i| !answered.contains(view[i].id()))
                .collect();
            unanswered
                .choose(rng)
                .copied()
                .unwrap_or((from + 1) % view.len())
        } else {
            (from + 1) % view.len()
        };
        self.forward.clear();
        self.move_to(to);
        debug!(from, to, shuffle, "advanced");
        NavigationStep::Advanced { from, to }
    }

    /// Step back through history. No-op on empty history.
    ///
    /// The restored item is unrevealed, so replaying the undone step takes two
    /// `reveal_or_advance` calls: the first reveals, the second moves forward.
    pub fn go_back(&mut self) -> NavigationStep {
        let (Some(from), Some(to)) = (self.current, self.back.last().copied()) else {
            return NavigationStep::Idle;
        };
        self.back.pop();
        self.forward.push(from);
        self.move_to(to);
        debug!(from, to, "went back");
        NavigationStep::WentBack { from, to }
    }

    /// The record at the current position, or `None` for an empty view.
    #[must_use]
    pub fn current<'v>(&self, view: &'v [QuestionRecord]) -> Option<&'v QuestionRecord> {
        self.current.and_then(|i| view.get(i))
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn back_stack(&self) -> &[usize] {
        &self.back
    }

    #[must_use]
    pub fn forward_stack(&self) -> &[usize] {
        &self.forward
    }

    fn move_to(&mut self, index: usize) {
        self.current = Some(index);
        self.revealed = false;
    }
}
