//! Question-session state machine for a study flashcard app.
//!
//! Everything here is synchronous and free of I/O: the store, the filter
//! engine, navigation and progress tracking. Orchestration lives in `services`.
#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod model;
pub mod navigation;
pub mod progress;
pub mod store;

pub use error::Error;
pub use filter::FilterEngine;
pub use navigation::{NavigationController, NavigationStep};
pub use progress::{ProgressStats, ProgressTracker};
pub use store::{QuestionStore, StoreError};
