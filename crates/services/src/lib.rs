#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod sessions;
pub mod speech;

pub use sessions as session;

pub use error::{LoadError, SessionError, SpeechError};
pub use loader::{LoadReport, LoadedSet, QuestionLoader, QuestionSource, SourceKind};
pub use sessions::{
    CurrentQuestion, FilterOptions, LoadTicket, SessionLoadService, SessionObserver,
    SessionOptions, SessionSnapshot, StudySession,
};
pub use speech::{CancelHandle, PlaybackOutcome, Speaker, SpeechQueue, Utterance};
