mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use service::{LoadTicket, SessionOptions, StudySession};
pub use view::{CurrentQuestion, FilterOptions, SessionObserver, SessionSnapshot};
pub use workflow::SessionLoadService;
