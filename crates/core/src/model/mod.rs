mod bookmarks;
mod filter_config;
mod ids;
mod question;
mod source;

pub use bookmarks::{BookmarkError, BookmarkExport};
pub use filter_config::{
    ALL, BOOKMARKED, FilterChange, FilterConfig, FilterDimension, FilterError, YES,
};
pub use ids::{ParseIdError, QuestionId};
pub use question::QuestionRecord;
pub use source::{DataSetSource, DataSetSourceDraft, SourceConfigError};
