use thiserror::Error;

use crate::model::{BookmarkError, FilterError, SourceConfigError};
use crate::store::StoreError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
    #[error(transparent)]
    SourceConfig(#[from] SourceConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataSetSourceDraft;

    #[test]
    fn wraps_component_errors() {
        let err: Error = StoreError::Empty.into();
        assert_eq!(err.to_string(), "data set contains no questions");

        let err: Error = DataSetSourceDraft::new(" ").validate().unwrap_err().into();
        assert!(matches!(err, Error::SourceConfig(SourceConfigError::EmptyName)));
    }
}
