#![forbid(unsafe_code)]

pub mod file_store;
pub mod repository;

pub use file_store::FileStore;
pub use repository::{
    BookmarkStore, InMemoryStore, KeyValueStore, SessionPreferences, Storage, StorageError,
};
