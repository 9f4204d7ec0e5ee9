//! Durable record store interface for approved titles.
//!
//! The store owns Title records; the engine only appends. A unique
//! constraint on the title text turns duplicate inserts into the
//! [`InsertOutcome::Duplicate`] no-op outcome rather than an error.

pub mod error;
pub mod sqlite;

#[cfg(any(test, feature = "mock"))]
pub mod memory;

pub use error::StoreError;
pub use sqlite::SqliteTitleStore;

#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryTitleStore;

/// Result of persisting a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was created with this identifier.
    Inserted(i64),
    /// The uniqueness constraint matched an existing record; nothing written.
    Duplicate,
}

pub trait TitleStore: Send + Sync {
    fn insert_title(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<InsertOutcome, StoreError>> + Send;

    fn list_approved_titles(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;
}
