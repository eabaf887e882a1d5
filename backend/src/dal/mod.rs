//! Data-access layer
//!
//! The only place that talks to the document store. Handlers call through
//! [`TodoDal`] and get typed entities or an [`AppError`] back.

pub mod memory;
pub mod models;
pub mod mongo;

pub use memory::InMemoryTodoDal;
pub use models::{ItemId, ListId, ListSummary, ToDoList, ToDoListItem};
pub use mongo::MongoTodoDal;

use crate::error::AppError;
use async_trait::async_trait;
use futures_util::stream::BoxStream;

/// Lazily produced list summaries
pub type SummaryStream = BoxStream<'static, Result<ListSummary, AppError>>;

/// Todo list operations against a document store
///
/// Every call is a single store operation. Implementations hold no
/// per-request state and are shared across all requests.
#[async_trait]
pub trait TodoDal: Send + Sync {
    /// Stream a summary of every list in the store's natural order
    ///
    /// Each call re-queries the store.
    async fn list_todo_lists(&self) -> Result<SummaryStream, AppError>;

    /// Create an empty list and return its new identifier
    ///
    /// `name` is expected to be non-empty; callers validate it.
    async fn create_todo_list(&self, name: &str) -> Result<ListId, AppError>;

    /// Fetch a list with all of its items
    async fn get_todo_list(&self, id: &ListId) -> Result<ToDoList, AppError>;

    /// Delete a list and its items; `false` when nothing matched
    async fn delete_todo_list(&self, id: &ListId) -> Result<bool, AppError>;

    /// Append an unchecked item and return the updated list
    async fn create_item(&self, list_id: &ListId, label: &str) -> Result<ToDoList, AppError>;

    /// Remove an item if present and return the updated list
    async fn delete_item(&self, list_id: &ListId, item_id: &str) -> Result<ToDoList, AppError>;

    /// Set the completion flag of one item and return the updated list
    async fn set_checked_state(
        &self,
        list_id: &ListId,
        item_id: &str,
        checked: bool,
    ) -> Result<ToDoList, AppError>;

    /// Check that the store answers
    async fn ping(&self) -> Result<(), AppError>;

    /// Release store resources. Called once, after the server stops.
    async fn shutdown(&self) {}
}
