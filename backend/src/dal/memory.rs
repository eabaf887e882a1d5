//! In-process todo list store
//!
//! Keeps list documents in insertion order behind an async `RwLock`.
//! Used by tests and for running the API without a database.

use super::models::{ListId, ToDoList, ToDoListItem};
use super::{SummaryStream, TodoDal};
use crate::error::AppError;
use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use tokio::sync::RwLock;
use tracing::debug;

/// [`TodoDal`] over an in-memory collection
#[derive(Debug, Default)]
pub struct InMemoryTodoDal {
    lists: RwLock<Vec<ToDoList>>,
}

impl InMemoryTodoDal {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `change` to the list with the given id and return a copy of the result
    async fn update_list<F>(&self, id: &ListId, change: F) -> Result<ToDoList, AppError>
    where
        F: FnOnce(&mut ToDoList) -> Result<(), AppError> + Send,
    {
        let mut lists = self.lists.write().await;
        let list = lists
            .iter_mut()
            .find(|list| list.id == *id)
            .ok_or_else(|| AppError::ListNotFound(id.to_string()))?;
        change(list)?;
        Ok(list.clone())
    }
}

#[async_trait]
impl TodoDal for InMemoryTodoDal {
    async fn list_todo_lists(&self) -> Result<SummaryStream, AppError> {
        let summaries: Vec<_> = self
            .lists
            .read()
            .await
            .iter()
            .map(|list| Ok(list.summary()))
            .collect();
        Ok(stream::iter(summaries).boxed())
    }

    async fn create_todo_list(&self, name: &str) -> Result<ListId, AppError> {
        let id = ListId::generate();
        self.lists.write().await.push(ToDoList::new(id, name));
        debug!(list_id = %id, "Created list");
        Ok(id)
    }

    async fn get_todo_list(&self, id: &ListId) -> Result<ToDoList, AppError> {
        self.lists
            .read()
            .await
            .iter()
            .find(|list| list.id == *id)
            .cloned()
            .ok_or_else(|| AppError::ListNotFound(id.to_string()))
    }

    async fn delete_todo_list(&self, id: &ListId) -> Result<bool, AppError> {
        let mut lists = self.lists.write().await;
        let before = lists.len();
        lists.retain(|list| list.id != *id);
        let deleted = lists.len() != before;
        debug!(list_id = %id, deleted, "Deleted list");
        Ok(deleted)
    }

    async fn create_item(&self, list_id: &ListId, label: &str) -> Result<ToDoList, AppError> {
        let item = ToDoListItem::new(label);
        debug!(list_id = %list_id, item_id = %item.id, "Adding item");
        self.update_list(list_id, |list| {
            list.items.push(item);
            Ok(())
        })
        .await
    }

    async fn delete_item(&self, list_id: &ListId, item_id: &str) -> Result<ToDoList, AppError> {
        debug!(list_id = %list_id, item_id, "Removing item");
        self.update_list(list_id, |list| {
            list.items.retain(|item| item.id != item_id);
            Ok(())
        })
        .await
    }

    async fn set_checked_state(
        &self,
        list_id: &ListId,
        item_id: &str,
        checked: bool,
    ) -> Result<ToDoList, AppError> {
        self.update_list(list_id, |list| {
            let item = list
                .items
                .iter_mut()
                .find(|item| item.id == item_id)
                .ok_or_else(|| AppError::ItemNotFound(item_id.to_string()))?;
            item.checked = checked;
            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
