//! MongoDB todo list store
//!
//! One document per list, with the items embedded as an ordered array:
//!
//! ```text
//! { _id: ObjectId, name: "Groceries", items: [ { id, label, checked }, ... ] }
//! ```
//!
//! Item changes are single `find_one_and_update` calls so concurrent
//! requests never overwrite each other's items.

use super::models::{ListId, ListSummary, ToDoList, ToDoListItem};
use super::{SummaryStream, TodoDal};
use crate::config::StoreConfig;
use crate::error::AppError;
use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::Deserialize;
use tracing::{debug, info};

/// Stored shape of a todo list
#[derive(Debug, Deserialize)]
struct ToDoListDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default)]
    items: Vec<ToDoListItem>,
}

impl From<ToDoListDocument> for ToDoList {
    fn from(doc: ToDoListDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            items: doc.items,
        }
    }
}

/// Result row of the summary projection
#[derive(Debug, Deserialize)]
struct ListSummaryDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    item_count: u64,
    checked_count: u64,
}

impl From<ListSummaryDocument> for ListSummary {
    fn from(doc: ListSummaryDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            item_count: doc.item_count,
            checked_count: doc.checked_count,
        }
    }
}

/// Aggregation that counts items instead of returning them
fn summary_pipeline() -> Vec<Document> {
    let items = doc! { "$ifNull": ["$items", []] };
    vec![doc! {
        "$project": {
            "name": 1,
            "item_count": { "$size": items.clone() },
            "checked_count": {
                "$size": {
                    "$filter": {
                        "input": items,
                        "as": "item",
                        "cond": { "$eq": ["$$item.checked", true] },
                    }
                }
            },
        }
    }]
}

/// Whether a command reply reports `ok: 1`
fn reply_ok(reply: &Document) -> bool {
    match reply.get("ok") {
        Some(Bson::Double(v)) => *v == 1.0,
        Some(Bson::Int32(v)) => *v == 1,
        Some(Bson::Int64(v)) => *v == 1,
        _ => false,
    }
}

/// [`TodoDal`] backed by a MongoDB collection
#[derive(Clone)]
pub struct MongoTodoDal {
    client: Client,
    database: Database,
    lists: Collection<ToDoListDocument>,
}

impl MongoTodoDal {
    /// Connect to the store and verify it answers
    ///
    /// # Returns
    /// * `Ok(MongoTodoDal)` once a ping succeeded
    /// * `Err(AppError::StoreUnavailable)` if the URI is unusable or the store is unreachable
    pub async fn connect(config: &StoreConfig) -> Result<Self, AppError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Invalid connection string: {}", e)))?;
        let database = client.default_database().ok_or_else(|| {
            AppError::StoreUnavailable(
                "Connection string does not name a default database".to_string(),
            )
        })?;

        let dal = Self::new(client, database, &config.collection);
        dal.ping().await?;

        info!(
            database = %dal.database.name(),
            collection = %config.collection,
            "Connected to MongoDB"
        );
        Ok(dal)
    }

    /// Wrap an existing client without contacting the server
    pub fn new(client: Client, database: Database, collection: &str) -> Self {
        let lists = database.collection(collection);
        Self {
            client,
            database,
            lists,
        }
    }

    async fn find_list(&self, id: &ListId) -> Result<Option<ToDoListDocument>, AppError> {
        Ok(self.lists.find_one(doc! { "_id": id.object_id() }).await?)
    }

    /// Apply `update` to the list matching `filter`, returning the list after the change
    async fn update_list(
        &self,
        id: &ListId,
        filter: Document,
        update: Document,
    ) -> Result<Option<ToDoList>, AppError> {
        let updated = self
            .lists
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;
        debug!(list_id = %id, found = updated.is_some(), "Updated list");
        Ok(updated.map(ToDoList::from))
    }
}

#[async_trait]
impl TodoDal for MongoTodoDal {
    async fn list_todo_lists(&self) -> Result<SummaryStream, AppError> {
        let cursor = self
            .lists
            .aggregate(summary_pipeline())
            .with_type::<ListSummaryDocument>()
            .await?;

        Ok(cursor
            .map(|row| row.map(ListSummary::from).map_err(AppError::from))
            .boxed())
    }

    async fn create_todo_list(&self, name: &str) -> Result<ListId, AppError> {
        let result = self
            .lists
            .clone_with_type::<Document>()
            .insert_one(doc! { "name": name, "items": [] })
            .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Store assigned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })?;
        debug!(list_id = %id, "Created list");
        Ok(id.into())
    }

    async fn get_todo_list(&self, id: &ListId) -> Result<ToDoList, AppError> {
        self.find_list(id)
            .await?
            .map(ToDoList::from)
            .ok_or_else(|| AppError::ListNotFound(id.to_string()))
    }

    async fn delete_todo_list(&self, id: &ListId) -> Result<bool, AppError> {
        let result = self
            .lists
            .delete_one(doc! { "_id": id.object_id() })
            .await?;
        debug!(list_id = %id, deleted = result.deleted_count, "Deleted list");
        Ok(result.deleted_count == 1)
    }

    async fn create_item(&self, list_id: &ListId, label: &str) -> Result<ToDoList, AppError> {
        let item = ToDoListItem::new(label);
        let update = doc! {
            "$push": {
                "items": {
                    "id": item.id.as_str(),
                    "label": item.label.as_str(),
                    "checked": item.checked,
                }
            }
        };
        self.update_list(list_id, doc! { "_id": list_id.object_id() }, update)
            .await?
            .ok_or_else(|| AppError::ListNotFound(list_id.to_string()))
    }

    async fn delete_item(&self, list_id: &ListId, item_id: &str) -> Result<ToDoList, AppError> {
        let update = doc! { "$pull": { "items": { "id": item_id } } };
        self.update_list(list_id, doc! { "_id": list_id.object_id() }, update)
            .await?
            .ok_or_else(|| AppError::ListNotFound(list_id.to_string()))
    }

    async fn set_checked_state(
        &self,
        list_id: &ListId,
        item_id: &str,
        checked: bool,
    ) -> Result<ToDoList, AppError> {
        let filter = doc! { "_id": list_id.object_id(), "items.id": item_id };
        let update = doc! { "$set": { "items.$.checked": checked } };
        if let Some(list) = self.update_list(list_id, filter, update).await? {
            return Ok(list);
        }

        // Nothing matched: tell a missing list apart from a missing item
        match self.find_list(list_id).await? {
            Some(_) => Err(AppError::ItemNotFound(item_id.to_string())),
            None => Err(AppError::ListNotFound(list_id.to_string())),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        let reply = self
            .database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        if reply_ok(&reply) {
            Ok(())
        } else {
            Err(AppError::StoreUnavailable(format!(
                "Unexpected ping reply: {}",
                reply
            )))
        }
    }

    async fn shutdown(&self) {
        info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
