//! MongoDB-backed listing store.
//!
//! Listings live in the `properties` collection. The store keeps its own
//! string `id` alongside MongoDB's `_id`; `_id` is ignored on the way out.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Client, Collection};
use tracing::{debug, info};
use uuid::Uuid;

use super::{DataStore, StoreError, StoreResult};
use crate::models::{timestamp, Listing, ListingPatch};
use crate::query::{Comparison, Predicate, SortDirection, SortOrder, Value};

const COLLECTION: &str = "properties";

pub struct MongoStore {
    client: Client,
    collection: Collection<Listing>,
}

impl MongoStore {
    /// Connect to `url` and use the listing collection of `database`.
    pub async fn connect(url: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(url).await?;
        // Fail at startup rather than on the first request.
        client
            .database(database)
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        info!(database, "connected to MongoDB");

        Ok(Self::with_client(client, database))
    }

    /// Use an existing client without checking that the server is reachable.
    pub fn with_client(client: Client, database: &str) -> Self {
        let collection = client.database(database).collection(COLLECTION);
        Self { client, collection }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Rejected(err.to_string())
    }
}

/// Translate a predicate tree into a MongoDB filter document.
pub fn filter_document(predicate: &Predicate) -> Document {
    match predicate {
        Predicate::And(children) if children.is_empty() => Document::new(),
        Predicate::And(children) => {
            doc! { "$and": children.iter().map(filter_document).collect::<Vec<_>>() }
        }
        Predicate::Or(children) => {
            doc! { "$or": children.iter().map(filter_document).collect::<Vec<_>>() }
        }
        Predicate::Compare { field, op, value } => {
            let value = to_bson(value);
            let condition = match op {
                Comparison::Eq => value,
                Comparison::Gte => Bson::Document(doc! { "$gte": value }),
                Comparison::Lte => Bson::Document(doc! { "$lte": value }),
                Comparison::ContainsIgnoreCase => {
                    let pattern = match &value {
                        Bson::String(text) => escape_regex(text),
                        other => escape_regex(&other.to_string()),
                    };
                    Bson::Document(doc! { "$regex": pattern, "$options": "i" })
                }
            };
            let mut filter = Document::new();
            filter.insert(field.name(), condition);
            filter
        }
    }
}

/// Options for a `find`, or `None` when `limit` is zero.
///
/// MongoDB reads a limit of 0 as "no limit".
fn find_options(limit: usize, sort: SortOrder) -> Option<FindOptions> {
    if limit == 0 {
        return None;
    }
    Some(
        FindOptions::builder()
            .sort(sort_document(sort))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build(),
    )
}

fn sort_document(sort: SortOrder) -> Document {
    let direction = match sort.direction {
        SortDirection::Descending => -1,
    };
    let mut document = Document::new();
    document.insert(sort.key.name(), direction);
    document
}

fn to_bson(value: &Value) -> Bson {
    match value {
        Value::Text(text) => Bson::String(text.clone()),
        Value::Number(n) => Bson::Double(*n),
        Value::Integer(n) => Bson::Int64(i64::from(*n)),
        Value::Bool(b) => Bson::Boolean(*b),
    }
}

/// Escape regex metacharacters so the text is matched literally.
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn new_document(listing: Listing) -> Listing {
    Listing {
        id: Some(Uuid::new_v4().to_string()),
        created_at: Some(timestamp::now()),
        ..listing
    }
}

#[async_trait]
impl DataStore for MongoStore {
    async fn find(
        &self,
        predicate: &Predicate,
        limit: usize,
        sort: SortOrder,
    ) -> StoreResult<Vec<Listing>> {
        let filter = filter_document(predicate);
        debug!(%filter, limit, "mongo find");

        let Some(options) = find_options(limit, sort) else {
            return Ok(Vec::new());
        };
        let cursor = self.collection.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Listing>> {
        Ok(self.collection.find_one(doc! { "id": id }, None).await?)
    }

    async fn insert(&self, listing: Listing) -> StoreResult<Listing> {
        let stored = new_document(listing);
        self.collection.insert_one(&stored, None).await?;
        Ok(stored)
    }

    async fn update_by_id(&self, id: &str, patch: &ListingPatch) -> StoreResult<Option<Listing>> {
        let set = bson::to_document(patch.fields())?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set }, options)
            .await?)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }

    async fn insert_many(&self, listings: Vec<Listing>) -> StoreResult<u64> {
        if listings.is_empty() {
            return Ok(0);
        }
        let documents: Vec<Listing> = listings.into_iter().map(new_document).collect();
        let result = self.collection.insert_many(documents, None).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    fn source_name(&self) -> &'static str {
        "mongodb"
    }

    async fn close(&self) {
        info!("closing MongoDB store");
        self.client.clone().shutdown().await;
    }
}
