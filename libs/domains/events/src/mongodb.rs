//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use database::mongodb::{MongoConnection, uuid_to_bson};
use futures::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

pub const COLLECTION: &str = "events";

/// MongoDB implementation of the EventRepository
///
/// Holds the shared [`MongoConnection`]; the collection handle is resolved
/// per call so the first request, not construction, opens the connection.
#[derive(Clone)]
pub struct MongoEventRepository {
    connection: MongoConnection,
    collection_name: String,
}

impl MongoEventRepository {
    /// Create a new MongoEventRepository
    ///
    /// # Example
    /// ```ignore
    /// let connection = MongoConnection::new(MongoConfig::from_env()?);
    /// let repo = MongoEventRepository::new(connection);
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(connection: MongoConnection) -> Self {
        Self::with_collection(connection, COLLECTION)
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(connection: MongoConnection, collection_name: &str) -> Self {
        Self {
            connection,
            collection_name: collection_name.to_string(),
        }
    }

    pub async fn collection(&self) -> EventResult<Collection<Event>> {
        let db = self.connection.database().await?;
        Ok(db.collection::<Event>(&self.collection_name))
    }

    /// Create the unique slug index and the listing indexes.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> EventResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "slug": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("slug_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            IndexModel::builder().keys(doc! { "tags": 1 }).build(),
        ];

        self.collection().await?.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection_name, "Event indexes ensured");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": uuid_to_bson(id) }
    }

    /// Build a MongoDB filter document from EventFilter
    fn build_filter(filter: &EventFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref mode) = filter.mode {
            doc.insert("mode", mode.to_string());
        }

        if let Some(ref tag) = filter.tag {
            doc.insert("tags", tag.trim());
        }

        if let Some(ref search) = filter.search {
            let pattern = regex::escape(search.trim());
            doc.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
                ],
            );
        }

        doc
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id, slug = %event.slug))]
    async fn create(&self, event: Event) -> EventResult<Event> {
        self.collection()
            .await?
            .insert_one(&event)
            .await
            .map_err(|e| EventError::from_write(e, &event.slug))?;

        tracing::info!(event_id = %event.id, "Event created successfully");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let event = self.collection().await?.find_one(Self::id_filter(id)).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_slug(&self, slug: &str) -> EventResult<Option<Event>> {
        let event = self
            .collection()
            .await?
            .find_one(doc! { "slug": slug })
            .await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let query = Self::build_filter(&filter);

        let options = FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();

        let cursor = self
            .collection()
            .await?
            .find(query)
            .with_options(options)
            .await?;
        let events: Vec<Event> = cursor.try_collect().await?;

        Ok(events)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id, slug = %event.slug))]
    async fn replace(&self, event: Event) -> EventResult<bool> {
        let result = self
            .collection()
            .await?
            .replace_one(Self::id_filter(event.id), &event)
            .await
            .map_err(|e| EventError::from_write(e, &event.slug))?;

        if result.matched_count > 0 {
            tracing::info!(event_id = %event.id, "Event updated successfully");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let result = self
            .collection()
            .await?
            .delete_one(Self::id_filter(id))
            .await?;

        if result.deleted_count > 0 {
            tracing::info!(event_id = %id, "Event deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Uuid) -> EventResult<bool> {
        let count = self
            .collection()
            .await?
            .count_documents(Self::id_filter(id))
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: EventFilter) -> EventResult<u64> {
        let query = Self::build_filter(&filter);
        let count = self.collection().await?.count_documents(query).await?;
        Ok(count)
    }
}
