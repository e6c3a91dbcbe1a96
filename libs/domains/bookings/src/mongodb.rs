//! MongoDB implementation of BookingRepository

use async_trait::async_trait;
use database::mongodb::{MongoConnection, uuid_to_bson};
use domain_events::{EventRepository, MongoEventRepository};
use futures::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc},
    options::FindOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::BookingResult;
use crate::models::{Booking, BookingFilter};
use crate::repository::{BookingRepository, EventLookup};

pub const COLLECTION: &str = "bookings";

/// MongoDB implementation of the BookingRepository
#[derive(Clone)]
pub struct MongoBookingRepository {
    connection: MongoConnection,
    collection_name: String,
}

impl MongoBookingRepository {
    pub fn new(connection: MongoConnection) -> Self {
        Self::with_collection(connection, COLLECTION)
    }

    pub fn with_collection(connection: MongoConnection, collection_name: &str) -> Self {
        Self {
            connection,
            collection_name: collection_name.to_string(),
        }
    }

    pub async fn collection(&self) -> BookingResult<Collection<Booking>> {
        let db = self.connection.database().await?;
        Ok(db.collection::<Booking>(&self.collection_name))
    }

    /// Index bookings by the event they reference.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> BookingResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "eventId": 1 }).build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
        ];

        self.collection().await?.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection_name, "Booking indexes ensured");
        Ok(())
    }

    fn event_filter(event_id: Option<Uuid>) -> Document {
        match event_id {
            Some(id) => doc! { "eventId": uuid_to_bson(id) },
            None => doc! {},
        }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    #[instrument(skip(self, booking), fields(booking_id = %booking.id, event_id = %booking.event_id))]
    async fn create(&self, booking: Booking) -> BookingResult<Booking> {
        self.collection().await?.insert_one(&booking).await?;

        tracing::info!(booking_id = %booking.id, "Booking created successfully");
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let booking = self
            .collection()
            .await?
            .find_one(doc! { "_id": uuid_to_bson(id) })
            .await?;
        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: BookingFilter) -> BookingResult<Vec<Booking>> {
        let options = FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();

        let cursor = self
            .collection()
            .await?
            .find(Self::event_filter(filter.event_id))
            .with_options(options)
            .await?;
        let bookings: Vec<Booking> = cursor.try_collect().await?;

        Ok(bookings)
    }

    #[instrument(skip(self))]
    async fn count(&self, event_id: Option<Uuid>) -> BookingResult<u64> {
        let count = self
            .collection()
            .await?
            .count_documents(Self::event_filter(event_id))
            .await?;
        Ok(count)
    }
}

/// Existence check against the `events` collection.
#[async_trait]
impl EventLookup for MongoEventRepository {
    async fn event_exists(&self, event_id: Uuid) -> BookingResult<bool> {
        Ok(self.exists(event_id).await?)
    }
}
