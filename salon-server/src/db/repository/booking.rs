//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Booking;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub const BOOKING_TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All bookings, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        self.base.find_all_newest_first(BOOKING_TABLE).await
    }

    /// Find booking by pure key
    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<Booking>> {
        let booking: Option<Booking> = self.base.db().select((BOOKING_TABLE, key)).await?;
        Ok(booking)
    }

    /// Insert a new booking; the database assigns the key
    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(BOOKING_TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".into()))
    }

    /// Replace a booking read at `expected_version`
    pub async fn save(&self, key: &str, booking: Booking, expected_version: u64) -> RepoResult<Booking> {
        self.base
            .replace_if_version(BOOKING_TABLE, key, booking, expected_version)
            .await
    }

    /// Hard delete, returning the removed record (`None` if it did not exist)
    pub async fn delete(&self, key: &str) -> RepoResult<Option<Booking>> {
        let deleted: Option<Booking> = self.base.db().delete((BOOKING_TABLE, key)).await?;
        Ok(deleted)
    }
}
