//! Async data-access facade.
//!
//! [`Store`] owns the connection pool handed to it by the entry point and
//! exposes one async method per operation. Each call checks out a single
//! connection on the blocking thread pool, runs one statement and returns.
//! Failures are logged here and returned to the caller.

use lightbnb_common::{Error, Result, UserId};
use lightbnb_db::models::{
    NewProperty, NewReservation, NewReview, NewUser, Property, PropertyListing, PropertyReview,
    Reservation, ReservationListing, User,
};
use lightbnb_db::pool::{get_conn, init_pool, DbPool};
use lightbnb_db::queries::{properties, reservations, reviews, users};
use lightbnb_db::search::PropertySearch;
use lightbnb_db::seed::{self, Fixtures, SeedReport};
use rusqlite::Connection;

use crate::config::DatabaseConfig;

/// Handle to the LightBnB store.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Wrap an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the pool described by the config, running pending migrations.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let path = config.resolved_path();
        tracing::info!("Opening database at {}", path);
        let pool = init_pool(&path, &config.pool_settings())?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn run<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let conn = get_conn(&pool)?;
            f(&*conn)
        })
        .await
        .unwrap_or_else(|e| Err(Error::internal(format!("{operation} task failed: {e}"))));

        match &result {
            Err(e @ (Error::Database(_) | Error::Internal(_) | Error::Io(_))) => {
                tracing::error!(operation, error = %e, "Query error");
            }
            Err(e) => tracing::warn!(operation, error = %e, "Query rejected"),
            Ok(_) => tracing::trace!(operation, "Query complete"),
        }

        result
    }

    /// Get a single user by email (exact match).
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        self.run("get_user_with_email", move |conn| {
            users::get_user_with_email(conn, &email)
        })
        .await
    }

    /// Get a single user by ID.
    pub async fn get_user_with_id(&self, id: UserId) -> Result<Option<User>> {
        self.run("get_user_with_id", move |conn| users::get_user_with_id(conn, id))
            .await
    }

    /// Add a new user.
    pub async fn add_user(&self, user: NewUser) -> Result<User> {
        self.run("add_user", move |conn| users::add_user(conn, &user))
            .await
    }

    /// A guest's past reservations, capped at `limit`.
    pub async fn get_all_reservations(
        &self,
        guest_id: UserId,
        limit: u32,
    ) -> Result<Vec<ReservationListing>> {
        self.run("get_all_reservations", move |conn| {
            reservations::get_all_reservations(conn, guest_id, limit)
        })
        .await
    }

    /// Filtered property search, capped at `limit`.
    pub async fn get_all_properties(
        &self,
        search: PropertySearch,
        limit: u32,
    ) -> Result<Vec<PropertyListing>> {
        self.run("get_all_properties", move |conn| {
            properties::get_all_properties(conn, &search, limit)
        })
        .await
    }

    /// Add a property.
    pub async fn add_property(&self, property: NewProperty) -> Result<Property> {
        self.run("add_property", move |conn| {
            properties::add_property(conn, &property)
        })
        .await
    }

    /// Book a reservation.
    pub async fn add_reservation(&self, reservation: NewReservation) -> Result<Reservation> {
        self.run("add_reservation", move |conn| {
            reservations::add_reservation(conn, &reservation)
        })
        .await
    }

    /// Review a property.
    pub async fn add_review(&self, review: NewReview) -> Result<PropertyReview> {
        self.run("add_review", move |conn| reviews::add_review(conn, &review))
            .await
    }

    /// Load fixture data in one transaction.
    pub async fn seed(&self, fixtures: Fixtures) -> Result<SeedReport> {
        self.run("seed", move |conn| seed::load_fixtures(conn, &fixtures))
            .await
    }
}
