//! Rust structs mapping to database tables.
//!
//! Each row model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. The `New*` structs carry the caller-supplied columns
//! of an insert.

use chrono::NaiveDate;
use lightbnb_common::{PropertyId, ReservationId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Parse an ISO-8601 date stored as text.
fn parse_date(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_id<T: From<i64>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    row.get::<_, i64>(idx).map(T::from)
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Column list matching [`User::from_row`].
pub const USER_COLUMNS: &str = "users.id, users.name, users.email, users.password";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Password hash. Never serialized back out.
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl User {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// Column list matching [`Property::from_row`], qualified for use in joins.
pub const PROPERTY_COLUMNS: &str = "properties.id, properties.owner_id, properties.title, \
     properties.description, properties.thumbnail_photo_url, properties.cover_photo_url, \
     properties.cost_per_night, properties.parking_spaces, properties.number_of_bathrooms, \
     properties.number_of_bedrooms, properties.country, properties.street, properties.city, \
     properties.province, properties.post_code, properties.active";

/// Number of columns in [`PROPERTY_COLUMNS`].
pub const PROPERTY_COLUMN_COUNT: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in cents.
    pub cost_per_night: i64,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

impl Property {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }

    /// Read a property whose columns start at `offset` in the row.
    pub fn from_row_at(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, offset)?,
            owner_id: parse_id(row, offset + 1)?,
            title: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            thumbnail_photo_url: row.get(offset + 4)?,
            cover_photo_url: row.get(offset + 5)?,
            cost_per_night: row.get(offset + 6)?,
            parking_spaces: row.get(offset + 7)?,
            number_of_bathrooms: row.get(offset + 8)?,
            number_of_bedrooms: row.get(offset + 9)?,
            country: row.get(offset + 10)?,
            street: row.get(offset + 11)?,
            city: row.get(offset + 12)?,
            province: row.get(offset + 13)?,
            post_code: row.get(offset + 14)?,
            active: row.get(offset + 15)?,
        })
    }
}

/// Insert payload for a property. `cost_per_night` is already in cents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProperty {
    pub owner_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    #[serde(default)]
    pub parking_spaces: i64,
    #[serde(default)]
    pub number_of_bathrooms: i64,
    #[serde(default)]
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A property together with its average review rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

impl PropertyListing {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            property: Property::from_row(row)?,
            average_rating: row.get(PROPERTY_COLUMN_COUNT)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Reservation
// ---------------------------------------------------------------------------

/// Column list matching [`Reservation::from_row`].
pub const RESERVATION_COLUMNS: &str = "reservations.id, reservations.guest_id, \
     reservations.property_id, reservations.start_date, reservations.end_date";

/// Number of columns in [`RESERVATION_COLUMNS`].
pub const RESERVATION_COLUMN_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub guest_id: UserId,
    pub property_id: PropertyId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Reservation {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            guest_id: parse_id(row, 1)?,
            property_id: parse_id(row, 2)?,
            start_date: parse_date(row, 3)?,
            end_date: parse_date(row, 4)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReservation {
    pub guest_id: UserId,
    pub property_id: PropertyId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A past reservation with the reserved property and its average rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationListing {
    pub reservation: Reservation,
    pub property: Property,
    pub average_rating: f64,
}

impl ReservationListing {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            reservation: Reservation::from_row(row)?,
            property: Property::from_row_at(row, RESERVATION_COLUMN_COUNT)?,
            average_rating: row.get(RESERVATION_COLUMN_COUNT + PROPERTY_COLUMN_COUNT)?,
        })
    }
}

// ---------------------------------------------------------------------------
// PropertyReview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyReview {
    pub id: ReviewId,
    pub guest_id: UserId,
    pub property_id: PropertyId,
    pub reservation_id: ReservationId,
    pub rating: i64,
    pub message: Option<String>,
}

impl PropertyReview {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            guest_id: parse_id(row, 1)?,
            property_id: parse_id(row, 2)?,
            reservation_id: parse_id(row, 3)?,
            rating: row.get(4)?,
            message: row.get(5)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReview {
    pub guest_id: UserId,
    pub property_id: PropertyId,
    pub reservation_id: ReservationId,
    pub rating: i64,
    #[serde(default)]
    pub message: Option<String>,
}
