//! Property review queries.

use lightbnb_common::{Error, PropertyId, Result};
use rusqlite::Connection;

use crate::models::{NewReview, PropertyReview};

/// Ratings are whole stars from 1 to 5.
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// Add a review and return the stored row.
pub fn add_review(conn: &Connection, review: &NewReview) -> Result<PropertyReview> {
    if !RATING_RANGE.contains(&review.rating) {
        return Err(Error::invalid_input(format!(
            "Rating {} is outside 1..=5",
            review.rating
        )));
    }

    conn.query_row(
        "INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id, guest_id, property_id, reservation_id, rating, message",
        rusqlite::params![
            review.guest_id.get(),
            review.property_id.get(),
            review.reservation_id.get(),
            review.rating,
            review.message,
        ],
        PropertyReview::from_row,
    )
    .map_err(|e| Error::database(e.to_string()))
}

/// List reviews for a property, oldest first.
pub fn get_reviews_for_property(
    conn: &Connection,
    property_id: PropertyId,
) -> Result<Vec<PropertyReview>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, guest_id, property_id, reservation_id, rating, message
             FROM property_reviews WHERE property_id = ?1 ORDER BY id",
        )
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([property_id.get()], PropertyReview::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows)
}
