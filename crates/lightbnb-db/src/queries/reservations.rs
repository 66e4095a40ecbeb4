//! Reservation database queries.

use lightbnb_common::{Error, Result, UserId};
use rusqlite::Connection;

use crate::models::{
    NewReservation, Reservation, ReservationListing, PROPERTY_COLUMNS, RESERVATION_COLUMNS,
};

/// Book a reservation and return the stored row.
pub fn add_reservation(conn: &Connection, reservation: &NewReservation) -> Result<Reservation> {
    if reservation.end_date < reservation.start_date {
        return Err(Error::invalid_input("Reservation ends before it starts"));
    }

    conn.query_row(
        "INSERT INTO reservations (guest_id, property_id, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, guest_id, property_id, start_date, end_date",
        rusqlite::params![
            reservation.guest_id.get(),
            reservation.property_id.get(),
            reservation.start_date.to_string(),
            reservation.end_date.to_string(),
        ],
        Reservation::from_row,
    )
    .map_err(|e| Error::database(e.to_string()))
}

/// List a guest's past reservations.
///
/// Only stays whose end date is before today are included. Each row carries
/// the reserved property and its average rating; properties without any
/// review drop out of the join. Ordered by start date.
///
/// # Returns
///
/// * `Ok(Vec<ReservationListing>)` - Up to `limit` reservations
/// * `Err(Error)` - If a database error occurs
pub fn get_all_reservations(
    conn: &Connection,
    guest_id: UserId,
    limit: u32,
) -> Result<Vec<ReservationListing>> {
    let sql = format!(
        "SELECT {RESERVATION_COLUMNS}, {PROPERTY_COLUMNS},
                avg(property_reviews.rating) AS average_rating
         FROM reservations
         JOIN properties ON reservations.property_id = properties.id
         JOIN property_reviews ON properties.id = property_reviews.property_id
         WHERE reservations.guest_id = ?1 AND reservations.end_date < date('now')
         GROUP BY properties.id, reservations.id
         ORDER BY reservations.start_date
         LIMIT ?2"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let listings = stmt
        .query_map(
            rusqlite::params![guest_id.get(), limit],
            ReservationListing::from_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(listings)
}
