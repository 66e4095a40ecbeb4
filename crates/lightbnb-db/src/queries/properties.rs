//! Property database queries.
//!
//! This module provides property creation and the filtered property search
//! built by [`crate::search::PropertyQuery`].

use lightbnb_common::{Error, PropertyId, Result};
use rusqlite::Connection;

use crate::models::{NewProperty, Property, PropertyListing, PROPERTY_COLUMNS};
use crate::search::{PropertyQuery, PropertySearch};

/// Add a property and return the stored row.
///
/// The fifteen caller-supplied columns are bound in the order the INSERT
/// statement declares them.
///
/// # Returns
///
/// * `Ok(Property)` - The created property, with its assigned ID
/// * `Err(Error)` - If the owner does not exist or a database error occurs
pub fn add_property(conn: &Connection, property: &NewProperty) -> Result<Property> {
    conn.query_row(
        "INSERT INTO properties (owner_id, title, description, thumbnail_photo_url,
             cover_photo_url, cost_per_night, parking_spaces, number_of_bathrooms,
             number_of_bedrooms, country, street, city, province, post_code, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         RETURNING id, owner_id, title, description, thumbnail_photo_url, cover_photo_url,
             cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
             country, street, city, province, post_code, active",
        rusqlite::params![
            property.owner_id.get(),
            property.title,
            property.description,
            property.thumbnail_photo_url,
            property.cover_photo_url,
            property.cost_per_night,
            property.parking_spaces,
            property.number_of_bathrooms,
            property.number_of_bedrooms,
            property.country,
            property.street,
            property.city,
            property.province,
            property.post_code,
            property.active,
        ],
        Property::from_row,
    )
    .map_err(|e| {
        if e.to_string().contains("FOREIGN KEY constraint failed") {
            Error::invalid_input(format!("Owner {} does not exist", property.owner_id))
        } else {
            Error::database(e.to_string())
        }
    })
}

/// Get a property by ID.
///
/// # Returns
///
/// * `Ok(Some(Property))` - The property if found
/// * `Ok(None)` - If the property does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_property(conn: &Connection, id: PropertyId) -> Result<Option<Property>> {
    let result = conn.query_row(
        &format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE properties.id = ?1"),
        [id.get()],
        Property::from_row,
    );

    match result {
        Ok(property) => Ok(Some(property)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Search properties with their average rating, cheapest first.
///
/// Only properties with at least one review are returned, since the
/// average is computed over an inner join with the reviews table.
///
/// # Returns
///
/// * `Ok(Vec<PropertyListing>)` - Up to `limit` matching properties
/// * `Err(Error)` - If a database error occurs
pub fn get_all_properties(
    conn: &Connection,
    search: &PropertySearch,
    limit: u32,
) -> Result<Vec<PropertyListing>> {
    let built = PropertyQuery::from_search(search, limit).build();

    tracing::debug!(sql = %built.sql, params = ?built.params, "Property search");

    let mut stmt = conn
        .prepare(&built.sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let listings = stmt
        .query_map(
            rusqlite::params_from_iter(built.params.iter()),
            PropertyListing::from_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(listings)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{NewReservation, NewReview, NewUser, User};
    use crate::pool::init_memory_pool;
    use crate::queries::{reservations, reviews, users};
    use chrono::NaiveDate;
    use lightbnb_common::UserId;

    pub(crate) fn create_owner(conn: &Connection, email: &str) -> User {
        users::add_user(
            conn,
            &NewUser {
                name: "Owner".to_string(),
                email: email.to_string(),
                password: "hash".to_string(),
            },
        )
        .unwrap()
    }

    pub(crate) fn new_property(owner_id: UserId, title: &str, city: &str, cents: i64) -> NewProperty {
        NewProperty {
            owner_id,
            title: title.to_string(),
            description: Some("description".to_string()),
            thumbnail_photo_url: format!("https://images.example.com/{title}/thumb.jpg"),
            cover_photo_url: format!("https://images.example.com/{title}/cover.jpg"),
            cost_per_night: cents,
            parking_spaces: 2,
            number_of_bathrooms: 1,
            number_of_bedrooms: 3,
            country: "Canada".to_string(),
            street: "651 Nami Road".to_string(),
            city: city.to_string(),
            province: "British Columbia".to_string(),
            post_code: "V6A 1M4".to_string(),
            active: true,
        }
    }

    /// Add a property with one review per rating.
    pub(crate) fn reviewed_property(
        conn: &Connection,
        owner: &User,
        guest: &User,
        title: &str,
        city: &str,
        cents: i64,
        ratings: &[i64],
    ) -> Property {
        let property = add_property(conn, &new_property(owner.id, title, city, cents)).unwrap();
        for rating in ratings {
            let reservation = reservations::add_reservation(
                conn,
                &NewReservation {
                    guest_id: guest.id,
                    property_id: property.id,
                    start_date: NaiveDate::from_ymd_opt(2018, 9, 11).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2018, 9, 26).unwrap(),
                },
            )
            .unwrap();
            reviews::add_review(
                conn,
                &NewReview {
                    guest_id: guest.id,
                    property_id: property.id,
                    reservation_id: reservation.id,
                    rating: *rating,
                    message: None,
                },
            )
            .unwrap();
        }
        property
    }

    #[test]
    fn test_add_property_returns_row() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let owner = create_owner(&conn, "owner@example.com");

        let input = new_property(owner.id, "Speed lamp", "Vancouver", 93_061);
        let property = add_property(&conn, &input).unwrap();

        assert!(property.id.get() > 0);
        assert_eq!(property.owner_id, owner.id);
        assert_eq!(property.title, input.title);
        assert_eq!(property.description, input.description);
        assert_eq!(property.thumbnail_photo_url, input.thumbnail_photo_url);
        assert_eq!(property.cover_photo_url, input.cover_photo_url);
        assert_eq!(property.cost_per_night, 93_061);
        assert_eq!(property.parking_spaces, 2);
        assert_eq!(property.number_of_bathrooms, 1);
        assert_eq!(property.number_of_bedrooms, 3);
        assert_eq!(property.country, "Canada");
        assert_eq!(property.street, "651 Nami Road");
        assert_eq!(property.city, "Vancouver");
        assert_eq!(property.province, "British Columbia");
        assert_eq!(property.post_code, "V6A 1M4");
        assert!(property.active);

        let stored = get_property(&conn, property.id).unwrap().unwrap();
        assert_eq!(stored, property);
    }

    #[test]
    fn test_add_property_unknown_owner() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let result = add_property(&conn, &new_property(UserId::new(42), "Ghost", "Nowhere", 100));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_get_property_not_found() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        assert!(get_property(&conn, PropertyId::new(1)).unwrap().is_none());
    }

    #[test]
    fn test_search_requires_reviews_and_orders_by_cost() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let owner = create_owner(&conn, "owner@example.com");
        let guest = create_owner(&conn, "guest@example.com");

        reviewed_property(&conn, &owner, &guest, "Pricey", "Vancouver", 50_000, &[5]);
        reviewed_property(&conn, &owner, &guest, "Cheap", "Toronto", 5_000, &[3, 4]);
        add_property(&conn, &new_property(owner.id, "Unreviewed", "Vancouver", 1_000)).unwrap();

        let listings = get_all_properties(&conn, &PropertySearch::default(), 10).unwrap();
        let titles: Vec<_> = listings.iter().map(|l| l.property.title.as_str()).collect();
        assert_eq!(titles, vec!["Cheap", "Pricey"]);
        assert_eq!(listings[0].average_rating, 3.5);
    }

    #[test]
    fn test_search_by_city_substring() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let owner = create_owner(&conn, "owner@example.com");
        let guest = create_owner(&conn, "guest@example.com");

        reviewed_property(&conn, &owner, &guest, "Downtown", "Vancouver", 10_000, &[4]);
        reviewed_property(&conn, &owner, &guest, "Lakeside", "Toronto", 10_000, &[4]);

        let search = PropertySearch {
            city: Some("couv".to_string()),
            ..PropertySearch::default()
        };
        let listings = get_all_properties(&conn, &search, 10).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].property.city, "Vancouver");
    }

    #[test]
    fn test_search_by_owner() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let alice = create_owner(&conn, "alice@example.com");
        let bob = create_owner(&conn, "bob@example.com");

        reviewed_property(&conn, &alice, &bob, "Alice's", "Calgary", 10_000, &[4]);
        reviewed_property(&conn, &bob, &alice, "Bob's", "Calgary", 10_000, &[4]);

        let search = PropertySearch {
            owner_id: Some(bob.id),
            ..PropertySearch::default()
        };
        let listings = get_all_properties(&conn, &search, 10).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].property.title, "Bob's");
    }

    #[test]
    fn test_search_by_price_range_is_inclusive() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let owner = create_owner(&conn, "owner@example.com");
        let guest = create_owner(&conn, "guest@example.com");

        reviewed_property(&conn, &owner, &guest, "Fifty", "Banff", 5_000, &[4]);
        reviewed_property(&conn, &owner, &guest, "Hundred", "Banff", 10_000, &[4]);
        reviewed_property(&conn, &owner, &guest, "TwoHundred", "Banff", 20_000, &[4]);

        let search = PropertySearch {
            minimum_price_per_night: Some(50.0),
            maximum_price_per_night: Some(100.0),
            ..PropertySearch::default()
        };
        let listings = get_all_properties(&conn, &search, 10).unwrap();
        let titles: Vec<_> = listings.iter().map(|l| l.property.title.as_str()).collect();
        assert_eq!(titles, vec!["Fifty", "Hundred"]);

        // A single bound is ignored
        let search = PropertySearch {
            minimum_price_per_night: Some(150.0),
            ..PropertySearch::default()
        };
        assert_eq!(get_all_properties(&conn, &search, 10).unwrap().len(), 3);
    }

    #[test]
    fn test_search_by_minimum_rating() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let owner = create_owner(&conn, "owner@example.com");
        let guest = create_owner(&conn, "guest@example.com");

        reviewed_property(&conn, &owner, &guest, "Great", "Vancouver", 10_000, &[5, 4]);
        reviewed_property(&conn, &owner, &guest, "Okay", "Vancouver", 8_000, &[3, 4]);

        let search = PropertySearch {
            minimum_rating: Some(4.0),
            ..PropertySearch::default()
        };
        let listings = get_all_properties(&conn, &search, 10).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].property.title, "Great");
        assert_eq!(listings[0].average_rating, 4.5);
    }

    #[test]
    fn test_search_respects_limit() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let owner = create_owner(&conn, "owner@example.com");
        let guest = create_owner(&conn, "guest@example.com");

        for i in 0..4 {
            reviewed_property(&conn, &owner, &guest, &format!("P{i}"), "Vancouver", 1_000 * (i + 1), &[4]);
        }

        let listings = get_all_properties(&conn, &PropertySearch::default(), 2).unwrap();
        let titles: Vec<_> = listings.iter().map(|l| l.property.title.as_str()).collect();
        assert_eq!(titles, vec!["P0", "P1"]);
    }
}
