//! Fixture seeding.
//!
//! Loads the JSON seed files (objects keyed by record id) into an empty
//! store. Records keep their fixture ids so property owners line up with
//! the seeded users.

use std::collections::BTreeMap;

use lightbnb_common::{Error, PropertyId, Result, UserId};
use rusqlite::Connection;
use serde::Deserialize;

use crate::models::NewProperty;

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureProperty {
    pub id: PropertyId,
    #[serde(flatten)]
    pub property: NewProperty,
}

/// Parsed seed data.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub users: Vec<FixtureUser>,
    pub properties: Vec<FixtureProperty>,
}

/// Counts of records written by [`load_fixtures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub users: usize,
    pub properties: usize,
}

impl Fixtures {
    /// Parse the users and properties fixture documents.
    pub fn from_json(users_json: &str, properties_json: &str) -> Result<Self> {
        let users: BTreeMap<String, FixtureUser> = serde_json::from_str(users_json)
            .map_err(|e| Error::invalid_input(format!("Invalid users fixture: {e}")))?;
        let properties: BTreeMap<String, FixtureProperty> = serde_json::from_str(properties_json)
            .map_err(|e| Error::invalid_input(format!("Invalid properties fixture: {e}")))?;

        let mut users: Vec<_> = users.into_values().collect();
        users.sort_by_key(|u| u.id);
        let mut properties: Vec<_> = properties.into_values().collect();
        properties.sort_by_key(|p| p.id);

        Ok(Self { users, properties })
    }
}

/// Write all fixtures in a single transaction.
///
/// Fails without writing anything if any record conflicts with existing data.
pub fn load_fixtures(conn: &Connection, fixtures: &Fixtures) -> Result<SeedReport> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    for user in &fixtures.users {
        tx.execute(
            "INSERT INTO users (id, name, email, password) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![user.id.get(), user.name, user.email, user.password],
        )
        .map_err(|e| Error::database(format!("Failed to seed user {}: {e}", user.id)))?;
    }

    for fixture in &fixtures.properties {
        let p = &fixture.property;
        tx.execute(
            "INSERT INTO properties (id, owner_id, title, description, thumbnail_photo_url,
                 cover_photo_url, cost_per_night, parking_spaces, number_of_bathrooms,
                 number_of_bedrooms, country, street, city, province, post_code, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            rusqlite::params![
                fixture.id.get(),
                p.owner_id.get(),
                p.title,
                p.description,
                p.thumbnail_photo_url,
                p.cover_photo_url,
                p.cost_per_night,
                p.parking_spaces,
                p.number_of_bathrooms,
                p.number_of_bedrooms,
                p.country,
                p.street,
                p.city,
                p.province,
                p.post_code,
                p.active,
            ],
        )
        .map_err(|e| Error::database(format!("Failed to seed property {}: {e}", fixture.id)))?;
    }

    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    let report = SeedReport {
        users: fixtures.users.len(),
        properties: fixtures.properties.len(),
    };
    tracing::info!(users = report.users, properties = report.properties, "Seeded fixtures");

    Ok(report)
}
