//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wraps a [`Store`] over a fresh in-memory
//! database, plus helpers for building users, properties and reviews.

#![allow(dead_code)]

use chrono::NaiveDate;
use lightbnb::Store;
use lightbnb_common::UserId;
use lightbnb_db::models::{NewProperty, NewReservation, NewReview, NewUser, Property, User};
use lightbnb_db::pool::{init_memory_pool, DbPool};

pub struct TestHarness {
    pub store: Store,
    pub db: DbPool,
}

impl TestHarness {
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        Self {
            store: Store::new(db.clone()),
            db,
        }
    }

    pub async fn user(&self, name: &str, email: &str) -> User {
        self.store
            .add_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
            })
            .await
            .expect("failed to add user")
    }

    pub async fn property(&self, owner: UserId, title: &str, city: &str, cents: i64) -> Property {
        self.store
            .add_property(new_property(owner, title, city, cents))
            .await
            .expect("failed to add property")
    }

    /// Book a stay for `guest` and review it with `rating`.
    pub async fn stay_and_review(
        &self,
        guest: UserId,
        property: &Property,
        start: NaiveDate,
        end: NaiveDate,
        rating: i64,
    ) {
        let reservation = self
            .store
            .add_reservation(NewReservation {
                guest_id: guest,
                property_id: property.id,
                start_date: start,
                end_date: end,
            })
            .await
            .expect("failed to add reservation");

        self.store
            .add_review(NewReview {
                guest_id: guest,
                property_id: property.id,
                reservation_id: reservation.id,
                rating,
                message: Some("messages".to_string()),
            })
            .await
            .expect("failed to add review");
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn new_property(owner_id: UserId, title: &str, city: &str, cents: i64) -> NewProperty {
    NewProperty {
        owner_id,
        title: title.to_string(),
        description: Some("description".to_string()),
        thumbnail_photo_url: "https://images.pexels.com/photos/2086676/thumb.jpeg".to_string(),
        cover_photo_url: "https://images.pexels.com/photos/2086676/cover.jpeg".to_string(),
        cost_per_night: cents,
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
        country: "Canada".to_string(),
        street: "536 Namsub Highway".to_string(),
        city: city.to_string(),
        province: "Quebec".to_string(),
        post_code: "28142".to_string(),
        active: true,
    }
}
