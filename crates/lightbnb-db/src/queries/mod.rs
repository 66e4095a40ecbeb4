//! Database query modules.
//!
//! This module organizes all database operations into logical groups:
//! - users: user lookup and registration
//! - properties: property creation and filtered search
//! - reservations: reservation booking and past-stay listing
//! - reviews: property reviews

pub mod properties;
pub mod reservations;
pub mod reviews;
pub mod users;
