//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod venue_repo;

pub use venue_repo::{is_foreign_key_violation, VenueDeletion, VenueRepo};
