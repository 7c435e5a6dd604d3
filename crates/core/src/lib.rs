//! Shared domain types and pure rules for the festival backend.
//!
//! Nothing in this crate performs I/O; the `db`, `storage` and `api`
//! crates build on these definitions.

pub mod error;
pub mod images;
pub mod types;
pub mod venue;
