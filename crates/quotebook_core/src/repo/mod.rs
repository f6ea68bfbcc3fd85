//! Quote collection ownership and persistence.
//!
//! # Responsibility
//! - Own the in-memory quote collection.
//! - Mirror every mutation to the durable store before returning.
//!
//! # Invariants
//! - The durable copy is overwritten wholesale on each save.
//! - A failed save leaves the in-memory collection untouched.

pub mod quote_repo;
