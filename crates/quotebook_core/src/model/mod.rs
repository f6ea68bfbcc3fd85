//! Domain model for the quote collection.
//!
//! # Responsibility
//! - Define the canonical `Quote` record and its validation rules.
//! - Define the tolerant wire shape accepted from the remote endpoint.
//!
//! # Invariants
//! - A `Quote` has no identifier; identity is the exact `text` value.
//! - Quotes are immutable once created.

pub mod quote;
