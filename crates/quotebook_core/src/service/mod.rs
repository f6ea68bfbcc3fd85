//! Use-case services layered over the quote repository.
//!
//! # Responsibility
//! - Derive the category index consumed by filter selection.
//! - Drive the filter state machine and random display.
//! - Move the collection in and out of JSON files.

pub mod category_index;
pub mod filter_service;
pub mod random;
pub mod transfer;
