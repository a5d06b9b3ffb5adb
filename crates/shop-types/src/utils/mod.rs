//! Utility functions for display formatting.

pub mod formatting;

pub use formatting::{format_product_table, truncate_id};
