//! Common types module for the shop order system.
//!
//! This module defines the value types shared by the delivery, order and
//! configuration crates: products, the two status enumerations, delivery
//! methods and order numbers.

/// Delivery status and delivery method types.
pub mod delivery;
/// Order status and order number types.
pub mod order;
/// Product value type.
pub mod product;
/// Utility functions for display formatting.
pub mod utils;

// Re-export all types for convenient access
pub use delivery::*;
pub use order::*;
pub use product::*;
pub use utils::{format_product_table, truncate_id};
