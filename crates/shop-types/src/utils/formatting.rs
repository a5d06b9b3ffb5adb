//! String formatting utilities.
//!
//! Provides the product table rendering used when an order is confirmed, and
//! truncation of long order numbers for log fields.

use crate::Product;

/// Line printed instead of a table when there is nothing to list.
pub const EMPTY_PRODUCT_LIST: &str = "nothing to list";

/// Truncates an identifier for display purposes.
///
/// Shows only the first 12 characters followed by ".." for longer strings.
pub fn truncate_id(id: &str) -> String {
	match id.char_indices().nth(12) {
		Some((cut, _)) => format!("{}..", &id[..cut]),
		None => id.to_string(),
	}
}

/// Renders products as a fixed-width table with a header row.
///
/// Returns [`EMPTY_PRODUCT_LIST`] when the slice is empty.
pub fn format_product_table(products: &[Product]) -> String {
	if products.is_empty() {
		return EMPTY_PRODUCT_LIST.to_string();
	}

	let mut lines = Vec::with_capacity(products.len() + 1);
	lines.push(format!(
		"{:<30}:{:<50}",
		"-----product------------", "-----features-------------------------"
	));
	lines.extend(products.iter().map(Product::to_string));
	lines.join("\n")
}
