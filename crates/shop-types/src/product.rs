//! Product value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An item attached to an order.
///
/// Products are immutable once built; an order only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	name: String,
	features: String,
}

impl Product {
	pub fn new(name: impl Into<String>, features: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			features: features.into(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn features(&self) -> &str {
		&self.features
	}
}

/// Renders the product as one row of the product table.
impl fmt::Display for Product {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:<30}:{:<50}", self.name, self.features)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_pads_columns() {
		let product = Product::new("tv", "very good");
		let row = product.to_string();

		assert_eq!(row.len(), 81);
		assert!(row.starts_with("tv "));
		assert_eq!(&row[30..31], ":");
		assert_eq!(row[31..].trim_end(), "very good");
	}

	#[test]
	fn test_deserialize_from_toml_shape() {
		let product: Product =
			serde_json::from_str(r#"{"name":"heater","features":"on fire"}"#).unwrap();
		assert_eq!(product.name(), "heater");
		assert_eq!(product.features(), "on fire");
	}
}
