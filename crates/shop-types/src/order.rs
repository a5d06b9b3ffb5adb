//! Order status and identifier types.
//!
//! An order moves forward through a fixed sequence of stages and is
//! identified by an immutable number chosen at construction.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used when an order number is derived from a timestamp.
pub const ORDER_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Status of an order.
///
/// Variants are declared in lifecycle order, so the derived ordering is the
/// lifecycle ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
	/// Order is waiting for the customer to confirm it.
	Confirmation,
	/// Order is being assembled.
	Preparation,
	/// Order is being packed.
	Packaging,
	/// Order has been handed to its delivery.
	Shipment,
	/// Order is complete.
	Complete,
}

impl OrderStatus {
	/// Returns the following stage, or `None` for the terminal stage.
	pub fn next(self) -> Option<Self> {
		match self {
			OrderStatus::Confirmation => Some(OrderStatus::Preparation),
			OrderStatus::Preparation => Some(OrderStatus::Packaging),
			OrderStatus::Packaging => Some(OrderStatus::Shipment),
			OrderStatus::Shipment => Some(OrderStatus::Complete),
			OrderStatus::Complete => None,
		}
	}

	/// Human-readable description of the stages an order reports on its own.
	///
	/// Shipment and completion are described by the attached delivery instead,
	/// so those stages have no label here.
	pub fn label(self) -> Option<&'static str> {
		match self {
			OrderStatus::Confirmation => Some("awaiting confirmation"),
			OrderStatus::Preparation => Some("being assembled"),
			OrderStatus::Packaging => Some("being carefully packed"),
			OrderStatus::Shipment | OrderStatus::Complete => None,
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Confirmation => write!(f, "confirmation"),
			OrderStatus::Preparation => write!(f, "preparation"),
			OrderStatus::Packaging => write!(f, "packaging"),
			OrderStatus::Shipment => write!(f, "shipment"),
			OrderStatus::Complete => write!(f, "complete"),
		}
	}
}

/// Immutable order identifier.
///
/// Numbers can be built from free text, from an integer, or from a timestamp
/// rendered as `dd.MM.yyyy HH:mm:ss`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn from_timestamp(timestamp: NaiveDateTime) -> Self {
		Self(timestamp.format(ORDER_TIMESTAMP_FORMAT).to_string())
	}
}

impl fmt::Display for OrderNumber {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for OrderNumber {
	fn from(number: &str) -> Self {
		Self(number.to_string())
	}
}

impl From<String> for OrderNumber {
	fn from(number: String) -> Self {
		Self(number)
	}
}

impl From<i64> for OrderNumber {
	fn from(number: i64) -> Self {
		Self(number.to_string())
	}
}

impl From<NaiveDateTime> for OrderNumber {
	fn from(timestamp: NaiveDateTime) -> Self {
		Self::from_timestamp(timestamp)
	}
}

impl PartialEq<str> for OrderNumber {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for OrderNumber {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	#[test]
	fn test_status_order_follows_lifecycle() {
		assert!(OrderStatus::Confirmation < OrderStatus::Preparation);
		assert!(OrderStatus::Packaging < OrderStatus::Shipment);
		assert!(OrderStatus::Shipment < OrderStatus::Complete);
	}

	#[test]
	fn test_next_walks_every_stage_once() {
		let mut status = OrderStatus::Confirmation;
		let mut visited = vec![status];
		while let Some(next) = status.next() {
			assert!(next > status);
			visited.push(next);
			status = next;
		}
		assert_eq!(visited.len(), 5);
		assert_eq!(status, OrderStatus::Complete);
	}

	#[test]
	fn test_number_from_integer_and_text() {
		assert_eq!(OrderNumber::from(1_i64), "1");
		assert_eq!(OrderNumber::from("XC-12/01/2021"), "XC-12/01/2021");
	}

	#[test]
	fn test_number_from_timestamp() {
		let timestamp = NaiveDate::from_ymd_opt(2021, 1, 12)
			.unwrap()
			.and_hms_opt(9, 5, 7)
			.unwrap();
		assert_eq!(OrderNumber::from(timestamp), "12.01.2021 09:05:07");
	}
}
