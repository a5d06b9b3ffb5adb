//! Delivery status and delivery method types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Status of a delivery.
///
/// Variants are declared in lifecycle order; a delivery never moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
	/// Parcel has just been handed to the delivery service.
	JustTransferred,
	/// Parcel is on its way.
	Delivering,
	/// Parcel is waiting for the customer.
	Waiting,
	/// Parcel has been received by the customer.
	Received,
}

impl DeliveryStatus {
	/// Returns the following status, saturating at `Received`.
	pub fn next(self) -> Self {
		match self {
			DeliveryStatus::JustTransferred => DeliveryStatus::Delivering,
			DeliveryStatus::Delivering => DeliveryStatus::Waiting,
			DeliveryStatus::Waiting | DeliveryStatus::Received => DeliveryStatus::Received,
		}
	}
}

impl fmt::Display for DeliveryStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DeliveryStatus::JustTransferred => write!(f, "just_transferred"),
			DeliveryStatus::Delivering => write!(f, "delivering"),
			DeliveryStatus::Waiting => write!(f, "waiting"),
			DeliveryStatus::Received => write!(f, "received"),
		}
	}
}

/// How a parcel reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
	/// Courier delivery to the customer's address.
	Home,
	/// Delivery to a pickup point the customer collects from.
	PickPoint,
	/// Pickup at a store.
	Shop,
}

impl DeliveryMethod {
	/// Returns the string representation used in configuration files.
	pub fn as_str(&self) -> &'static str {
		match self {
			DeliveryMethod::Home => "home",
			DeliveryMethod::PickPoint => "pick_point",
			DeliveryMethod::Shop => "shop",
		}
	}

	/// Returns an iterator over all delivery methods.
	pub fn all() -> impl Iterator<Item = Self> {
		[Self::Home, Self::PickPoint, Self::Shop].into_iter()
	}
}

impl fmt::Display for DeliveryMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a delivery method name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown delivery method: {0}")]
pub struct UnknownDeliveryMethod(pub String);

impl FromStr for DeliveryMethod {
	type Err = UnknownDeliveryMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::all()
			.find(|method| method.as_str() == s)
			.ok_or_else(|| UnknownDeliveryMethod(s.to_string()))
	}
}
