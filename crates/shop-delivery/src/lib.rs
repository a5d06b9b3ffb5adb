//! Delivery module for the shop order system.
//!
//! A delivery holds the customer's address and a status that moves forward
//! every time it is queried. The delivery method is a closed set: all methods
//! share one advance step and differ only in which status they skip and how
//! they phrase each status. The per-method tables live in
//! [`implementations`].

use serde::Serialize;
use shop_types::{DeliveryMethod, DeliveryStatus};
use std::fmt;

/// Per-method skip rules and phrasing.
pub mod implementations {
	pub mod home;
	pub mod pick_point;
	pub mod shop;
}

use implementations::{home, pick_point, shop};

/// Message every method reports while the parcel has just been handed over.
pub const JUST_TRANSFERRED_MESSAGE: &str = "just handed over to the delivery service";

/// What a single status query observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
	/// Method of the queried delivery.
	pub method: DeliveryMethod,
	/// Status at the moment of reporting, before the query advanced it.
	pub status: DeliveryStatus,
	/// Text for that status, if the method phrases it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl fmt::Display for DeliveryReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.message {
			Some(message) => f.write_str(message),
			None => Ok(()),
		}
	}
}

/// A delivery of one order to one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
	method: DeliveryMethod,
	address: String,
	status: DeliveryStatus,
}

impl Delivery {
	/// Creates a delivery in the initial status of its method.
	pub fn new(method: DeliveryMethod, address: impl Into<String>) -> Self {
		let status = match method {
			DeliveryMethod::Home => home::INITIAL_STATUS,
			DeliveryMethod::PickPoint => pick_point::INITIAL_STATUS,
			DeliveryMethod::Shop => shop::INITIAL_STATUS,
		};
		Self {
			method,
			address: address.into(),
			status,
		}
	}

	pub fn home(address: impl Into<String>) -> Self {
		Self::new(DeliveryMethod::Home, address)
	}

	pub fn pick_point(address: impl Into<String>) -> Self {
		Self::new(DeliveryMethod::PickPoint, address)
	}

	pub fn shop(address: impl Into<String>) -> Self {
		Self::new(DeliveryMethod::Shop, address)
	}

	pub fn method(&self) -> DeliveryMethod {
		self.method
	}

	pub fn address(&self) -> &str {
		&self.address
	}

	pub fn status(&self) -> DeliveryStatus {
		self.status
	}

	pub fn is_received(&self) -> bool {
		self.status == DeliveryStatus::Received
	}

	/// Reports the current status, then moves the delivery forward.
	///
	/// The delivery advances one step unless it is already received. If that
	/// step lands on a status the method skips, it advances once more, so a
	/// skipped status is never reported.
	pub fn get_status(&mut self) -> DeliveryReport {
		let report = DeliveryReport {
			method: self.method,
			status: self.status,
			message: self.describe(),
		};

		if self.status < DeliveryStatus::Received {
			self.status = self.status.next();
			if self.skips(self.status) {
				self.status = self.status.next();
			}
			tracing::debug!(
				method = %self.method,
				from = %report.status,
				to = %self.status,
				"Delivery advanced"
			);
		}

		report
	}

	/// Describes the current status in the phrasing of this delivery's method.
	pub fn describe(&self) -> Option<String> {
		if self.status == DeliveryStatus::JustTransferred {
			return Some(JUST_TRANSFERRED_MESSAGE.to_string());
		}

		match self.method {
			DeliveryMethod::Home => home::describe(self.status, &self.address),
			DeliveryMethod::PickPoint => pick_point::describe(self.status, &self.address),
			DeliveryMethod::Shop => shop::describe(self.status, &self.address),
		}
	}

	fn skips(&self, status: DeliveryStatus) -> bool {
		match self.method {
			DeliveryMethod::Home => home::skips(status),
			DeliveryMethod::PickPoint => pick_point::skips(status),
			DeliveryMethod::Shop => shop::skips(status),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Queries the delivery until it is received and once more, collecting
	/// every reported status.
	fn drain(delivery: &mut Delivery) -> Vec<DeliveryStatus> {
		let mut seen = Vec::new();
		for _ in 0..8 {
			seen.push(delivery.get_status().status);
			if seen.last() == Some(&DeliveryStatus::Received) {
				break;
			}
		}
		seen
	}

	#[test]
	fn test_home_skips_waiting() {
		let mut delivery = Delivery::home("8 Any St");
		assert_eq!(
			drain(&mut delivery),
			vec![
				DeliveryStatus::JustTransferred,
				DeliveryStatus::Delivering,
				DeliveryStatus::Received,
			]
		);
	}

	#[test]
	fn test_pick_point_visits_every_status() {
		let mut delivery = Delivery::pick_point("13 Box Lane");
		assert_eq!(
			drain(&mut delivery),
			vec![
				DeliveryStatus::JustTransferred,
				DeliveryStatus::Delivering,
				DeliveryStatus::Waiting,
				DeliveryStatus::Received,
			]
		);
	}

	#[test]
	fn test_shop_starts_waiting() {
		let mut delivery = Delivery::shop("Mall");
		assert_eq!(delivery.status(), DeliveryStatus::Waiting);
		assert_eq!(
			drain(&mut delivery),
			vec![DeliveryStatus::Waiting, DeliveryStatus::Received]
		);
	}

	#[test]
	fn test_received_is_terminal() {
		let mut delivery = Delivery::home("8 Any St");
		drain(&mut delivery);
		for _ in 0..3 {
			let report = delivery.get_status();
			assert_eq!(report.status, DeliveryStatus::Received);
			assert!(delivery.is_received());
		}
	}

	#[test]
	fn test_just_transferred_message_is_shared() {
		for delivery in [Delivery::home("a"), Delivery::pick_point("b")] {
			assert_eq!(delivery.describe().as_deref(), Some(JUST_TRANSFERRED_MESSAGE));
		}
	}

	#[test]
	fn test_report_shows_address_where_phrased() {
		let mut delivery = Delivery::pick_point("13 Box Lane");
		delivery.get_status();
		delivery.get_status();
		let report = delivery.get_status();

		assert_eq!(report.status, DeliveryStatus::Waiting);
		assert!(report.to_string().contains("13 Box Lane"));
	}
}
