//! Order processing module for the shop order system.
//!
//! An order moves from confirmation through preparation and packaging to
//! shipment, then completes once its delivery has been received. Querying
//! the status of an order is what moves it forward: every call to
//! [`Order::get_status`] reports the current stage and then advances it.

use serde::Serialize;
use shop_delivery::{Delivery, DeliveryReport};
use shop_types::{
	format_product_table, truncate_id, DeliveryMethod, OrderNumber, OrderStatus, Product,
};
use std::fmt;
use thiserror::Error;
use tracing::instrument;

pub mod collection;
pub mod state;

pub use collection::OrderCollection;
pub use state::is_valid_transition;

/// Errors that can occur during order processing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
	/// The order reached shipment without a delivery to report on.
	#[error("Order {0} has no delivery attached")]
	DeliveryNotAttached(OrderNumber),
	/// The order's delivery has already been received and cannot be replaced.
	#[error("Order {0} delivery is already received")]
	DeliveryLocked(OrderNumber),
	/// A status change that would not move the order forward.
	#[error("Invalid state transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Result of asking an order to be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConfirmOutcome {
	/// The order moved to preparation; `listing` is its product table.
	Accepted { listing: String },
	/// The order has no products and stays unconfirmed.
	Rejected,
	/// The order was already past confirmation.
	Ignored,
}

impl fmt::Display for ConfirmOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfirmOutcome::Accepted { listing } => {
				write!(f, "your order contains:\n{}\nconfirmation received", listing)
			},
			ConfirmOutcome::Rejected => write!(
				f,
				"order is empty, add at least one product\nconfirmation rejected"
			),
			ConfirmOutcome::Ignored => Ok(()),
		}
	}
}

/// What a single order status query observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
	/// Number of the queried order.
	pub number: OrderNumber,
	/// Order status at the moment of reporting.
	pub status: OrderStatus,
	/// Delivery report, present once the order is in shipment or complete.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery: Option<DeliveryReport>,
}

impl fmt::Display for StatusReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "order #{} ", self.number)?;
		match (&self.delivery, self.status.label()) {
			(Some(delivery), _) => write!(f, "{}", delivery),
			(None, Some(label)) => f.write_str(label),
			(None, None) => Ok(()),
		}
	}
}

/// A customer order with its products and delivery.
#[derive(Debug, Clone)]
pub struct Order {
	number: OrderNumber,
	status: OrderStatus,
	delivery: Option<Delivery>,
	items: Vec<Product>,
}

impl Order {
	/// Creates an unconfirmed order with no products and no delivery.
	pub fn new(number: impl Into<OrderNumber>) -> Self {
		Self {
			number: number.into(),
			status: OrderStatus::Confirmation,
			delivery: None,
			items: Vec::new(),
		}
	}

	pub fn number(&self) -> &OrderNumber {
		&self.number
	}

	pub fn status(&self) -> OrderStatus {
		self.status
	}

	pub fn delivery(&self) -> Option<&Delivery> {
		self.delivery.as_ref()
	}

	pub fn items(&self) -> &[Product] {
		&self.items
	}

	/// Attaches a delivery, replacing any earlier one.
	///
	/// Fails once the current delivery has been received or the order is
	/// complete.
	pub fn to_delivery(&mut self, delivery: Delivery) -> Result<(), OrderError> {
		let received = self.delivery.as_ref().is_some_and(Delivery::is_received);
		if self.status == OrderStatus::Complete || received {
			tracing::warn!(
				order = %truncate_id(self.number.as_str()),
				status = %self.status,
				"Delivery replacement rejected"
			);
			return Err(OrderError::DeliveryLocked(self.number.clone()));
		}

		tracing::debug!(
			order = %truncate_id(self.number.as_str()),
			method = %delivery.method(),
			"Delivery attached"
		);
		self.delivery = Some(delivery);
		Ok(())
	}

	pub fn add_product(&mut self, product: Product) {
		self.items.push(product);
	}

	/// Renders the order's products as a table.
	pub fn product_list(&self) -> String {
		format_product_table(&self.items)
	}

	/// Confirms the order, which starts its preparation.
	///
	/// Only an unconfirmed order with at least one product is accepted. An
	/// empty order is rejected and an order already past confirmation is left
	/// untouched.
	#[instrument(skip_all, fields(order = %truncate_id(self.number.as_str())))]
	pub fn confirm(&mut self) -> Result<ConfirmOutcome, OrderError> {
		if self.status != OrderStatus::Confirmation {
			return Ok(ConfirmOutcome::Ignored);
		}

		if self.items.is_empty() {
			tracing::warn!("Confirmation rejected: order is empty");
			return Ok(ConfirmOutcome::Rejected);
		}

		let listing = self.product_list();
		self.transition(OrderStatus::Preparation)?;
		tracing::info!(products = self.items.len(), "Order confirmed");
		Ok(ConfirmOutcome::Accepted { listing })
	}

	/// Reports the current status of the order, then moves it forward.
	///
	/// Store pickup orders start at shipment. Once in shipment the delivery is
	/// queried too, and the order completes on the query that finds the
	/// delivery received.
	#[instrument(skip_all, fields(order = %truncate_id(self.number.as_str())))]
	pub fn get_status(&mut self) -> Result<StatusReport, OrderError> {
		if self.is_store_pickup() && self.status < OrderStatus::Shipment {
			self.transition(OrderStatus::Shipment)?;
		}

		let delivery = match self.status {
			OrderStatus::Shipment | OrderStatus::Complete => {
				let delivery = self.delivery.as_mut().ok_or_else(|| {
					tracing::warn!(status = %self.status, "Status queried without a delivery");
					OrderError::DeliveryNotAttached(self.number.clone())
				})?;
				Some(delivery.get_status())
			},
			_ => None,
		};

		let report = StatusReport {
			number: self.number.clone(),
			status: self.status,
			delivery,
		};

		match self.status {
			OrderStatus::Preparation | OrderStatus::Packaging => {
				if let Some(next) = self.status.next() {
					self.transition(next)?;
				}
			},
			OrderStatus::Shipment if self.delivery.as_ref().is_some_and(Delivery::is_received) => {
				self.transition(OrderStatus::Complete)?;
			},
			_ => {},
		}

		Ok(report)
	}

	fn is_store_pickup(&self) -> bool {
		self.delivery
			.as_ref()
			.is_some_and(|delivery| delivery.method() == DeliveryMethod::Shop)
	}

	fn transition(&mut self, to: OrderStatus) -> Result<(), OrderError> {
		if !is_valid_transition(self.status, to) {
			return Err(OrderError::InvalidTransition {
				from: self.status,
				to,
			});
		}
		tracing::info!(from = %self.status, to = %to, "Order status changed");
		self.status = to;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use shop_types::DeliveryStatus;

	fn products() -> Vec<Product> {
		vec![
			Product::new("tv", "very good"),
			Product::new("heater", "on fire"),
			Product::new("warranty", "so-so"),
		]
	}

	/// Queries the order until it completes and returns every report.
	fn drive_to_completion(order: &mut Order) -> Vec<StatusReport> {
		let mut reports = Vec::new();
		for _ in 0..16 {
			reports.push(order.get_status().unwrap());
			if order.status() == OrderStatus::Complete {
				return reports;
			}
		}
		panic!("order {} never completed", order.number());
	}

	#[test]
	fn test_home_delivery_walkthrough() {
		let mut order = Order::new("1");
		order.to_delivery(Delivery::home("8 Any St")).unwrap();

		for _ in 0..2 {
			let report = order.get_status().unwrap();
			assert_eq!(report.status, OrderStatus::Confirmation);
			assert_eq!(report.to_string(), "order #1 awaiting confirmation");
		}

		assert_eq!(order.confirm().unwrap(), ConfirmOutcome::Rejected);
		assert_eq!(order.status(), OrderStatus::Confirmation);

		for product in products() {
			order.add_product(product);
		}
		let outcome = order.confirm().unwrap();
		assert!(matches!(outcome, ConfirmOutcome::Accepted { ref listing } if listing.contains("heater")));
		assert_eq!(order.status(), OrderStatus::Preparation);

		let statuses: Vec<OrderStatus> = drive_to_completion(&mut order)
			.iter()
			.map(|report| report.status)
			.collect();
		assert_eq!(
			statuses,
			vec![
				OrderStatus::Preparation,
				OrderStatus::Packaging,
				OrderStatus::Shipment,
				OrderStatus::Shipment,
			]
		);

		let last = order.get_status().unwrap();
		assert_eq!(last.status, OrderStatus::Complete);
		assert_eq!(last.to_string(), "order #1 handed over");

		assert_eq!(order.confirm().unwrap(), ConfirmOutcome::Ignored);
		assert_eq!(order.get_status().unwrap().status, OrderStatus::Complete);
	}

	#[test]
	fn test_empty_order_is_never_confirmed() {
		let mut order = Order::new(2_i64);
		for _ in 0..5 {
			assert_eq!(order.confirm().unwrap(), ConfirmOutcome::Rejected);
			assert_eq!(order.status(), OrderStatus::Confirmation);
		}
	}

	#[test]
	fn test_confirmation_is_ignored_once_advanced() {
		let mut order = Order::new("a");
		order.to_delivery(Delivery::pick_point("13 Box Lane")).unwrap();
		order.add_product(Product::new("doll", "recursive"));
		order.confirm().unwrap();
		order.get_status().unwrap();
		assert_eq!(order.status(), OrderStatus::Packaging);

		order.add_product(Product::new("another doll", "smaller"));
		assert_eq!(order.confirm().unwrap(), ConfirmOutcome::Ignored);
		assert_eq!(order.status(), OrderStatus::Packaging);
	}

	#[test]
	fn test_shop_order_jumps_to_shipment() {
		let mut order = Order::new("XC-12/01/2021");
		order.to_delivery(Delivery::shop("Trade Ave")).unwrap();

		let first = order.get_status().unwrap();
		assert_eq!(first.status, OrderStatus::Shipment);
		let delivery = first.delivery.unwrap();
		assert_eq!(delivery.status, DeliveryStatus::Waiting);
		assert!(delivery.message.unwrap().contains("Trade Ave"));

		// Collected on the first query, so the order is already complete.
		assert_eq!(order.status(), OrderStatus::Complete);
		assert_eq!(order.confirm().unwrap(), ConfirmOutcome::Ignored);
		assert_eq!(order.get_status().unwrap().to_string(), "order #XC-12/01/2021 accepted");
	}

	#[test]
	fn test_completion_waits_for_delivery() {
		let mut order = Order::new("pp");
		order.to_delivery(Delivery::pick_point("13 Box Lane")).unwrap();
		order.add_product(Product::new("doll", "recursive"));
		order.confirm().unwrap();

		let mut previous = order.status();
		for _ in 0..12 {
			let report = order.get_status().unwrap();
			assert!(order.status() >= previous);
			previous = order.status();

			let received = order.delivery().is_some_and(Delivery::is_received);
			assert_eq!(order.status() == OrderStatus::Complete, received);
			if let Some(delivery) = report.delivery {
				assert!(report.status >= OrderStatus::Shipment);
				assert_ne!(delivery.message, None);
			}
		}
		assert_eq!(order.status(), OrderStatus::Complete);
	}

	#[test]
	fn test_home_delivery_never_reports_waiting() {
		let mut order = Order::new("h");
		order.to_delivery(Delivery::home("8 Any St")).unwrap();
		order.add_product(Product::new("tv", "very good"));
		order.confirm().unwrap();

		for _ in 0..10 {
			let report = order.get_status().unwrap();
			if let Some(delivery) = report.delivery {
				assert_ne!(delivery.status, DeliveryStatus::Waiting);
			}
		}
	}

	#[test]
	fn test_missing_delivery_is_reported_at_shipment() {
		let mut order = Order::new("no-delivery");
		order.add_product(Product::new("tv", "very good"));
		order.confirm().unwrap();
		order.get_status().unwrap();
		order.get_status().unwrap();
		assert_eq!(order.status(), OrderStatus::Shipment);

		let err = order.get_status().unwrap_err();
		assert_eq!(err, OrderError::DeliveryNotAttached("no-delivery".into()));
		assert_eq!(order.status(), OrderStatus::Shipment);

		order.to_delivery(Delivery::home("8 Any St")).unwrap();
		assert_eq!(order.get_status().unwrap().status, OrderStatus::Shipment);
	}

	#[test]
	fn test_delivery_cannot_be_replaced_once_received() {
		let mut order = Order::new("x");
		order.to_delivery(Delivery::shop("Trade Ave")).unwrap();
		order.get_status().unwrap();
		assert_eq!(order.status(), OrderStatus::Complete);

		let err = order.to_delivery(Delivery::home("h")).unwrap_err();
		assert_eq!(err, OrderError::DeliveryLocked("x".into()));

		let report = order.get_status().unwrap();
		assert_eq!(report.status, OrderStatus::Complete);
		assert!(order.delivery().is_some_and(Delivery::is_received));
		assert_eq!(report.to_string(), "order #x accepted");
	}

	#[test]
	fn test_delivery_can_be_replaced_before_receipt() {
		let mut order = Order::new("r");
		order.to_delivery(Delivery::home("8 Any St")).unwrap();
		order.to_delivery(Delivery::pick_point("13 Box Lane")).unwrap();
		assert_eq!(
			order.delivery().map(Delivery::method),
			Some(DeliveryMethod::PickPoint)
		);
	}

	#[test]
	fn test_report_serializes_without_missing_delivery() {
		let mut order = Order::new(7_i64);
		let json = serde_json::to_value(order.get_status().unwrap()).unwrap();
		assert_eq!(json["number"], "7");
		assert_eq!(json["status"], "confirmation");
		assert!(json.get("delivery").is_none());
	}
}
