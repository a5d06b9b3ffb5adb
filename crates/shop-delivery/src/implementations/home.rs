//! Courier delivery to the customer's address.
//!
//! A courier hands the parcel over directly, so there is no waiting stage.

use shop_types::DeliveryStatus;

pub const INITIAL_STATUS: DeliveryStatus = DeliveryStatus::JustTransferred;

pub fn skips(status: DeliveryStatus) -> bool {
	status == DeliveryStatus::Waiting
}

pub fn describe(status: DeliveryStatus, address: &str) -> Option<String> {
	match status {
		DeliveryStatus::Delivering => Some(format!("en route to address: {}", address)),
		DeliveryStatus::Received => Some("handed over".to_string()),
		DeliveryStatus::JustTransferred | DeliveryStatus::Waiting => None,
	}
}
