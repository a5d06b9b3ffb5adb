//! Delivery to a pickup point.

use shop_types::DeliveryStatus;

pub const INITIAL_STATUS: DeliveryStatus = DeliveryStatus::JustTransferred;

pub fn skips(_status: DeliveryStatus) -> bool {
	false
}

pub fn describe(status: DeliveryStatus, address: &str) -> Option<String> {
	match status {
		DeliveryStatus::Delivering => Some("sent to pickup point".to_string()),
		DeliveryStatus::Waiting => Some(format!("waiting at pickup point at address: {}", address)),
		DeliveryStatus::Received => Some("collected".to_string()),
		DeliveryStatus::JustTransferred => None,
	}
}
