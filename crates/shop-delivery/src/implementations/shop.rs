//! Pickup at a store.
//!
//! The parcel is already at the store when the delivery is created, so it
//! starts out waiting and never passes through delivering.

use shop_types::DeliveryStatus;

pub const INITIAL_STATUS: DeliveryStatus = DeliveryStatus::Waiting;

pub fn skips(status: DeliveryStatus) -> bool {
	status == DeliveryStatus::Delivering
}

pub fn describe(status: DeliveryStatus, address: &str) -> Option<String> {
	match status {
		DeliveryStatus::Waiting => Some(format!("awaiting at store at address: {}", address)),
		DeliveryStatus::Received => Some("accepted".to_string()),
		DeliveryStatus::JustTransferred | DeliveryStatus::Delivering => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_never_phrases_delivering() {
		assert!(skips(DeliveryStatus::Delivering));
		assert_eq!(describe(DeliveryStatus::Delivering, "x"), None);
	}

	#[test]
	fn test_waiting_shows_address() {
		assert_eq!(
			describe(DeliveryStatus::Waiting, "Trade Ave").as_deref(),
			Some("awaiting at store at address: Trade Ave")
		);
	}
}
