//! Order state transition table.
//!
//! Every status change an order makes is checked against this table, which
//! only contains forward moves. Store pickup orders may jump straight to
//! shipment from any stage before it.

use once_cell::sync::Lazy;
use shop_types::OrderStatus;
use std::collections::{HashMap, HashSet};

/// Checks if a state transition is valid
pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
	// Static transition table - each state maps to allowed next states
	static TRANSITIONS: Lazy<HashMap<OrderStatus, HashSet<OrderStatus>>> = Lazy::new(|| {
		let mut m = HashMap::new();
		m.insert(
			OrderStatus::Confirmation,
			HashSet::from([OrderStatus::Preparation, OrderStatus::Shipment]),
		);
		m.insert(
			OrderStatus::Preparation,
			HashSet::from([OrderStatus::Packaging, OrderStatus::Shipment]),
		);
		m.insert(OrderStatus::Packaging, HashSet::from([OrderStatus::Shipment]));
		m.insert(OrderStatus::Shipment, HashSet::from([OrderStatus::Complete]));
		m.insert(OrderStatus::Complete, HashSet::new()); // terminal
		m
	});

	TRANSITIONS
		.get(&from)
		.is_some_and(|allowed| allowed.contains(&to))
}
