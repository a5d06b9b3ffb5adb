//! Lookup wrapper over a set of orders.

use crate::Order;

/// Borrowed view over orders that were built elsewhere.
///
/// Positions are 1-based. Lookups that miss return `None`.
pub struct OrderCollection<'a> {
	orders: &'a mut [Order],
}

impl<'a> OrderCollection<'a> {
	pub fn new(orders: &'a mut [Order]) -> Self {
		Self { orders }
	}

	/// Returns the order at a 1-based position.
	pub fn position(&self, position: usize) -> Option<&Order> {
		position
			.checked_sub(1)
			.and_then(|index| self.orders.get(index))
	}

	pub fn position_mut(&mut self, position: usize) -> Option<&mut Order> {
		position
			.checked_sub(1)
			.and_then(|index| self.orders.get_mut(index))
	}

	/// Returns the first order with the given number.
	pub fn by_number(&self, number: &str) -> Option<&Order> {
		self.orders
			.iter()
			.find(|order| order.number().as_str() == number)
	}

	pub fn by_number_mut(&mut self, number: &str) -> Option<&mut Order> {
		self.orders
			.iter_mut()
			.find(|order| order.number().as_str() == number)
	}

	pub fn len(&self) -> usize {
		self.orders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.orders.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Order> {
		self.orders.iter()
	}
}
