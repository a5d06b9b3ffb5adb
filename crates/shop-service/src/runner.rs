//! Scenario runner.
//!
//! Walks every configured order through its lifecycle using only the public
//! order operations, and hands each observation to an [`EventSink`].

use chrono::Local;
use serde::Serialize;
use shop_config::{Config, OrderConfig};
use shop_delivery::Delivery;
use shop_order::{ConfirmOutcome, Order, OrderCollection, OrderError, StatusReport};
use shop_types::{truncate_id, DeliveryMethod, OrderNumber, OrderStatus, Product};
use std::io::Write;
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur while running a scenario.
#[derive(Debug, Error)]
pub enum RunnerError {
	#[error("Order error: {0}")]
	Order(#[from] OrderError),
	#[error("Order {number} did not complete within {limit} status queries")]
	QueryLimitExceeded { number: OrderNumber, limit: u32 },
	#[error("Order at position {0} not found")]
	OrderNotFound(usize),
	#[error("Output error: {0}")]
	Output(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Something that happened to an order during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
	DeliveryAttached {
		number: OrderNumber,
		method: DeliveryMethod,
		address: String,
	},
	ProductAdded {
		number: OrderNumber,
		product: Product,
	},
	Confirmation {
		number: OrderNumber,
		#[serde(flatten)]
		outcome: ConfirmOutcome,
	},
	Status(StatusReport),
	OrderFinished {
		number: OrderNumber,
		status: OrderStatus,
	},
}

/// Destination of run events.
pub trait EventSink {
	fn emit(&mut self, event: &RunEvent) -> Result<(), RunnerError>;
}

/// Writes events as human-readable lines.
pub struct TextSink<W: Write> {
	out: W,
}

impl<W: Write> TextSink<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}
}

impl<W: Write> EventSink for TextSink<W> {
	fn emit(&mut self, event: &RunEvent) -> Result<(), RunnerError> {
		match event {
			RunEvent::DeliveryAttached {
				number,
				method,
				address,
			} => writeln!(self.out, "order #{} will be delivered ({}) to {}", number, method, address)?,
			RunEvent::ProductAdded { number, product } => {
				writeln!(self.out, "order #{} += {}", number, product.name())?
			},
			RunEvent::Confirmation { outcome, .. } => {
				if *outcome != ConfirmOutcome::Ignored {
					writeln!(self.out, "{}", outcome)?;
				}
			},
			RunEvent::Status(report) => writeln!(self.out, "{}", report)?,
			RunEvent::OrderFinished { .. } => writeln!(self.out)?,
		}
		Ok(())
	}
}

/// Writes one JSON object per event.
pub struct JsonSink<W: Write> {
	out: W,
}

impl<W: Write> JsonSink<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}
}

impl<W: Write> EventSink for JsonSink<W> {
	fn emit(&mut self, event: &RunEvent) -> Result<(), RunnerError> {
		serde_json::to_writer(&mut self.out, event)?;
		writeln!(self.out)?;
		Ok(())
	}
}

/// Creates the orders of a scenario, numbered as configured.
///
/// Orders without a configured number are numbered with the current local time.
pub fn build_orders(config: &Config) -> Vec<Order> {
	config
		.orders
		.iter()
		.map(|order| match &order.number {
			Some(number) => Order::new(number.clone()),
			None => Order::new(Local::now().naive_local()),
		})
		.collect()
}

/// Runs every order of the scenario to completion.
#[instrument(skip_all, fields(run = %config.service.id))]
pub fn run_scenario(config: &Config, sink: &mut dyn EventSink) -> Result<(), RunnerError> {
	let mut orders = build_orders(config);
	let mut collection = OrderCollection::new(&mut orders);
	tracing::info!(orders = collection.len(), "Running scenario");

	for (index, order_config) in config.orders.iter().enumerate() {
		let position = index + 1;
		let order = collection
			.position_mut(position)
			.ok_or(RunnerError::OrderNotFound(position))?;
		run_order(order, order_config, config.service.max_status_queries, sink)?;
	}

	tracing::info!("Scenario finished");
	Ok(())
}

/// Walks one order through its lifecycle.
///
/// The status is queried twice before the first confirmation, which happens
/// before any product is added, so it is only accepted for orders that
/// already moved on by themselves.
#[instrument(skip_all, fields(order = %truncate_id(order.number().as_str())))]
fn run_order(
	order: &mut Order,
	order_config: &OrderConfig,
	max_status_queries: u32,
	sink: &mut dyn EventSink,
) -> Result<(), RunnerError> {
	let number = order.number().clone();

	let delivery = Delivery::new(
		order_config.delivery.method,
		order_config.delivery.address.clone(),
	);
	sink.emit(&RunEvent::DeliveryAttached {
		number: number.clone(),
		method: delivery.method(),
		address: delivery.address().to_string(),
	})?;
	order.to_delivery(delivery)?;

	for _ in 0..2 {
		sink.emit(&RunEvent::Status(order.get_status()?))?;
	}
	confirm(order, sink)?;

	for product in &order_config.products {
		order.add_product(product.clone());
		sink.emit(&RunEvent::ProductAdded {
			number: number.clone(),
			product: product.clone(),
		})?;
	}
	if !order_config.products.is_empty() {
		confirm(order, sink)?;
	}

	let mut queries = 0;
	while order.status() < OrderStatus::Complete {
		if queries == max_status_queries {
			return Err(RunnerError::QueryLimitExceeded {
				number,
				limit: max_status_queries,
			});
		}
		sink.emit(&RunEvent::Status(order.get_status()?))?;
		queries += 1;
	}

	sink.emit(&RunEvent::Status(order.get_status()?))?;
	confirm(order, sink)?;
	sink.emit(&RunEvent::Status(order.get_status()?))?;

	tracing::info!(queries, "Order complete");
	sink.emit(&RunEvent::OrderFinished {
		number,
		status: order.status(),
	})
}

fn confirm(order: &mut Order, sink: &mut dyn EventSink) -> Result<(), RunnerError> {
	let outcome = order.confirm()?;
	sink.emit(&RunEvent::Confirmation {
		number: order.number().clone(),
		outcome,
	})
}
