//! Configuration module for the shop order system.
//!
//! A configuration file describes a scenario: the orders to create, the
//! delivery each of them uses and the products that go into them. Files are
//! TOML, may reference environment variables with `${VAR}` or
//! `${VAR:-default}`, and may pull in other files:
//!
//! - Use `include = ["orders.toml", "more-orders.toml"]` to include other files
//! - `[[orders]]` entries from every file are concatenated in include order
//! - Every other top-level section must be unique across all files

mod loader;

use regex::Regex;
use serde::{Deserialize, Serialize};
use shop_types::{DeliveryMethod, OrderNumber, Product};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub use loader::ConfigLoader;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for a scenario run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Settings of the service running the scenario.
	pub service: ServiceConfig,
	/// Orders to create, in the order they are run.
	#[serde(default)]
	pub orders: Vec<OrderConfig>,
}

/// Settings of the service running the scenario.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
	/// Identifier of this run, used in logs.
	pub id: String,
	/// Upper bound on status queries spent driving one order to completion.
	/// Defaults to 16 if not specified.
	#[serde(default = "default_max_status_queries")]
	pub max_status_queries: u32,
}

/// Returns the default bound on status queries per order.
fn default_max_status_queries() -> u32 {
	16
}

/// One order of the scenario.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderConfig {
	/// Order number. When absent the order is numbered with the time it is created.
	pub number: Option<OrderNumberConfig>,
	/// Delivery attached to the order.
	pub delivery: DeliveryConfig,
	/// Products added to the order after its first confirmation attempt.
	#[serde(default)]
	pub products: Vec<Product>,
}

/// An order number as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OrderNumberConfig {
	Numeric(i64),
	Text(String),
}

impl From<OrderNumberConfig> for OrderNumber {
	fn from(number: OrderNumberConfig) -> Self {
		match number {
			OrderNumberConfig::Numeric(number) => OrderNumber::from(number),
			OrderNumberConfig::Text(number) => OrderNumber::from(number),
		}
	}
}

/// Delivery of one order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
	/// How the parcel reaches the customer.
	pub method: DeliveryMethod,
	/// Free-text address of the customer, pickup point or store.
	pub address: String,
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match cap.get(2) {
				Some(default) => default.as_str().to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, following include directives.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

		let mut loader = ConfigLoader::new(base_dir);
		let file_name = path.file_name().ok_or_else(|| {
			ConfigError::Validation(format!("Invalid path: {}", path.display()))
		})?;
		loader.load_config(file_name)
	}

	/// Builds a configuration from an already resolved TOML document.
	pub(crate) fn from_value(value: toml::Value) -> Result<Self, ConfigError> {
		let config = value.try_into::<Config>()?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration.
	///
	/// - Ensures the service ID is not empty
	/// - Bounds the status query limit to 1..=1000
	/// - Requires at least one order
	/// - Rejects empty delivery addresses, empty product names and
	///   duplicate order numbers
	fn validate(&self) -> Result<(), ConfigError> {
		if self.service.id.is_empty() {
			return Err(ConfigError::Validation("Service ID cannot be empty".into()));
		}
		if self.service.max_status_queries == 0 {
			return Err(ConfigError::Validation(
				"max_status_queries must be at least 1".into(),
			));
		}
		if self.service.max_status_queries > 1000 {
			return Err(ConfigError::Validation(
				"max_status_queries cannot exceed 1000".into(),
			));
		}

		if self.orders.is_empty() {
			return Err(ConfigError::Validation(
				"At least one order must be configured".into(),
			));
		}

		let mut numbers = HashSet::new();
		for (index, order) in self.orders.iter().enumerate() {
			let label = match &order.number {
				Some(number) => OrderNumber::from(number.clone()).to_string(),
				None => format!("#{}", index + 1),
			};

			if order.delivery.address.trim().is_empty() {
				return Err(ConfigError::Validation(format!(
					"Order {} must have a delivery address",
					label
				)));
			}
			if order.products.iter().any(|p| p.name().trim().is_empty()) {
				return Err(ConfigError::Validation(format!(
					"Order {} has a product without a name",
					label
				)));
			}
			if order.number.is_some() && !numbers.insert(label.clone()) {
				return Err(ConfigError::Validation(format!(
					"Duplicate order number '{}'",
					label
				)));
			}
		}

		Ok(())
	}
}

/// Parse configuration from a TOML string.
///
/// Environment variables are resolved before parsing. Include directives are
/// not followed; use [`Config::from_file`] for that.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let value: toml::Value = toml::from_str(&resolved)?;
		Config::from_value(value)
	}
}
