//! Configuration loader for scenarios split across several files.
//!
//! `[[orders]]` arrays are concatenated across files; every other top-level
//! section has to come from exactly one file.

use crate::{resolve_env_vars, Config, ConfigError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Section that may appear in several files and is concatenated.
const ORDERS_SECTION: &str = "orders";
/// Directive listing the files to include.
const INCLUDE_DIRECTIVE: &str = "include";

/// Configuration loader that handles multi-file configurations with includes.
pub struct ConfigLoader {
	/// Base path for resolving relative includes
	base_path: PathBuf,
	/// Track loaded files to prevent circular includes
	loaded_files: HashSet<PathBuf>,
	/// Track which sections come from which files for error reporting
	section_sources: HashMap<String, PathBuf>,
}

impl ConfigLoader {
	/// Creates a new ConfigLoader with the given base path.
	pub fn new(base_path: impl AsRef<Path>) -> Self {
		Self {
			base_path: base_path.as_ref().to_path_buf(),
			loaded_files: HashSet::new(),
			section_sources: HashMap::new(),
		}
	}

	/// Loads a configuration file and all its includes.
	pub fn load_config(&mut self, config_path: impl AsRef<Path>) -> Result<Config, ConfigError> {
		let config_path = self.resolve_path(config_path)?;
		let mut main_toml = self.load_file(&config_path)?;
		let includes = extract_includes(&main_toml)?;

		if let Some(table) = main_toml.as_table_mut() {
			table.remove(INCLUDE_DIRECTIVE);
			for key in table.keys() {
				self.section_sources.insert(key.clone(), config_path.clone());
			}
		}

		for include_path in includes {
			let resolved_path = self.resolve_path(&include_path)?;
			let include_toml = self.load_file(&resolved_path)?;
			if include_toml.get(INCLUDE_DIRECTIVE).is_some() {
				return Err(ConfigError::Validation(format!(
					"Nested include in {} is not supported",
					resolved_path.display()
				)));
			}
			self.merge(&mut main_toml, include_toml, &resolved_path)?;
		}

		Config::from_value(main_toml)
	}

	/// Reads a file, resolves environment variables and parses it.
	fn load_file(&mut self, path: &Path) -> Result<toml::Value, ConfigError> {
		// Check for circular includes
		let canonical_path = path.canonicalize().map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Cannot resolve path {}: {}", path.display(), e),
			))
		})?;

		if !self.loaded_files.insert(canonical_path.clone()) {
			return Err(ConfigError::Validation(format!(
				"Circular include detected: {} was already loaded",
				canonical_path.display()
			)));
		}

		let content = std::fs::read_to_string(path)?;
		let resolved = resolve_env_vars(&content)?;
		Ok(toml::from_str(&resolved)?)
	}

	/// Merges an included document into the main one.
	fn merge(
		&mut self,
		main_toml: &mut toml::Value,
		include_toml: toml::Value,
		include_path: &Path,
	) -> Result<(), ConfigError> {
		let (Some(main_table), toml::Value::Table(include_table)) =
			(main_toml.as_table_mut(), include_toml)
		else {
			return Err(ConfigError::Validation(format!(
				"{} is not a TOML table",
				include_path.display()
			)));
		};

		for (key, value) in include_table {
			if key == ORDERS_SECTION {
				let toml::Value::Array(orders) = value else {
					return Err(ConfigError::Validation(format!(
						"'{}' in {} must be an array of tables",
						ORDERS_SECTION,
						include_path.display()
					)));
				};
				let merged = main_table
					.entry(ORDERS_SECTION)
					.or_insert(toml::Value::Array(Vec::new()));
				if let toml::Value::Array(existing) = merged {
					existing.extend(orders);
				}
				continue;
			}

			if let Some(existing_source) = self.section_sources.get(&key) {
				return Err(ConfigError::Validation(format!(
					"Duplicate section '{}' found in {} and {}. \
					Each top-level section must be unique across all configuration files.",
					key,
					existing_source.display(),
					include_path.display()
				)));
			}
			self.section_sources
				.insert(key.clone(), include_path.to_path_buf());
			main_table.insert(key, value);
		}

		Ok(())
	}

	/// Resolves a path relative to the base path.
	fn resolve_path(&self, path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
		let path = path.as_ref();

		let resolved = if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.base_path.join(path)
		};

		if !resolved.exists() {
			return Err(ConfigError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Configuration file not found: {}", resolved.display()),
			)));
		}

		Ok(resolved)
	}
}

/// Extracts include directives from the configuration.
fn extract_includes(toml: &toml::Value) -> Result<Vec<PathBuf>, ConfigError> {
	let Some(include_value) = toml.get(INCLUDE_DIRECTIVE) else {
		return Ok(Vec::new());
	};

	if let Some(path_str) = include_value.as_str() {
		return Ok(vec![PathBuf::from(path_str)]);
	}

	let include_array = include_value.as_array().ok_or_else(|| {
		ConfigError::Validation("Include must be a string or array of strings".into())
	})?;
	include_array
		.iter()
		.map(|item| {
			item.as_str().map(PathBuf::from).ok_or_else(|| {
				ConfigError::Validation("Include array must contain only strings".into())
			})
		})
		.collect()
}
