mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, RankingApi, StoreAccount};

use std::{collections::HashSet, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.catalog.brand_attribute.trim().is_empty() {
		return Err(Error::Validation {
			message: "catalog.brand_attribute must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.max_product_limit == 0 {
		return Err(Error::Validation {
			message: "catalog.max_product_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "ranking.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.ranking.api_key.trim().is_empty() {
		return Err(Error::Validation { message: "ranking.api_key must be non-empty.".to_string() });
	}

	for (label, path) in [("ranking.path", &cfg.ranking.path), ("ranking.session_path", &cfg.ranking.session_path)]
	{
		if !path.starts_with('/') {
			return Err(Error::Validation {
				message: format!("{label} must start with a slash."),
			});
		}
	}

	if cfg.ranking.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "ranking.timeout_ms must be greater than zero.".to_string(),
		});
	}

	let mut codes = HashSet::new();

	for store in &cfg.stores {
		if store.code.trim().is_empty() {
			return Err(Error::Validation {
				message: "stores.code must be non-empty.".to_string(),
			});
		}
		if store.account_id.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("stores.account_id must be non-empty for store {:?}.", store.code),
			});
		}
		if !codes.insert(store.code.as_str()) {
			return Err(Error::Validation {
				message: format!("stores.code {:?} is configured more than once.", store.code),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.ranking.api_base.ends_with('/') {
		cfg.ranking.api_base.pop();
	}
}
