use serde::Deserialize;
use serde_json::{Map, Value};

use merch_domain::Capability;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub catalog: Catalog,
	pub ranking: RankingApi,
	#[serde(default)]
	pub stores: Vec<StoreAccount>,
}
impl Config {
	pub fn store(&self, code: &str) -> Option<&StoreAccount> {
		self.stores.iter().find(|store| store.code == code)
	}
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
	/// Attribute code mapped to the ranking protocol's brand facet.
	pub brand_attribute: String,
	/// Upper bound for one batch of ranked product ids; out-of-range page
	/// sizes are clamped to this value.
	pub max_product_limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct RankingApi {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub session_path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreAccount {
	pub code: String,
	pub store_id: u32,
	pub account_id: String,
	#[serde(default)]
	pub capabilities: Vec<Capability>,
}
