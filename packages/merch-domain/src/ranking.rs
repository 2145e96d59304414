use serde_json::Value;

use crate::{facet::FacetBundle, identity::Account};

/// Fully-specified request for one batch of ranked product ids. Built once
/// per fetch by request assembly and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct MerchandiseRequest {
	pub account: Account,
	pub facets: FacetBundle,
	pub customer_id: String,
	pub category: Option<String>,
	/// 0-based page of the listing being rendered.
	pub page_number: u32,
	pub limit: u32,
	pub preview_mode: bool,
	/// Opaque batching token from the previous response, or empty to
	/// restart ranking for this page/limit combination.
	pub continuation_token: String,
}

/// Ordered ranking outcome for one remote call. Ids are kept as raw wire
/// values; index 0 is the best-ranked product.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
	pub product_ids: Vec<Value>,
	pub total_count: u64,
	pub continuation_token: Option<String>,
}
impl RankingResult {
	/// The ranked ids as strings, best first. `None` when any element is
	/// neither a string nor a number; ranking is advisory and callers
	/// treat that the same as an empty result.
	pub fn scalar_ids(&self) -> Option<Vec<String>> {
		self.product_ids
			.iter()
			.map(|id| match id {
				Value::String(id) => Some(id.clone()),
				Value::Number(id) => Some(id.to_string()),
				_ => None,
			})
			.collect()
	}

	pub fn token(&self) -> &str {
		self.continuation_token.as_deref().unwrap_or_default()
	}
}
