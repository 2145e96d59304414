use std::time::Duration as StdDuration;

use reqwest::Client;
use serde_json::Value;

use merch_config::RankingApi;
use merch_domain::{MerchandiseRequest, RankingResult};

use crate::{Error, Result};

/// Identifier scheme tag telling the ranking service the customer id is a
/// first-party tracking cookie id.
const IDENTIFIER_BY_CID: &str = "by-cid";

pub async fn fetch_ranking(
	cfg: &RankingApi,
	request: &MerchandiseRequest,
) -> Result<RankingResult> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&request_body(request))
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_ranking_response(json)
}

fn request_body(request: &MerchandiseRequest) -> Value {
	serde_json::json!({
		"account": request.account.account_id,
		"customer_id": request.customer_id,
		"category": request.category,
		"page": request.page_number,
		"include_filters": request.facets.include(),
		"exclude_filters": request.facets.exclude(),
		"identifier": IDENTIFIER_BY_CID,
		"preview": request.preview_mode,
		"limit": request.limit,
		"batch_token": request.continuation_token,
	})
}

fn parse_ranking_response(json: Value) -> Result<RankingResult> {
	let product_ids = json
		.get("products")
		.or_else(|| json.get("result_set"))
		.and_then(|value| value.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Ranking response is missing a products array.".to_string(),
		})?
		.clone();
	let total_count = json
		.get("total")
		.or_else(|| json.get("total_primary_count"))
		.and_then(|value| value.as_u64())
		.unwrap_or(product_ids.len() as u64);
	let continuation_token =
		json.get("batch_token").and_then(|value| value.as_str()).map(str::to_string);

	Ok(RankingResult { product_ids, total_count, continuation_token })
}

#[cfg(test)]
mod tests {
	use super::*;

	use merch_domain::{Account, Capability, FacetBundle};

	#[test]
	fn parses_products_total_and_token() {
		let json = serde_json::json!({
			"products": ["10", "20", 30],
			"total": 120,
			"batch_token": "batch-2"
		});
		let result = parse_ranking_response(json).expect("parse failed");

		assert_eq!(result.product_ids.len(), 3);
		assert_eq!(result.total_count, 120);
		assert_eq!(result.continuation_token.as_deref(), Some("batch-2"));
	}

	#[test]
	fn total_defaults_to_product_count() {
		let json = serde_json::json!({ "result_set": ["10", "20"] });
		let result = parse_ranking_response(json).expect("parse failed");

		assert_eq!(result.total_count, 2);
		assert_eq!(result.continuation_token, None);
	}

	#[test]
	fn missing_products_array_is_an_error() {
		assert!(parse_ranking_response(serde_json::json!({ "total": 3 })).is_err());
	}

	#[test]
	fn request_body_carries_the_full_protocol_shape() {
		let request = MerchandiseRequest {
			account: Account::new("shop-1", vec![Capability::CategoryRanking]),
			facets: FacetBundle::default(),
			customer_id: "cid-1".to_string(),
			category: Some("Electronics/Phones".to_string()),
			page_number: 2,
			limit: 24,
			preview_mode: true,
			continuation_token: "batch-2".to_string(),
		};
		let body = request_body(&request);

		assert_eq!(body["account"], "shop-1");
		assert_eq!(body["customer_id"], "cid-1");
		assert_eq!(body["category"], "Electronics/Phones");
		assert_eq!(body["page"], 2);
		assert_eq!(body["identifier"], "by-cid");
		assert_eq!(body["preview"], true);
		assert_eq!(body["limit"], 24);
		assert_eq!(body["batch_token"], "batch-2");
		assert!(body["include_filters"]["categories"].is_array());
		assert!(body["exclude_filters"]["custom_fields"].is_object());
	}
}
