use std::time::Duration as StdDuration;

use reqwest::Client;
use serde_json::Value;

use merch_config::RankingApi;
use merch_domain::{Account, Store};

use crate::{Error, Result};

/// Mints a new, untracked visitor session on the ranking service for
/// shoppers that carry no tracking cookie yet.
pub async fn create_session(cfg: &RankingApi, store: &Store, account: &Account) -> Result<String> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.session_path);
	let body = serde_json::json!({ "account": account.account_id, "store": store.code });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_session_response(json)
}

fn parse_session_response(json: Value) -> Result<String> {
	json.get("session_id")
		.and_then(|value| value.as_str())
		.filter(|id| !id.is_empty())
		.map(str::to_string)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Session response is missing a session_id.".to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_session_id() {
		let json = serde_json::json!({ "session_id": "visit-42" });

		assert_eq!(parse_session_response(json).expect("parse failed"), "visit-42");
	}

	#[test]
	fn empty_or_missing_session_id_is_an_error() {
		assert!(parse_session_response(serde_json::json!({ "session_id": "" })).is_err());
		assert!(parse_session_response(serde_json::json!({})).is_err());
	}
}
