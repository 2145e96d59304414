use merch_domain::{Capability, FacetBundle, MerchandiseRequest};

use crate::{Error, MerchandiseService, Result, session::RenderPass};

/// First-party cookie carrying the shopper's tracking id.
pub const CUSTOMER_COOKIE: &str = "merch_cid";
/// Cookie toggling merchandiser preview mode on the ranking service.
pub const PREVIEW_COOKIE: &str = "merch_preview";

impl MerchandiseService {
	pub(crate) async fn assemble_request(
		&self,
		pass: &RenderPass,
		facets: FacetBundle,
		page_number: u32,
		limit: i64,
	) -> Result<MerchandiseRequest> {
		let store = &pass.store;
		let account = self
			.platform
			.accounts
			.find_account(store)
			.ok_or_else(|| Error::MissingAccount { store_code: store.code.clone() })?;

		if !account.supports(Capability::CategoryRanking) {
			return Err(Error::MissingCapability {
				store_code: store.code.clone(),
				capability: Capability::CategoryRanking,
			});
		}

		// Shoppers without a tracking cookie get an untracked session
		// minted on the spot.
		let customer_id = match pass.cookies.cookie(CUSTOMER_COOKIE) {
			Some(id) => id,
			None => self
				.platform
				.sessions
				.create_session(&self.cfg.ranking, store, &account)
				.await
				.map_err(|err| Error::SessionCreation {
					store_code: store.code.clone(),
					message: err.to_string(),
				})?,
		};
		let limit = sanitize_limit(&store.code, self.cfg.catalog.max_product_limit, limit);
		// Lookup failures are fatal here, unlike inside facet building.
		let category = match pass.current_category.as_deref() {
			Some(category_id) => self.platform.categories.category_path(category_id, store)?,
			None => None,
		};
		let preview_mode =
			pass.cookies.cookie(PREVIEW_COOKIE).map(|value| cookie_truthy(&value)).unwrap_or(false);
		let continuation_token = pass.last_results().continuation_token(limit, page_number);

		Ok(MerchandiseRequest {
			account,
			facets,
			customer_id,
			category,
			page_number,
			limit,
			preview_mode,
			continuation_token,
		})
	}
}

/// Non-positive or above-maximum page sizes fall back to the configured
/// maximum.
fn sanitize_limit(store_code: &str, max_limit: u32, limit: i64) -> u32 {
	if limit <= 0 || limit > max_limit as i64 {
		tracing::debug!(
			store = %store_code,
			requested = limit,
			effective = max_limit,
			"Replacing out-of-range listing limit."
		);

		return max_limit;
	}

	limit as u32
}

fn cookie_truthy(value: &str) -> bool {
	!value.is_empty() && value != "0"
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn out_of_range_limits_fall_back_to_the_maximum() {
		assert_eq!(sanitize_limit("default", 250, 0), 250);
		assert_eq!(sanitize_limit("default", 250, -24), 250);
		assert_eq!(sanitize_limit("default", 250, 251), 250);
	}

	#[test]
	fn in_range_limits_pass_through() {
		assert_eq!(sanitize_limit("default", 250, 1), 1);
		assert_eq!(sanitize_limit("default", 250, 24), 24);
		assert_eq!(sanitize_limit("default", 250, 250), 250);
	}

	#[test]
	fn preview_cookie_truthiness_matches_loose_casting() {
		assert!(cookie_truthy("1"));
		assert!(cookie_truthy("true"));
		assert!(!cookie_truthy("0"));
		assert!(!cookie_truthy(""));
	}
}
