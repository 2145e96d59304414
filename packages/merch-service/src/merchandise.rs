use merch_domain::{FacetBundle, RankingResult};

use crate::{MerchandiseService, Result, session::RenderPass};

/// Published once per successful remote call so external consumers
/// (analytics, telemetry) can react; nothing is read back.
#[derive(Debug, Clone)]
pub struct RankingFetched {
	pub result: RankingResult,
	pub limit: u32,
	pub page_number: u32,
}

impl MerchandiseService {
	/// Fetches one batch of ranked product ids, records it on the pass and
	/// notifies event consumers. Transport errors propagate unmodified;
	/// the core performs no retries.
	pub async fn fetch_personalised(
		&self,
		pass: &mut RenderPass,
		facets: FacetBundle,
		page_number: u32,
		limit: i64,
	) -> Result<RankingResult> {
		let request = self.assemble_request(pass, facets, page_number, limit).await?;
		let result = self.platform.ranking.fetch(&self.cfg.ranking, &request).await?;

		tracing::debug!(
			store = %pass.store.code,
			category = request.category.as_deref().unwrap_or(""),
			page_number = request.page_number,
			limit = request.limit,
			fetched = result.product_ids.len(),
			total = result.total_count,
			"Fetched ranked product ids."
		);

		pass.record_result(result.clone(), request.limit, request.page_number);
		self.platform.events.ranking_fetched(&RankingFetched {
			result: result.clone(),
			limit: request.limit,
			page_number: request.page_number,
		});

		Ok(result)
	}
}
