use merch_catalog::ProductQuery;
use merch_domain::RankingResult;

use crate::{Error, MerchandiseService, apply, session::RenderPass};

/// Sort option key that opts a listing into personalized ordering.
pub const PERSONALIZED_SORT_KEY: &str = "personalized";

/// Outcome of one listing pass: either the query was rewritten to the
/// ranked order, or the platform's native listing stands, with the reason
/// made explicit instead of an implicit catch-and-continue.
#[derive(Debug)]
pub enum ListingOutcome {
	Ranked { result: RankingResult },
	Native { reason: FallbackReason },
}
impl ListingOutcome {
	pub fn is_ranked(&self) -> bool {
		matches!(self, Self::Ranked { .. })
	}

	fn native(reason: FallbackReason) -> Self {
		Self::Native { reason }
	}
}

#[derive(Debug)]
pub enum FallbackReason {
	AlreadyHandled,
	UnsupportedEngine { engine: String },
	SortOrderNotPersonalized,
	NotCategoryPage,
	RankingFailed { error: Error },
	EmptyResult,
}

impl MerchandiseService {
	/// Entry point for the platform's listing hook. Always returns control
	/// to the caller; every failure path keeps the native listing intact
	/// and is visible only in logs and the returned reason.
	pub async fn rank_listing<Q>(
		&self,
		pass: &mut RenderPass,
		query: &mut Q,
		page_number: u32,
		limit: i64,
	) -> ListingOutcome
	where
		Q: ProductQuery,
	{
		// These two skips do not consume the pass: the hook may legally
		// fire again for the same render.
		if pass.is_processed() {
			tracing::debug!(store = %pass.store.code, "Listing already handled in this pass; skipping.");

			return ListingOutcome::native(FallbackReason::AlreadyHandled);
		}
		if !pass.engine.supports_explicit_ordering() {
			tracing::debug!(
				store = %pass.store.code,
				engine = pass.engine.name(),
				"Search engine cannot order by explicit id lists; skipping."
			);

			return ListingOutcome::native(FallbackReason::UnsupportedEngine {
				engine: pass.engine.name().to_string(),
			});
		}

		let outcome = self.try_rank(pass, query, page_number, limit).await;

		pass.mark_processed();

		outcome
	}

	async fn try_rank<Q>(
		&self,
		pass: &mut RenderPass,
		query: &mut Q,
		page_number: u32,
		limit: i64,
	) -> ListingOutcome
	where
		Q: ProductQuery,
	{
		if pass.sort_order != PERSONALIZED_SORT_KEY {
			tracing::debug!(
				store = %pass.store.code,
				sort_order = %pass.sort_order,
				"Active sort order is not personalized; keeping the native listing."
			);

			return ListingOutcome::native(FallbackReason::SortOrderNotPersonalized);
		}
		if !pass.category_page {
			tracing::debug!(store = %pass.store.code, "Not a category listing; keeping the native listing.");

			return ListingOutcome::native(FallbackReason::NotCategoryPage);
		}

		let facets = self.facet_builder().build(&pass.store, &pass.active_filters);
		let result = match self.fetch_personalised(pass, facets, page_number, limit).await {
			Ok(result) => result,
			Err(err) => {
				tracing::error!(
					store = %pass.store.code,
					error = %err,
					"Ranking fetch failed; falling back to the native listing."
				);

				return ListingOutcome::native(FallbackReason::RankingFailed { error: err });
			},
		};

		if apply::apply_ranking(&result, query) {
			ListingOutcome::Ranked { result }
		} else {
			ListingOutcome::native(FallbackReason::EmptyResult)
		}
	}
}
