use std::sync::Arc;

use merch_catalog::SearchEngine;
use merch_domain::{ActiveFilter, RankingResult, Store};

use crate::{CookieStore, listing::PERSONALIZED_SORT_KEY};

/// Context for one rendering pass. The hosting adapter builds a fresh one
/// per inbound listing render; the processed guard and the last-result
/// cache never outlive it, so concurrent passes cannot interfere.
pub struct RenderPass {
	pub store: Store,
	pub cookies: Arc<dyn CookieStore>,
	pub active_filters: Vec<ActiveFilter>,
	pub sort_order: String,
	pub category_page: bool,
	/// Id of the category being browsed, when there is one.
	pub current_category: Option<String>,
	pub engine: SearchEngine,
	processed: bool,
	last: LastResultCache,
}
impl RenderPass {
	pub fn new(store: Store, cookies: Arc<dyn CookieStore>) -> Self {
		Self {
			store,
			cookies,
			active_filters: Vec::new(),
			sort_order: PERSONALIZED_SORT_KEY.to_string(),
			category_page: true,
			current_category: None,
			engine: SearchEngine::MySql,
			processed: false,
			last: LastResultCache::default(),
		}
	}

	pub fn is_processed(&self) -> bool {
		self.processed
	}

	pub(crate) fn mark_processed(&mut self) {
		self.processed = true;
	}

	pub fn last_results(&self) -> &LastResultCache {
		&self.last
	}

	pub(crate) fn record_result(&mut self, result: RankingResult, limit: u32, page: u32) {
		self.last.record(result, limit, page);
	}
}

/// Remembers the most recent ranking outcome within one pass together with
/// the pagination coordinates used to obtain it. Starts empty, is written
/// once per fetch and never resets; a new pass gets a new instance.
#[derive(Debug, Default)]
pub struct LastResultCache {
	state: Option<LastResultState>,
}
impl LastResultCache {
	pub fn record(&mut self, result: RankingResult, limit: u32, page: u32) {
		self.state = Some(LastResultState { result, limit, page });
	}

	pub fn peek(&self) -> Option<&LastResultState> {
		self.state.as_ref()
	}

	/// The recorded continuation token, granted only when both pagination
	/// coordinates match the recorded fetch. Any drift in page or limit
	/// must restart ranking with an empty token.
	pub fn continuation_token(&self, limit: u32, page: u32) -> String {
		match self.peek() {
			Some(state) if state.limit == limit && state.page == page =>
				state.result.token().to_string(),
			_ => String::new(),
		}
	}
}

#[derive(Debug)]
pub struct LastResultState {
	pub result: RankingResult,
	pub limit: u32,
	pub page: u32,
}
