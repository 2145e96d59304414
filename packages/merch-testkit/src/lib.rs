//! In-memory fakes for the platform collaborators, used by service tests
//! and by host adapters that need a dry-run wiring.

use std::{
	collections::{HashMap, VecDeque},
	sync::Mutex,
};

use serde_json::{Map, Value};
use uuid::Uuid;

use merch_catalog::ProductQuery;
use merch_config::{Catalog, Config, RankingApi, StoreAccount};
use merch_domain::{Account, Capability, MerchandiseRequest, RankingResult, Store};
use merch_service::{
	AccountResolver, BoxFuture, CategoryNamer, CookieStore, Error, EventSink, RankingFetched,
	RankingProvider, Result, SessionMinter,
};

pub fn test_store() -> Store {
	Store::new(1, "default")
}

pub fn test_config() -> Config {
	Config {
		catalog: Catalog { brand_attribute: "manufacturer".to_string(), max_product_limit: 250 },
		ranking: RankingApi {
			api_base: "http://localhost".to_string(),
			api_key: "key".to_string(),
			path: "/v1/category/rank".to_string(),
			session_path: "/v1/session".to_string(),
			timeout_ms: 1_000,
			default_headers: Map::new(),
		},
		stores: vec![StoreAccount {
			code: "default".to_string(),
			store_id: 1,
			account_id: "shop-1234".to_string(),
			capabilities: vec![Capability::CategoryRanking],
		}],
	}
}

pub fn ranking_result(ids: &[&str], token: Option<&str>) -> RankingResult {
	RankingResult {
		product_ids: ids.iter().map(|id| Value::String(id.to_string())).collect(),
		total_count: ids.len() as u64,
		continuation_token: token.map(str::to_string),
	}
}

#[derive(Debug, Default)]
pub struct MemoryCookies {
	values: HashMap<String, String>,
}
impl MemoryCookies {
	pub fn set(mut self, name: &str, value: &str) -> Self {
		self.values.insert(name.to_string(), value.to_string());

		self
	}
}
impl CookieStore for MemoryCookies {
	fn cookie(&self, name: &str) -> Option<String> {
		self.values.get(name).cloned()
	}
}

#[derive(Debug, Default)]
pub struct StaticCategories {
	paths: HashMap<String, String>,
	failing: bool,
}
impl StaticCategories {
	pub fn with_path(mut self, category_id: &str, path: &str) -> Self {
		self.paths.insert(category_id.to_string(), path.to_string());

		self
	}

	/// Every lookup fails, as if the category repository were unreachable.
	pub fn failing() -> Self {
		Self { paths: HashMap::new(), failing: true }
	}
}
impl CategoryNamer for StaticCategories {
	fn category_path(&self, category_id: &str, _store: &Store) -> Result<Option<String>> {
		if self.failing {
			return Err(Error::CategoryLookup {
				message: format!("category {category_id} not found"),
			});
		}

		Ok(self.paths.get(category_id).cloned())
	}
}

#[derive(Debug, Default)]
pub struct StaticAccounts {
	accounts: HashMap<String, Account>,
}
impl StaticAccounts {
	pub fn with_account(mut self, store_code: &str, account: Account) -> Self {
		self.accounts.insert(store_code.to_string(), account);

		self
	}
}
impl AccountResolver for StaticAccounts {
	fn find_account(&self, store: &Store) -> Option<Account> {
		self.accounts.get(&store.code).cloned()
	}
}

/// Mints the same session id for every shopper.
#[derive(Debug)]
pub struct FixedSessions {
	id: String,
}
impl FixedSessions {
	pub fn new(id: &str) -> Self {
		Self { id: id.to_string() }
	}

	pub fn random() -> Self {
		Self { id: Uuid::new_v4().simple().to_string() }
	}

	pub fn id(&self) -> &str {
		&self.id
	}
}
impl SessionMinter for FixedSessions {
	fn create_session<'a>(
		&'a self,
		_cfg: &'a RankingApi,
		_store: &'a Store,
		_account: &'a Account,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(self.id.clone()) })
	}
}

#[derive(Debug, Default)]
pub struct FailingSessions;
impl SessionMinter for FailingSessions {
	fn create_session<'a>(
		&'a self,
		_cfg: &'a RankingApi,
		_store: &'a Store,
		_account: &'a Account,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			Err(Error::Provider { message: "scripted session failure".to_string() })
		})
	}
}

/// Scripted ranking provider: pops queued outcomes and captures every
/// request it receives.
#[derive(Debug, Default)]
pub struct StubRanking {
	results: Mutex<VecDeque<Result<RankingResult>>>,
	requests: Mutex<Vec<MerchandiseRequest>>,
}
impl StubRanking {
	pub fn push_result(&self, result: RankingResult) {
		self.results.lock().unwrap_or_else(|err| err.into_inner()).push_back(Ok(result));
	}

	pub fn push_error(&self, message: &str) {
		self.results
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push_back(Err(Error::Provider { message: message.to_string() }));
	}

	pub fn requests(&self) -> Vec<MerchandiseRequest> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl RankingProvider for StubRanking {
	fn fetch<'a>(
		&'a self,
		_cfg: &'a RankingApi,
		request: &'a MerchandiseRequest,
	) -> BoxFuture<'a, Result<RankingResult>> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(request.clone());

		let next = self.results.lock().unwrap_or_else(|err| err.into_inner()).pop_front();

		Box::pin(async move {
			next.unwrap_or_else(|| {
				Err(Error::Provider { message: "no scripted ranking result left".to_string() })
			})
		})
	}
}

#[derive(Debug, Default)]
pub struct RecordingEvents {
	events: Mutex<Vec<RankingFetched>>,
}
impl RecordingEvents {
	pub fn take(&self) -> Vec<RankingFetched> {
		std::mem::take(&mut *self.events.lock().unwrap_or_else(|err| err.into_inner()))
	}
}
impl EventSink for RecordingEvents {
	fn ranking_fetched(&self, event: &RankingFetched) {
		self.events.lock().unwrap_or_else(|err| err.into_inner()).push(event.clone());
	}
}

/// Executable in-memory listing query for exercising rewrites end to end.
/// Rows keep their native order until a ranking is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryQuery {
	rows: Vec<String>,
	restriction: Option<Vec<String>>,
	ranking: Option<Vec<String>>,
}
impl MemoryQuery {
	pub fn new(rows: &[&str]) -> Self {
		Self {
			rows: rows.iter().map(|row| row.to_string()).collect(),
			restriction: None,
			ranking: None,
		}
	}

	pub fn execute(&self) -> Vec<String> {
		let visible: Vec<String> = self
			.rows
			.iter()
			.filter(|row| {
				self.restriction.as_ref().map(|ids| ids.contains(row)).unwrap_or(true)
			})
			.cloned()
			.collect();

		match &self.ranking {
			None => visible,
			Some(ranked) => {
				let mut ordered: Vec<String> =
					ranked.iter().filter(|id| visible.contains(id)).cloned().collect();

				for row in visible {
					if !ordered.contains(&row) {
						ordered.push(row);
					}
				}

				ordered
			},
		}
	}
}
impl ProductQuery for MemoryQuery {
	fn order_by_ranked_ids(&mut self, ranked_ids: &[String]) {
		self.ranking = Some(ranked_ids.to_vec());
	}

	fn restrict_to_ids(&mut self, ids: &[String]) {
		self.restriction = Some(ids.to_vec());
	}
}
