pub mod apply;
pub mod facets;
pub mod listing;
pub mod merchandise;
pub mod request;
pub mod session;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use merch_config::{Config, RankingApi};
use merch_domain::{Account, MerchandiseRequest, RankingResult, Store};
use merch_providers::{ranking, session as remote_session};

pub use apply::apply_ranking;
pub use facets::FacetBuilder;
pub use listing::{FallbackReason, ListingOutcome, PERSONALIZED_SORT_KEY};
pub use merchandise::RankingFetched;
pub use request::{CUSTOMER_COOKIE, PREVIEW_COOKIE};
pub use session::{LastResultCache, LastResultState, RenderPass};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Request-scoped cookie access; implementations are bound to one inbound
/// request and carried on the `RenderPass`.
pub trait CookieStore
where
	Self: Send + Sync,
{
	fn cookie(&self, name: &str) -> Option<String>;
}

/// Store-scoped display path lookup for categories.
pub trait CategoryNamer
where
	Self: Send + Sync,
{
	/// `Ok(None)` means the category resolved but has no usable path;
	/// lookup failures surface as errors and the caller decides whether
	/// they are fatal.
	fn category_path(&self, category_id: &str, store: &Store) -> Result<Option<String>>;
}

pub trait AccountResolver
where
	Self: Send + Sync,
{
	fn find_account(&self, store: &Store) -> Option<Account>;
}

pub trait SessionMinter
where
	Self: Send + Sync,
{
	fn create_session<'a>(
		&'a self,
		cfg: &'a RankingApi,
		store: &'a Store,
		account: &'a Account,
	) -> BoxFuture<'a, Result<String>>;
}

pub trait RankingProvider
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		cfg: &'a RankingApi,
		request: &'a MerchandiseRequest,
	) -> BoxFuture<'a, Result<RankingResult>>;
}

/// Fire-and-forget domain event consumer.
pub trait EventSink
where
	Self: Send + Sync,
{
	fn ranking_fetched(&self, event: &RankingFetched);
}

/// The collaborators the hosting platform wires in once per process.
#[derive(Clone)]
pub struct Platform {
	pub categories: Arc<dyn CategoryNamer>,
	pub accounts: Arc<dyn AccountResolver>,
	pub sessions: Arc<dyn SessionMinter>,
	pub ranking: Arc<dyn RankingProvider>,
	pub events: Arc<dyn EventSink>,
}
impl Platform {
	/// Wires the default remote transport for ranking and session minting;
	/// the platform-bound collaborators have no default.
	pub fn new(
		categories: Arc<dyn CategoryNamer>,
		accounts: Arc<dyn AccountResolver>,
		events: Arc<dyn EventSink>,
	) -> Self {
		let remote = Arc::new(RemoteRanking);

		Self { categories, accounts, sessions: remote.clone(), ranking: remote, events }
	}

	pub fn with_providers(
		categories: Arc<dyn CategoryNamer>,
		accounts: Arc<dyn AccountResolver>,
		sessions: Arc<dyn SessionMinter>,
		ranking: Arc<dyn RankingProvider>,
		events: Arc<dyn EventSink>,
	) -> Self {
		Self { categories, accounts, sessions, ranking, events }
	}
}

/// Account resolver backed by the `[[stores]]` configuration table.
pub struct ConfigAccounts {
	stores: Vec<merch_config::StoreAccount>,
}
impl ConfigAccounts {
	pub fn new(cfg: &Config) -> Self {
		Self { stores: cfg.stores.clone() }
	}
}
impl AccountResolver for ConfigAccounts {
	fn find_account(&self, store: &Store) -> Option<Account> {
		self.stores
			.iter()
			.find(|entry| entry.code == store.code)
			.map(|entry| Account::new(entry.account_id.clone(), entry.capabilities.clone()))
	}
}

struct RemoteRanking;
impl SessionMinter for RemoteRanking {
	fn create_session<'a>(
		&'a self,
		cfg: &'a RankingApi,
		store: &'a Store,
		account: &'a Account,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(remote_session::create_session(cfg, store, account).await?) })
	}
}
impl RankingProvider for RemoteRanking {
	fn fetch<'a>(
		&'a self,
		cfg: &'a RankingApi,
		request: &'a MerchandiseRequest,
	) -> BoxFuture<'a, Result<RankingResult>> {
		Box::pin(async move { Ok(ranking::fetch_ranking(cfg, request).await?) })
	}
}

pub struct MerchandiseService {
	pub cfg: Config,
	pub platform: Platform,
}
impl MerchandiseService {
	pub fn new(cfg: Config, platform: Platform) -> Self {
		Self { cfg, platform }
	}

	pub(crate) fn facet_builder(&self) -> FacetBuilder {
		FacetBuilder::new(
			self.cfg.catalog.brand_attribute.clone(),
			self.platform.categories.clone(),
		)
	}
}
