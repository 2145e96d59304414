use serde_json::Value;

use merch_domain::Capability;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No account is configured for store {store_code:?}.")]
	MissingAccount { store_code: String },
	#[error("Account for store {store_code:?} lacks the {capability} capability.")]
	MissingCapability { store_code: String, capability: Capability },
	#[error("Failed to create a tracking session for store {store_code:?}: {message}")]
	SessionCreation { store_code: String, message: String },
	#[error("Cannot normalize facet value {value} for field {field:?} on store {store_code:?}.")]
	FacetValue { store_code: String, field: String, value: Value },
	#[error("Category lookup failed: {message}")]
	CategoryLookup { message: String },
	#[error("Ranking provider error: {message}")]
	Provider { message: String },
}
impl From<merch_providers::Error> for Error {
	fn from(err: merch_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
