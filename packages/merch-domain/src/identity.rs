use serde::{Deserialize, Serialize};

/// One storefront view. Category paths and account configuration are
/// scoped to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
	pub id: u32,
	pub code: String,
}
impl Store {
	pub fn new(id: u32, code: impl Into<String>) -> Self {
		Self { id, code: code.into() }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
	CategoryRanking,
}
impl Capability {
	pub fn as_key(&self) -> &'static str {
		match self {
			Self::CategoryRanking => "category-ranking",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		match key {
			"category-ranking" => Some(Self::CategoryRanking),
			_ => None,
		}
	}
}
impl std::fmt::Display for Capability {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_key())
	}
}

/// A merchandising account tied to one store, with the protocol
/// capabilities it has been granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
	pub account_id: String,
	pub capabilities: Vec<Capability>,
}
impl Account {
	pub fn new(account_id: impl Into<String>, capabilities: Vec<Capability>) -> Self {
		Self { account_id: account_id.into(), capabilities }
	}

	pub fn supports(&self, capability: Capability) -> bool {
		self.capabilities.contains(&capability)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn capability_keys_round_trip() {
		assert_eq!(Capability::from_key("category-ranking"), Some(Capability::CategoryRanking));
		assert_eq!(Capability::CategoryRanking.as_key(), "category-ranking");
		assert_eq!(Capability::from_key("unknown"), None);
	}

	#[test]
	fn account_supports_granted_capability() {
		let account = Account::new("shop-1", vec![Capability::CategoryRanking]);

		assert!(account.supports(Capability::CategoryRanking));

		let bare = Account::new("shop-2", Vec::new());

		assert!(!bare.supports(Capability::CategoryRanking));
	}
}
