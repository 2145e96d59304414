use merch_config::{Config, Error, validate};

const SAMPLE_CONFIG_TOML: &str = r#"
[catalog]
brand_attribute   = "manufacturer"
max_product_limit = 250

[ranking]
api_base        = "https://api.example.com/"
api_key         = "key"
path            = "/v1/category/rank"
session_path    = "/v1/session"
timeout_ms      = 3000
default_headers = {}

[[stores]]
code         = "default"
store_id     = 1
account_id   = "shop-1234"
capabilities = ["category-ranking"]
"#;

fn sample_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

#[test]
fn sample_config_is_valid() {
	let cfg = sample_config();

	assert!(validate(&cfg).is_ok());
	assert_eq!(cfg.store("default").map(|store| store.account_id.as_str()), Some("shop-1234"));
	assert!(cfg.store("missing").is_none());
}

#[test]
fn rejects_zero_product_limit() {
	let mut cfg = sample_config();

	cfg.catalog.max_product_limit = 0;

	assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn rejects_empty_brand_attribute() {
	let mut cfg = sample_config();

	cfg.catalog.brand_attribute = "  ".to_string();

	assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn rejects_empty_api_key() {
	let mut cfg = sample_config();

	cfg.ranking.api_key = String::new();

	assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn rejects_relative_paths() {
	let mut cfg = sample_config();

	cfg.ranking.path = "v1/category/rank".to_string();

	assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn rejects_duplicate_store_codes() {
	let mut cfg = sample_config();
	let duplicate = cfg.stores[0].clone();

	cfg.stores.push(duplicate);

	assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
}

#[test]
fn rejects_unknown_capability_at_parse_time() {
	let raw = SAMPLE_CONFIG_TOML.replace("category-ranking", "fancy-sorting");

	assert!(toml::from_str::<Config>(&raw).is_err());
}
