use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use serde_json::Value;

/// Frontend input kind of a layered-navigation attribute filter, as
/// reported by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendInput {
	Price,
	Select,
	Multiselect,
	Date,
	Boolean,
	Other(String),
}

/// One shopper-selected navigation constraint, read from the platform's
/// filter state.
#[derive(Debug, Clone)]
pub enum ActiveFilter {
	Category { category_id: String },
	Attribute { code: String, input: FrontendInput, label: Option<String>, value: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
	pub min: f64,
	pub max: f64,
}

/// Normalized, service-facing filter bag. Boolean values are stored as the
/// literal strings "Yes"/"No"; a custom-field key holds exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<PriceRange>,
	pub categories: BTreeSet<String>,
	pub brands: Vec<String>,
	pub custom_fields: HashMap<String, Vec<String>>,
}
impl FilterSet {
	pub fn set_price(&mut self, min: f64, max: f64) {
		self.price = Some(PriceRange { min, max });
	}

	pub fn add_category(&mut self, category: String) {
		self.categories.insert(category);
	}

	pub fn set_brands(&mut self, brands: Vec<String>) {
		self.brands = brands;
	}

	pub fn set_custom_field(&mut self, name: &str, values: Vec<String>) {
		self.custom_fields.insert(name.to_string(), values);
	}

	pub fn is_empty(&self) -> bool {
		self.price.is_none()
			&& self.categories.is_empty()
			&& self.brands.is_empty()
			&& self.custom_fields.is_empty()
	}
}

/// Immutable include/exclude pair handed to request assembly. The exclude
/// set is carried for protocol symmetry and is empty today.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetBundle {
	include: FilterSet,
	exclude: FilterSet,
}
impl FacetBundle {
	pub fn new(include: FilterSet, exclude: FilterSet) -> Self {
		Self { include, exclude }
	}

	pub fn include(&self) -> &FilterSet {
		&self.include
	}

	pub fn exclude(&self) -> &FilterSet {
		&self.exclude
	}
}

pub fn yes_no(value: bool) -> &'static str {
	if value { "Yes" } else { "No" }
}

/// Truthiness of a raw platform value, matching loose boolean casting:
/// empty strings, "0", zero and empty arrays are false.
pub fn truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(value) => *value,
		Value::Number(value) => value.as_f64().map(|n| n != 0.0).unwrap_or(false),
		Value::String(value) => !value.is_empty() && value != "0",
		Value::Array(values) => !values.is_empty(),
		Value::Object(_) => true,
	}
}

/// Coerces a raw filter value into a list of strings. Scalars become a
/// one-element list, booleans become ["Yes"]/["No"], lists of scalars pass
/// through. Objects, nulls and lists with non-scalar elements yield `None`.
pub fn string_list(value: &Value) -> Option<Vec<String>> {
	match value {
		Value::String(value) => Some(vec![value.clone()]),
		Value::Number(value) => Some(vec![value.to_string()]),
		Value::Bool(value) => Some(vec![yes_no(*value).to_string()]),
		Value::Array(values) => values.iter().map(scalar_string).collect(),
		_ => None,
	}
}

/// Min/max bounds of an array-like price value. Non-array values and
/// arrays with non-numeric elements yield `None`.
pub fn price_bounds(value: &Value) -> Option<PriceRange> {
	let values = value.as_array()?;
	let mut bounds: Option<PriceRange> = None;

	for value in values {
		let number = numeric(value)?;
		bounds = Some(match bounds {
			None => PriceRange { min: number, max: number },
			Some(range) => PriceRange { min: range.min.min(number), max: range.max.max(number) },
		});
	}

	bounds
}

fn scalar_string(value: &Value) -> Option<String> {
	match value {
		Value::String(value) => Some(value.clone()),
		Value::Number(value) => Some(value.to_string()),
		Value::Bool(value) => Some(yes_no(*value).to_string()),
		_ => None,
	}
}

fn numeric(value: &Value) -> Option<f64> {
	match value {
		Value::Number(value) => value.as_f64(),
		Value::String(value) => value.trim().parse().ok(),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scalars_become_single_element_lists() {
		assert_eq!(string_list(&Value::String("Red".to_string())), Some(vec!["Red".to_string()]));
		assert_eq!(string_list(&serde_json::json!(42)), Some(vec!["42".to_string()]));
	}

	#[test]
	fn booleans_become_yes_no_strings() {
		assert_eq!(string_list(&Value::Bool(true)), Some(vec!["Yes".to_string()]));
		assert_eq!(string_list(&Value::Bool(false)), Some(vec!["No".to_string()]));
	}

	#[test]
	fn scalar_lists_pass_through() {
		let value = serde_json::json!(["Red", "Blue"]);

		assert_eq!(string_list(&value), Some(vec!["Red".to_string(), "Blue".to_string()]));
	}

	#[test]
	fn objects_and_nulls_are_not_coercible() {
		assert_eq!(string_list(&serde_json::json!({ "nested": true })), None);
		assert_eq!(string_list(&Value::Null), None);
		assert_eq!(string_list(&serde_json::json!([{ "nested": true }])), None);
	}

	#[test]
	fn price_bounds_order_min_max() {
		let range = price_bounds(&serde_json::json!([100, 50])).expect("bounds");

		assert_eq!(range.min, 50.0);
		assert_eq!(range.max, 100.0);
	}

	#[test]
	fn price_bounds_accept_numeric_strings() {
		let range = price_bounds(&serde_json::json!(["25.5", "75"])).expect("bounds");

		assert_eq!(range.min, 25.5);
		assert_eq!(range.max, 75.0);
	}

	#[test]
	fn price_bounds_reject_non_numeric_values() {
		assert_eq!(price_bounds(&serde_json::json!(["cheap", 10])), None);
		assert_eq!(price_bounds(&serde_json::json!(50)), None);
		assert_eq!(price_bounds(&serde_json::json!([])), None);
	}

	#[test]
	fn truthiness_matches_loose_casting() {
		assert!(truthy(&serde_json::json!(true)));
		assert!(truthy(&serde_json::json!("1")));
		assert!(truthy(&serde_json::json!("false")));
		assert!(!truthy(&serde_json::json!("0")));
		assert!(!truthy(&serde_json::json!("")));
		assert!(!truthy(&serde_json::json!(0)));
		assert!(!truthy(&Value::Null));
	}

	#[test]
	fn custom_field_keys_hold_one_list() {
		let mut set = FilterSet::default();

		set.set_custom_field("color", vec!["Red".to_string()]);
		set.set_custom_field("color", vec!["Blue".to_string()]);

		assert_eq!(set.custom_fields.get("color"), Some(&vec!["Blue".to_string()]));
	}
}
