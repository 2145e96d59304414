use std::sync::Arc;

use serde_json::Value;

use merch_domain::{ActiveFilter, FacetBundle, FilterSet, FrontendInput, Store, facet};

use crate::{CategoryNamer, Error, Result};

/// Builds the normalized facet bundle from the shopper's active layered
/// navigation filters. The brand attribute code is resolved once at
/// construction.
pub struct FacetBuilder {
	brand_attribute: String,
	categories: Arc<dyn CategoryNamer>,
}
impl FacetBuilder {
	pub fn new(brand_attribute: String, categories: Arc<dyn CategoryNamer>) -> Self {
		Self { brand_attribute: brand_attribute.to_ascii_lowercase(), categories }
	}

	/// Never fails. A filter value that cannot be normalized stops the
	/// population loop; whatever was collected before it is kept and the
	/// failure is only logged.
	pub fn build(&self, store: &Store, filters: &[ActiveFilter]) -> FacetBundle {
		let mut include = FilterSet::default();

		if let Err(err) = self.populate(&mut include, store, filters) {
			tracing::warn!(
				store = %store.code,
				error = %err,
				"Facet normalization failed; continuing with partial facets."
			);
		}

		FacetBundle::new(include, FilterSet::default())
	}

	fn populate(
		&self,
		include: &mut FilterSet,
		store: &Store,
		filters: &[ActiveFilter],
	) -> Result<()> {
		for filter in filters {
			self.map_include_filter(include, store, filter)?;
		}

		Ok(())
	}

	fn map_include_filter(
		&self,
		include: &mut FilterSet,
		store: &Store,
		filter: &ActiveFilter,
	) -> Result<()> {
		match filter {
			ActiveFilter::Category { category_id } => {
				// A missing category never aborts normalization.
				let path = match self.categories.category_path(category_id, store) {
					Ok(Some(path)) => path,
					Ok(None) => {
						tracing::debug!(
							store = %store.code,
							category_id = %category_id,
							"Could not resolve category filter to a path; skipping."
						);

						return Ok(());
					},
					Err(err) => {
						tracing::debug!(
							store = %store.code,
							category_id = %category_id,
							error = %err,
							"Category lookup failed for a filter; skipping."
						);

						return Ok(());
					},
				};

				self.map_value(include, store, "category", &Value::String(path))
			},
			ActiveFilter::Attribute { code, input, label, value } => {
				let value = match input {
					FrontendInput::Price => value.clone(),
					FrontendInput::Select | FrontendInput::Multiselect => match label {
						Some(label) => Value::String(label.clone()),
						None => Value::Null,
					},
					FrontendInput::Boolean => Value::Bool(facet::truthy(value)),
					FrontendInput::Date => {
						tracing::debug!(attribute = %code, "Date filters are not supported; skipping.");

						return Ok(());
					},
					FrontendInput::Other(kind) => {
						tracing::debug!(
							attribute = %code,
							kind = %kind,
							"Cannot build an include filter for this frontend input kind; skipping."
						);

						return Ok(());
					},
				};

				self.map_value(include, store, code, &value)
			},
		}
	}

	fn map_value(
		&self,
		include: &mut FilterSet,
		store: &Store,
		name: &str,
		value: &Value,
	) -> Result<()> {
		match name.to_ascii_lowercase().as_str() {
			"price" => {
				let range =
					facet::price_bounds(value).ok_or_else(|| facet_error(store, name, value))?;

				include.set_price(range.min, range.max);
			},
			"new" => {
				let normalized = Value::Bool(facet::truthy(value));

				include.set_custom_field(name, self.string_list(store, name, &normalized)?);
			},
			"category" => {
				for category in self.string_list(store, name, value)? {
					include.add_category(category);
				}
			},
			brand if brand == self.brand_attribute => {
				include.set_brands(self.string_list(store, name, value)?);
			},
			_ => {
				include.set_custom_field(name, self.string_list(store, name, value)?);
			},
		}

		Ok(())
	}

	fn string_list(&self, store: &Store, name: &str, value: &Value) -> Result<Vec<String>> {
		facet::string_list(value).ok_or_else(|| facet_error(store, name, value))
	}
}

fn facet_error(store: &Store, field: &str, value: &Value) -> Error {
	Error::FacetValue {
		store_code: store.code.clone(),
		field: field.to_string(),
		value: value.clone(),
	}
}
