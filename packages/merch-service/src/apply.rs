use merch_catalog::ProductQuery;
use merch_domain::RankingResult;

/// Rewrites the listing query to show exactly the ranked products in
/// ranking order. Ranking is advisory: an empty or non-scalar id list
/// leaves the query untouched and only emits a debug note.
pub fn apply_ranking<Q>(result: &RankingResult, query: &mut Q) -> bool
where
	Q: ProductQuery,
{
	let ids = match result.scalar_ids() {
		Some(ids) if !ids.is_empty() => ids,
		_ => {
			tracing::debug!("Ranking result is empty or not scalar; keeping the native listing.");

			return false;
		},
	};

	query.order_by_ranked_ids(&ids);
	query.restrict_to_ids(&ids);

	true
}

#[cfg(test)]
mod tests {
	use super::*;

	use merch_catalog::SqlSelect;

	fn result(ids: Vec<serde_json::Value>) -> RankingResult {
		RankingResult { product_ids: ids, total_count: 0, continuation_token: None }
	}

	#[test]
	fn empty_ranking_leaves_the_query_byte_identical() {
		let mut query = SqlSelect::new("catalog_product_entity");

		query.and_where("e.visibility = 4");
		query.order_by("e.position ASC");

		let before = query.to_sql();

		assert!(!apply_ranking(&result(Vec::new()), &mut query));
		assert_eq!(query.to_sql(), before);
	}

	#[test]
	fn non_scalar_ids_leave_the_query_byte_identical() {
		let mut query = SqlSelect::new("catalog_product_entity");
		let before = query.to_sql();
		let ranking = result(vec![serde_json::json!("10"), serde_json::json!(["20"])]);

		assert!(!apply_ranking(&ranking, &mut query));
		assert_eq!(query.to_sql(), before);
	}

	#[test]
	fn ranked_ids_restrict_and_order_the_query() {
		let mut query = SqlSelect::new("catalog_product_entity");
		let ranking = result(vec![
			serde_json::json!("10"),
			serde_json::json!("20"),
			serde_json::json!("30"),
		]);

		assert!(apply_ranking(&ranking, &mut query));

		let sql = query.to_sql();

		assert!(sql.contains("e.entity_id IN ('10', '20', '30')"));
		assert!(sql.contains("FIELD(e.entity_id, '30', '20', '10') DESC"));
	}
}
