use crate::query::ProductQuery;

/// Minimal MySQL SELECT builder over a product entity table aliased as
/// `e`, enough to carry a native listing query through a ranked rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSelect {
	table: String,
	wheres: Vec<String>,
	orders: Vec<String>,
}
impl SqlSelect {
	pub fn new(table: impl Into<String>) -> Self {
		Self { table: table.into(), wheres: Vec::new(), orders: Vec::new() }
	}

	pub fn and_where(&mut self, expr: impl Into<String>) {
		self.wheres.push(expr.into());
	}

	pub fn order_by(&mut self, expr: impl Into<String>) {
		self.orders.push(expr.into());
	}

	pub fn to_sql(&self) -> String {
		let mut sql = format!("SELECT e.* FROM {} AS e", self.table);

		if !self.wheres.is_empty() {
			sql.push_str(" WHERE ");
			sql.push_str(&self.wheres.join(" AND "));
		}
		if !self.orders.is_empty() {
			sql.push_str(" ORDER BY ");
			sql.push_str(&self.orders.join(", "));
		}

		sql
	}
}
impl ProductQuery for SqlSelect {
	fn order_by_ranked_ids(&mut self, ranked_ids: &[String]) {
		if ranked_ids.is_empty() {
			return;
		}

		// FIELD() returns the 1-based position of the matched id and 0 for
		// unmatched rows, so DESC over the reversed list renders the
		// best-ranked id first and unmatched rows last.
		let positions =
			ranked_ids.iter().rev().map(|id| quote(id)).collect::<Vec<_>>().join(", ");
		let clause = format!("FIELD(e.entity_id, {positions}) DESC");

		tracing::debug!(order = %clause, "Replacing listing order with ranked id positions.");

		self.orders.clear();
		self.orders.push(clause);
	}

	fn restrict_to_ids(&mut self, ids: &[String]) {
		if ids.is_empty() {
			return;
		}

		let members = ids.iter().map(|id| quote(id)).collect::<Vec<_>>().join(", ");
		let clause = format!("e.entity_id IN ({members})");

		tracing::debug!(filter = %clause, "Restricting listing to ranked ids.");

		self.wheres.push(clause);
	}
}

fn quote(id: &str) -> String {
	format!("'{}'", id.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|id| id.to_string()).collect()
	}

	#[test]
	fn renders_bare_select() {
		let select = SqlSelect::new("catalog_product_entity");

		assert_eq!(select.to_sql(), "SELECT e.* FROM catalog_product_entity AS e");
	}

	#[test]
	fn ranked_ordering_replaces_existing_order() {
		let mut select = SqlSelect::new("catalog_product_entity");

		select.order_by("e.created_at DESC");
		select.order_by_ranked_ids(&ids(&["10", "20", "30"]));

		assert_eq!(
			select.to_sql(),
			"SELECT e.* FROM catalog_product_entity AS e \
			ORDER BY FIELD(e.entity_id, '30', '20', '10') DESC"
		);
	}

	#[test]
	fn restriction_composes_with_existing_wheres() {
		let mut select = SqlSelect::new("catalog_product_entity");

		select.and_where("e.visibility = 4");
		select.restrict_to_ids(&ids(&["10", "20"]));

		assert_eq!(
			select.to_sql(),
			"SELECT e.* FROM catalog_product_entity AS e \
			WHERE e.visibility = 4 AND e.entity_id IN ('10', '20')"
		);
	}

	#[test]
	fn quotes_are_escaped() {
		let mut select = SqlSelect::new("catalog_product_entity");

		select.restrict_to_ids(&ids(&["o'brien"]));

		assert_eq!(
			select.to_sql(),
			"SELECT e.* FROM catalog_product_entity AS e WHERE e.entity_id IN ('o''brien')"
		);
	}

	#[test]
	fn empty_id_lists_leave_the_select_untouched() {
		let mut select = SqlSelect::new("catalog_product_entity");

		select.order_by("e.created_at DESC");

		let before = select.to_sql();

		select.order_by_ranked_ids(&[]);
		select.restrict_to_ids(&[]);

		assert_eq!(select.to_sql(), before);
	}
}
