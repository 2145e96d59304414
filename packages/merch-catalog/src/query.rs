/// Rewrite surface of a product listing query. Implementations must be
/// able to restrict rows to an explicit id set and to order rows so that
/// the first id in the given list renders first.
pub trait ProductQuery {
	/// Replaces the query's ordering with "position in `ranked_ids`",
	/// best-ranked id first. How that is expressed is up to the backing
	/// query layer.
	fn order_by_ranked_ids(&mut self, ranked_ids: &[String]);

	/// Restricts the row set to exactly the products in `ids`.
	fn restrict_to_ids(&mut self, ids: &[String]);
}
