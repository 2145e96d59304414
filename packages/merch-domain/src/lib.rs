pub mod facet;
pub mod identity;
pub mod ranking;

pub use facet::{ActiveFilter, FacetBundle, FilterSet, FrontendInput, PriceRange};
pub use identity::{Account, Capability, Store};
pub use ranking::{MerchandiseRequest, RankingResult};
