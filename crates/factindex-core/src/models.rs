mod facet;
mod record;
mod refinement;
mod route;

pub use facet::{TAG_DELIMITER, TagFacetItem, split_tag};
pub use record::FactRecord;
pub use refinement::{RefinementAttribute, RefinementState};
pub use route::RouteState;
