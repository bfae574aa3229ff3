pub mod apply;
pub mod model;
pub mod parser;

pub use apply::{apply_filters, matches_case, sort_results};
pub use model::{DateRange, FilterCollection, FiltersPatch, SearchFilters, StatusFilter};
pub use parser::parse_filter;
