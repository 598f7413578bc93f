pub mod engine;
pub mod facets;
pub mod highlight;
pub mod results;
pub mod suggest;
