pub mod synonyms;
pub mod types;
