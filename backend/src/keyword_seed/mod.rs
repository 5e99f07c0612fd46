//! Operator keyword seeding from a JSON file at startup.

mod document;
mod startup;

pub use document::{SeedDocumentError, parse_seed_document};
pub use startup::{KeywordSeedError, seed_keywords_on_startup};
