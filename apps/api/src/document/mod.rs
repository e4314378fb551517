// Document core: text and JSON in, canonical StructuredDocument out, and back.
// Everything below `handlers` is pure and synchronous.

pub mod candidate;
pub mod dedup;
pub mod extractor;
pub mod handlers;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod serializer;
pub mod vocabulary;

pub use candidate::read_candidate_value;
pub use extractor::extract;
pub use merge::{apply_budget, merge, MergeReport};
pub use models::{Preferences, StructuredDocument};
pub use serializer::serialize;
