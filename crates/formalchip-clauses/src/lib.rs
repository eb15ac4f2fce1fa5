//! Clause ingestion: turn heterogeneous design-intent sources into a flat
//! list of [`SpecClause`] values the synthesis engine can consume.

pub mod error;
pub mod ingest;
pub mod model;
pub mod spec_input;

pub use error::IngestError;
pub use model::{ClauseMetadata, SpecClause};
pub use spec_input::{load_spec_clauses, SpecInput};
