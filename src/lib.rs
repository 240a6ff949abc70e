pub mod config;
pub mod corpus;
pub mod facets;
pub mod ffi;
pub mod filter;
pub mod model;

pub use config::EngineOptions;
pub use corpus::{load_corpus, load_corpus_dir, CorpusError};
pub use facets::{extract_facets, Facets};
pub use filter::{FilterEngine, FilterResult, SelectionOutcome, SelectionState};
pub use model::*;

uniffi::setup_scaffolding!();
