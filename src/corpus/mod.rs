//! Recipe corpus loading.
//!
//! The engine only ever sees an in-memory [`Corpus`]; this module is the
//! boundary that turns a `{"recipe": [...]}` JSON document (or a directory of
//! them) into one.

use crate::model::Corpus;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when loading a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse corpus: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Invalid corpus path: {0}")]
    InvalidPath(Utf8PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),
}

impl Corpus {
    /// Parses a corpus document. A document without a `recipe` key is an
    /// empty corpus.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Loads the corpus document at `path`.
///
/// # Examples
///
/// ```no_run
/// use recipe_facets::{load_corpus, FilterEngine};
/// use camino::Utf8Path;
///
/// let corpus = load_corpus(Utf8Path::new("data/recipes.json"))?;
/// let engine = FilterEngine::new(corpus);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_corpus(path: &Utf8Path) -> Result<Corpus, CorpusError> {
    if !path.is_file() {
        return Err(CorpusError::InvalidPath(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let corpus = Corpus::from_json_str(&content)?;
    info!("Loaded {} recipes from {}", corpus.len(), path);
    Ok(corpus)
}

/// Loads every `*.json` document below `base_dir` into a single corpus.
///
/// Documents are merged in path order. Files that are not valid corpus
/// documents are skipped with a warning.
pub fn load_corpus_dir(base_dir: &Utf8Path) -> Result<Corpus, CorpusError> {
    if !base_dir.exists() {
        return Err(CorpusError::InvalidPath(base_dir.to_path_buf()));
    }
    if !base_dir.is_dir() {
        return Err(CorpusError::NotADirectory(base_dir.to_string()));
    }

    let pattern = base_dir.join("**/*.json");
    let mut paths = Vec::new();
    for entry in glob::glob(pattern.as_str())? {
        let path = entry?;
        match Utf8PathBuf::from_path_buf(path) {
            Ok(path) => paths.push(path),
            Err(path) => warn!("Skipping non UTF-8 path {}", path.display()),
        }
    }
    paths.sort();

    let mut recipes = Vec::new();
    for path in &paths {
        let parsed = std::fs::read_to_string(path)
            .map_err(CorpusError::from)
            .and_then(|content| Corpus::from_json_str(&content));
        match parsed {
            Ok(corpus) => recipes.extend(corpus.iter().cloned()),
            Err(e) => warn!("Skipping {}: {}", path, e),
        }
    }

    info!(
        "Loaded {} recipes from {} documents in {}",
        recipes.len(),
        paths.len(),
        base_dir
    );
    Ok(Corpus::from_shared(recipes))
}
