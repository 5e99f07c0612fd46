//! Startup keyword seeding.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{KeywordRepository, KeywordRepositoryError};

use super::document::{SeedDocumentError, parse_seed_document};

/// Errors returned while seeding keywords at startup.
#[derive(Debug, Error)]
pub enum KeywordSeedError {
    /// Seed file could not be read.
    #[error("failed to read keyword seed file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Seed file contents are invalid.
    #[error("invalid keyword seed file at {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: SeedDocumentError,
    },
    /// Persisting the keywords failed.
    #[error("keyword seeding failed: {0}")]
    Repository(#[from] KeywordRepositoryError),
}

/// Insert the keywords listed in `path` that the store does not hold yet.
///
/// Returns the number of newly inserted keywords, or `None` when no seed
/// file is configured.
///
/// # Errors
///
/// Returns [`KeywordSeedError`] when the file is unreadable or invalid, or
/// when the repository rejects the insert.
pub async fn seed_keywords_on_startup(
    path: Option<&Path>,
    keywords: &dyn KeywordRepository,
) -> Result<Option<usize>, KeywordSeedError> {
    let Some(path) = path else {
        info!(reason = "no seed file configured", "keyword seeding skipped");
        return Ok(None);
    };

    let contents = read_seed_file(path)?;
    let parsed = parse_seed_document(&contents).map_err(|source| KeywordSeedError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    let inserted = keywords.seed(&parsed).await?;
    info!(
        path = %path.display(),
        listed = parsed.len(),
        inserted,
        "keyword seeding applied"
    );
    Ok(Some(inserted))
}

fn read_seed_file(path: &Path) -> Result<String, KeywordSeedError> {
    let read_error = |source| KeywordSeedError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}
