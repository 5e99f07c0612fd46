//! Seed document format.
//!
//! ```json
//! [
//!   { "id": "6f2c…", "word": "macaw", "points": 20, "size": "small" }
//! ]
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{Keyword, KeywordDraft, KeywordId, KeywordSize, KeywordValidationError};

/// Errors raised while parsing a seed document.
#[derive(Debug, thiserror::Error)]
pub enum SeedDocumentError {
    #[error("seed document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("seed entry {index} ({word:?}) is invalid: {source}")]
    InvalidEntry {
        index: usize,
        word: String,
        #[source]
        source: KeywordValidationError,
    },
    #[error("seed entry {index} reuses keyword id {id}")]
    DuplicateId { index: usize, id: Uuid },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedEntry {
    id: Uuid,
    word: String,
    points: i64,
    size: String,
}

impl SeedEntry {
    fn into_keyword(self, index: usize) -> Result<Keyword, SeedDocumentError> {
        let invalid = |word: &str, source| SeedDocumentError::InvalidEntry {
            index,
            word: word.to_owned(),
            source,
        };

        let points = u32::try_from(self.points)
            .ok()
            .filter(|points| *points > 0)
            .ok_or_else(|| invalid(&self.word, KeywordValidationError::NonPositivePoints))?;
        let size = self
            .size
            .parse::<KeywordSize>()
            .map_err(|err| invalid(&self.word, err))?;

        Keyword::new(KeywordDraft {
            id: KeywordId::from_uuid(self.id),
            word: self.word.trim().to_owned(),
            points,
            size,
            is_found: false,
            found_at: None,
            claim: None,
        })
        .map_err(|err| invalid(&self.word, err))
    }
}

/// Parse and validate a seed document into unclaimed keywords.
///
/// # Examples
/// ```
/// use hunt::keyword_seed::parse_seed_document;
///
/// let keywords = parse_seed_document(
///     r#"[{"id":"0b7d2c1e-9f3a-4c55-8d0e-2a6b1f4c9e71","word":"macaw","points":20,"size":"small"}]"#,
/// )
/// .expect("valid document");
/// assert_eq!(keywords[0].word(), "macaw");
/// ```
pub fn parse_seed_document(contents: &str) -> Result<Vec<Keyword>, SeedDocumentError> {
    let entries: Vec<SeedEntry> = serde_json::from_str(contents)?;
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !seen.insert(entry.id) {
                return Err(SeedDocumentError::DuplicateId {
                    index,
                    id: entry.id,
                });
            }
            entry.into_keyword(index)
        })
        .collect()
}
