//! Keyword data model.
//!
//! Keywords are seeded by an operator. The application only ever writes the
//! claim fields, and only once per keyword.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::PlayerId;

/// Validation errors returned by [`Keyword::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeywordValidationError {
    #[error("keyword word must not be empty")]
    EmptyWord,
    #[error("keyword points must be positive")]
    NonPositivePoints,
    #[error("unknown keyword size: {0}")]
    UnknownSize(String),
    #[error("claimed keywords must be marked as found")]
    ClaimWithoutFound,
}

/// Stable keyword identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordId(Uuid);

impl KeywordId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for KeywordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical size tier of the printed QR code.
///
/// Smaller codes are harder to spot and are typically worth more points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSize {
    Small,
    Medium,
    Large,
}

impl KeywordSize {
    /// Storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Human-readable label shown next to the keyword.
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small (hard)",
            Self::Medium => "Medium",
            Self::Large => "Large (easy)",
        }
    }

    /// Edge length in pixels of the exported QR code.
    pub fn qr_size_px(self) -> u32 {
        match self {
            Self::Small => 100,
            Self::Medium => 130,
            Self::Large => 175,
        }
    }
}

impl fmt::Display for KeywordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordSize {
    type Err = KeywordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(KeywordValidationError::UnknownSize(other.to_owned())),
        }
    }
}

/// Exclusive ownership of a keyword by the first player to claim it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordClaim {
    pub player_id: PlayerId,
    pub claimed_at: DateTime<Utc>,
}

/// Input payload for [`Keyword::new`].
#[derive(Debug, Clone)]
pub struct KeywordDraft {
    pub id: KeywordId,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    pub is_found: bool,
    pub found_at: Option<DateTime<Utc>>,
    pub claim: Option<KeywordClaim>,
}

/// Point-valued target behind a single printed QR code.
///
/// ## Invariants
/// - `word` is non-empty and `points` is positive.
/// - A claimed keyword is always marked as found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    id: KeywordId,
    word: String,
    points: u32,
    size: KeywordSize,
    is_found: bool,
    found_at: Option<DateTime<Utc>>,
    claim: Option<KeywordClaim>,
}

impl Keyword {
    pub fn new(draft: KeywordDraft) -> Result<Self, KeywordValidationError> {
        let KeywordDraft {
            id,
            word,
            points,
            size,
            is_found,
            found_at,
            claim,
        } = draft;

        if word.trim().is_empty() {
            return Err(KeywordValidationError::EmptyWord);
        }
        if points == 0 {
            return Err(KeywordValidationError::NonPositivePoints);
        }
        if claim.is_some() && !is_found {
            return Err(KeywordValidationError::ClaimWithoutFound);
        }

        Ok(Self {
            id,
            word,
            points,
            size,
            is_found,
            found_at,
            claim,
        })
    }

    pub fn id(&self) -> KeywordId {
        self.id
    }

    pub fn word(&self) -> &str {
        self.word.as_str()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn size(&self) -> KeywordSize {
        self.size
    }

    pub fn is_found(&self) -> bool {
        self.is_found
    }

    pub fn found_at(&self) -> Option<DateTime<Utc>> {
        self.found_at
    }

    pub fn claim(&self) -> Option<&KeywordClaim> {
        self.claim.as_ref()
    }

    /// Player currently owning the keyword, if any.
    pub fn claimed_by(&self) -> Option<PlayerId> {
        self.claim.map(|claim| claim.player_id)
    }

    /// Apply a first claim in place.
    ///
    /// Returns `false` and leaves the keyword untouched when it is already
    /// claimed.
    pub fn apply_claim(&mut self, player_id: PlayerId, at: DateTime<Utc>) -> bool {
        if self.claim.is_some() {
            return false;
        }
        self.claim = Some(KeywordClaim {
            player_id,
            claimed_at: at,
        });
        self.is_found = true;
        self.found_at = Some(at);
        true
    }
}
