//! Player data model.
//!
//! A player is identified by a UUID and a display name that is unique under
//! case folding. The running point total is owned by the data store; the copy
//! held in [`PlayerIdentity`] is advisory display data.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed length for a player name, counted in characters.
pub const PLAYER_NAME_MIN: usize = 2;
/// Maximum allowed length for a player name, counted in characters.
pub const PLAYER_NAME_MAX: usize = 50;

/// Validation errors returned by [`PlayerName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerValidationError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("player name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("player name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Stable player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`PlayerId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player display name, trimmed and length checked.
///
/// # Examples
/// ```
/// use hunt::domain::PlayerName;
///
/// let name = PlayerName::new("  Ana ").expect("valid name");
/// assert_eq!(name.as_ref(), "Ana");
/// assert_eq!(name.folded(), "ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Validate and construct a [`PlayerName`], trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, PlayerValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PlayerValidationError::EmptyName);
        }

        let length = trimmed.chars().count();
        if length < PLAYER_NAME_MIN {
            return Err(PlayerValidationError::NameTooShort {
                min: PLAYER_NAME_MIN,
            });
        }
        if length > PLAYER_NAME_MAX {
            return Err(PlayerValidationError::NameTooLong {
                max: PLAYER_NAME_MAX,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Lower-cased form used for case-insensitive matching.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive equality.
    pub fn matches(&self, other: &PlayerName) -> bool {
        self.folded() == other.folded()
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PlayerName> for String {
    fn from(value: PlayerName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = PlayerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered player as held by the data store.
///
/// ## Invariants
/// - `name` satisfies [`PlayerName`] validation.
/// - `total_points` only grows, and only through the claim protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: PlayerName,
    total_points: u32,
    created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: PlayerName,
        total_points: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            total_points,
            created_at,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Snapshot of this player suitable for caching on the client.
    pub fn identity(&self) -> PlayerIdentity {
        PlayerIdentity {
            id: self.id,
            name: self.name.to_string(),
            total_points: self.total_points,
        }
    }
}

/// Lightweight identity cached by the client between requests.
///
/// `total_points` may lag behind the data store and must not be used for
/// anything other than display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub id: PlayerId,
    pub name: String,
    pub total_points: u32,
}

impl PlayerIdentity {
    /// Replace the cached total with an authoritative value.
    pub fn with_total_points(mut self, total_points: u32) -> Self {
        self.total_points = total_points;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Ana", "Ana")]
    #[case("  Ana  ", "Ana")]
    #[case("Jo", "Jo")]
    fn player_name_accepts_and_trims(#[case] raw: &str, #[case] expected: &str) {
        let name = PlayerName::new(raw).expect("valid name");
        assert_eq!(name.as_ref(), expected);
    }

    #[rstest]
    #[case("", PlayerValidationError::EmptyName)]
    #[case("   ", PlayerValidationError::EmptyName)]
    #[case(" A ", PlayerValidationError::NameTooShort { min: PLAYER_NAME_MIN })]
    fn player_name_rejects_short_values(
        #[case] raw: &str,
        #[case] expected: PlayerValidationError,
    ) {
        assert_eq!(PlayerName::new(raw), Err(expected));
    }

    #[rstest]
    fn player_name_rejects_long_values() {
        let raw = "x".repeat(PLAYER_NAME_MAX + 1);
        assert_eq!(
            PlayerName::new(raw),
            Err(PlayerValidationError::NameTooLong {
                max: PLAYER_NAME_MAX
            })
        );
    }

    #[rstest]
    fn player_name_counts_characters_not_bytes() {
        let raw = "é".repeat(PLAYER_NAME_MAX);
        assert!(PlayerName::new(raw).is_ok());
    }

    #[rstest]
    fn player_name_matches_case_insensitively() {
        let upper = PlayerName::new("Ana").expect("valid name");
        let lower = PlayerName::new("ana").expect("valid name");
        assert!(upper.matches(&lower));
    }

    #[rstest]
    #[case("ÉLODIE", "élodie")]
    #[case("Ça va", "ça va")]
    fn folding_covers_non_ascii_letters(#[case] raw: &str, #[case] folded: &str) {
        let name = PlayerName::new(raw).expect("valid name");
        assert_eq!(name.folded(), folded);
        assert!(name.matches(&PlayerName::new(folded).expect("valid name")));
    }

    #[rstest]
    fn identity_serialises_camel_case() {
        let player = Player::new(
            PlayerId::random(),
            PlayerName::new("Ana").expect("valid name"),
            50,
            Utc::now(),
        );
        let value = serde_json::to_value(player.identity()).expect("identity serialises");
        assert_eq!(value["name"], "Ana");
        assert_eq!(value["totalPoints"], 50);
        assert_eq!(value["id"], player.id().to_string());
    }
}
