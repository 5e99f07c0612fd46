//! Outcomes of the keyword claim protocol.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a claim attempt.
///
/// Losing a race or repeating a claim are first-class outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// The caller was credited for the keyword by this invocation.
    #[serde(rename_all = "camelCase")]
    FreshClaim {
        word: String,
        points: u32,
        total_points: u32,
    },
    /// The caller had already been credited for the keyword.
    AlreadyClaimedBySelf,
    /// Another player owns the keyword.
    #[serde(rename_all = "camelCase")]
    ClaimedByOther { claimer_name: Option<String> },
}

/// Viewer-relative ownership status of a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeywordStatus {
    Available,
    ClaimedBySelf,
    #[serde(rename_all = "camelCase")]
    ClaimedByOther { claimer_name: Option<String> },
}
