//! Shared builders for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Keyword, KeywordClaim, KeywordDraft, KeywordId, KeywordSize, Player, PlayerId, PlayerName,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// Player created `offset_minutes` after the fixture timestamp.
pub(crate) fn player(name: &str, total_points: u32, offset_minutes: i64) -> Player {
    Player::new(
        PlayerId::random(),
        PlayerName::new(name).expect("valid fixture name"),
        total_points,
        fixture_timestamp() + Duration::minutes(offset_minutes),
    )
}

pub(crate) fn unclaimed_keyword(word: &str, points: u32) -> Keyword {
    Keyword::new(KeywordDraft {
        id: KeywordId::random(),
        word: word.to_owned(),
        points,
        size: KeywordSize::Medium,
        is_found: false,
        found_at: None,
        claim: None,
    })
    .expect("valid fixture keyword")
}

pub(crate) fn claimed_keyword(word: &str, points: u32, owner: PlayerId) -> Keyword {
    let at = fixture_timestamp();
    Keyword::new(KeywordDraft {
        id: KeywordId::random(),
        word: word.to_owned(),
        points,
        size: KeywordSize::Small,
        is_found: true,
        found_at: Some(at),
        claim: Some(KeywordClaim {
            player_id: owner,
            claimed_at: at,
        }),
    })
    .expect("valid fixture keyword")
}
