//! Public leaderboard handler.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::LeaderboardEntry;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub rank: u32,
    pub player_id: Uuid,
    pub name: String,
    pub total_points: u32,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            player_id: *entry.player_id.as_uuid(),
            name: entry.name,
            total_points: entry.total_points,
        }
    }
}

/// Top ten players by points; ties go to whoever joined first.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    responses(
        (status = 200, description = "Ranked players", body = [LeaderboardEntryResponse]),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "leaderboard"
)]
#[get("/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LeaderboardEntryResponse>>> {
    let entries = state.leaderboard.top().await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;
    use crate::domain::PlayerId;
    use crate::domain::ports::MockLeaderboardQuery;
    use crate::inbound::http::test_utils::MockPorts;

    fn ports_with(result: Result<Vec<LeaderboardEntry>, Error>) -> MockPorts {
        let mut query = MockLeaderboardQuery::new();
        query.expect_top().times(1).return_once(move || result);
        MockPorts {
            leaderboard: query,
            ..MockPorts::default()
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn leaderboard_is_public_and_ranked() {
        let entry = LeaderboardEntry {
            rank: 1,
            player_id: PlayerId::random(),
            name: "Bea".to_owned(),
            total_points: 30,
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports_with(Ok(vec![entry])).into_state()))
                .service(super::leaderboard),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/leaderboard").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body[0]["rank"], 1);
        assert_eq!(body[0]["name"], "Bea");
        assert_eq!(body[0]["totalPoints"], 30);
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_is_service_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(
                    ports_with(Err(Error::service_unavailable("store offline"))).into_state(),
                ))
                .service(super::leaderboard),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/leaderboard").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
