//! Operator QR export sheet handler.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, KeywordSize, QrCodeSpec};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Rendering instructions for one printed QR code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub keyword_id: Uuid,
    pub word: String,
    pub points: u32,
    pub size: KeywordSize,
    pub claim_url: String,
    pub size_px: u32,
    pub title: String,
    pub file_name: String,
}

impl From<QrCodeSpec> for QrCodeResponse {
    fn from(spec: QrCodeSpec) -> Self {
        Self {
            keyword_id: *spec.keyword_id.as_uuid(),
            word: spec.word,
            points: spec.points,
            size: spec.size,
            claim_url: spec.claim_url,
            size_px: spec.size_px,
            title: spec.title,
            file_name: spec.file_name,
        }
    }
}

/// Printable sheet, highest-value keywords first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrSheetResponse {
    pub codes: Vec<QrCodeResponse>,
}

/// QR code specifications for every keyword.
#[utoipa::path(
    get,
    path = "/api/v1/qr-sheet",
    responses(
        (status = 200, description = "QR sheet", body = QrSheetResponse),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["operator"],
    operation_id = "qrSheet"
)]
#[get("/qr-sheet")]
pub async fn qr_sheet(state: web::Data<HttpState>) -> ApiResult<web::Json<QrSheetResponse>> {
    let sheet = state.qr_sheet.sheet().await?;
    Ok(web::Json(QrSheetResponse {
        codes: sheet.into_entries().into_iter().map(Into::into).collect(),
    }))
}
