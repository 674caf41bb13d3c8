use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// 헬스체크 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
}

/// 헬스체크 API
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "서버 정상")
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK" })
}
