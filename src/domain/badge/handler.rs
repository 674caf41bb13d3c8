use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{BadgeRequest, BadgeResponse, UserBadgeRequest, UserBadgeResponse};
use super::service::{BadgeService, UserBadgeService};

/// 뱃지 전체 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/badges",
    responses(
        (status = 200, description = "뱃지 목록 조회 성공"),
    ),
    tag = "Badge"
)]
pub async fn get_all_badges(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<BadgeResponse>>>, AppError> {
    let badges = BadgeService::get_all_badges(&state).await?;
    Ok(Json(BaseResponse::success(badges)))
}

/// 특정 뱃지 조회 API
#[utoipa::path(
    get,
    path = "/api/badges/{badge_id}",
    params(
        ("badge_id" = i64, Path, description = "뱃지 ID")
    ),
    responses(
        (status = 200, description = "뱃지 조회 성공"),
        (status = 404, description = "존재하지 않는 뱃지", body = ErrorResponse)
    ),
    tag = "Badge"
)]
pub async fn get_badge(
    State(state): State<AppState>,
    Path(badge_id): Path<i64>,
) -> Result<Json<BaseResponse<BadgeResponse>>, AppError> {
    let badge = BadgeService::get_badge(&state, badge_id).await?;
    Ok(Json(BaseResponse::success(badge)))
}

/// 뱃지 등록 API (관리자용)
#[utoipa::path(
    post,
    path = "/api/badges",
    request_body = BadgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "뱃지 등록 성공"),
        (status = 409, description = "뱃지 이름 중복", body = ErrorResponse)
    ),
    tag = "Badge"
)]
pub async fn create_badge(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<BadgeRequest>,
) -> Result<Json<BaseResponse<BadgeResponse>>, AppError> {
    req.validate()?;

    let badge = BadgeService::create_badge(&state, req).await?;
    Ok(Json(BaseResponse::success(badge)))
}

/// 뱃지 수정 API (관리자용)
#[utoipa::path(
    put,
    path = "/api/badges/{badge_id}",
    params(
        ("badge_id" = i64, Path, description = "뱃지 ID")
    ),
    request_body = BadgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "뱃지 수정 성공"),
        (status = 404, description = "존재하지 않는 뱃지", body = ErrorResponse),
        (status = 409, description = "뱃지 이름 중복", body = ErrorResponse)
    ),
    tag = "Badge"
)]
pub async fn update_badge(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(badge_id): Path<i64>,
    Json(req): Json<BadgeRequest>,
) -> Result<Json<BaseResponse<BadgeResponse>>, AppError> {
    req.validate()?;

    let badge = BadgeService::update_badge(&state, badge_id, req).await?;
    Ok(Json(BaseResponse::success(badge)))
}

/// 뱃지 삭제 API (관리자용)
#[utoipa::path(
    delete,
    path = "/api/badges/{badge_id}",
    params(
        ("badge_id" = i64, Path, description = "뱃지 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "뱃지 삭제 성공"),
        (status = 404, description = "존재하지 않는 뱃지", body = ErrorResponse)
    ),
    tag = "Badge"
)]
pub async fn delete_badge(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(badge_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    BadgeService::delete_badge(&state, badge_id).await?;
    Ok(Json(BaseResponse::empty("뱃지가 삭제되었습니다.")))
}

/// 뱃지 수동 지급 API (관리자용)
///
/// 이미 지급된 뱃지를 다시 지급하려 하면 409를 반환합니다.
#[utoipa::path(
    post,
    path = "/api/user-badges",
    request_body = UserBadgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "뱃지 지급 성공"),
        (status = 404, description = "사용자 또는 뱃지 없음", body = ErrorResponse),
        (status = 409, description = "이미 지급된 뱃지", body = ErrorResponse)
    ),
    tag = "Badge"
)]
pub async fn assign_badge_to_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<UserBadgeRequest>,
) -> Result<Json<BaseResponse<UserBadgeResponse>>, AppError> {
    req.validate()?;

    let awarded = UserBadgeService::assign_badge_to_user(&state, req).await?;
    Ok(Json(BaseResponse::success(awarded)))
}
