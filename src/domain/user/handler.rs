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

use super::dto::{StreakCountResponse, UserCreateRequest, UserResponse, UserUpdateRequest};
use super::service::UserService;

/// 회원가입 API
///
/// 새로운 사용자를 생성합니다.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserCreateRequest,
    responses(
        (status = 200, description = "회원가입 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "닉네임 또는 카카오 계정 중복", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserCreateRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    req.validate()?;

    let user = UserService::create_user(&state, req).await?;
    Ok(Json(BaseResponse::success(user)))
}

/// 사용자 조회 API
#[utoipa::path(
    get,
    path = "/api/users/{user_no}",
    params(
        ("user_no" = i64, Path, description = "사용자 번호")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 조회 성공"),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_no): Path<i64>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let user = UserService::get_user_by_id(&state, user_no).await?;
    Ok(Json(BaseResponse::success(user)))
}

/// 닉네임으로 사용자 조회 API
#[utoipa::path(
    get,
    path = "/api/users/nickname/{nickname}",
    params(
        ("nickname" = String, Path, description = "사용자 닉네임")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 조회 성공"),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_user_by_nickname(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(nickname): Path<String>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let user = UserService::get_user_by_nickname(&state, &nickname).await?;
    Ok(Json(BaseResponse::success(user)))
}

/// 모든 사용자 조회 API
#[utoipa::path(
    get,
    path = "/api/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 목록 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<UserResponse>>>, AppError> {
    let users = UserService::get_all_users(&state).await?;
    Ok(Json(BaseResponse::success(users)))
}

/// 사용자 정보 수정 API
#[utoipa::path(
    put,
    path = "/api/users/{user_no}",
    params(
        ("user_no" = i64, Path, description = "사용자 번호")
    ),
    request_body = UserUpdateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 수정 성공"),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn update_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_no): Path<i64>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    req.validate()?;

    let user = UserService::update_user(&state, user_no, req).await?;
    Ok(Json(BaseResponse::success(user)))
}

/// 사용자 삭제 API
#[utoipa::path(
    delete,
    path = "/api/users/{user_no}",
    params(
        ("user_no" = i64, Path, description = "사용자 번호")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 삭제 성공"),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_no): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    UserService::delete_user(&state, user_no).await?;
    Ok(Json(BaseResponse::empty("사용자가 삭제되었습니다.")))
}

/// 스트릭 카운트 조회 API
///
/// 연속 일기 작성 일수를 조회합니다. 스트릭 값 자체는 일기 작성
/// 이벤트로만 갱신됩니다.
#[utoipa::path(
    get,
    path = "/api/users/{user_no}/streak",
    params(
        ("user_no" = i64, Path, description = "사용자 번호")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "스트릭 조회 성공"),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_streak_count(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_no): Path<i64>,
) -> Result<Json<BaseResponse<StreakCountResponse>>, AppError> {
    let streak = UserService::get_streak_count(&state, user_no).await?;
    Ok(Json(BaseResponse::success(streak)))
}
