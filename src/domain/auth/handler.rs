use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::cookie::{
    clear_access_token_cookie, create_access_token_cookie, set_cookie_header,
};
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{KakaoLoginRequest, LoginRequest, UserInfo};
use super::service::AuthService;

/// 일반 로그인 API
///
/// 닉네임과 비밀번호로 로그인하고 Access Token을 발급합니다.
/// 토큰은 응답 본문과 HttpOnly 쿠키에 함께 담깁니다.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공"),
        (status = 401, description = "닉네임 또는 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let response = AuthService::login(&state, req).await?;
    let cookie = create_access_token_cookie(&response.access_token, response.expires_in)?;

    Ok((
        AppendHeaders([(set_cookie_header(), cookie)]),
        Json(BaseResponse::success_with_message(response, "로그인 성공")),
    ))
}

/// 카카오 로그인 API
///
/// 카카오 계정으로 로그인합니다. 신규 사용자는 자동으로 회원가입됩니다.
#[utoipa::path(
    post,
    path = "/api/auth/kakao-login",
    request_body = KakaoLoginRequest,
    responses(
        (status = 200, description = "카카오 로그인 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn kakao_login(
    State(state): State<AppState>,
    Json(req): Json<KakaoLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let response = AuthService::kakao_login(&state, req).await?;
    let cookie = create_access_token_cookie(&response.access_token, response.expires_in)?;

    Ok((
        AppendHeaders([(set_cookie_header(), cookie)]),
        Json(BaseResponse::success_with_message(
            response,
            "카카오 로그인 성공",
        )),
    ))
}

/// 로그아웃 API
///
/// Access Token 쿠키를 만료 처리합니다.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "로그아웃 성공")
    ),
    tag = "Auth"
)]
pub async fn logout() -> Result<impl IntoResponse, AppError> {
    let cookie = clear_access_token_cookie()?;

    Ok((
        AppendHeaders([(set_cookie_header(), cookie)]),
        Json(BaseResponse::empty("로그아웃 성공")),
    ))
}

/// 현재 사용자 정보 조회 API
#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "사용자 정보 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<UserInfo>>, AppError> {
    let user_no = user.user_no()?;
    let info = AuthService::get_current_user(&state, user_no).await?;

    Ok(Json(BaseResponse::success(info)))
}
