use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::entity::user::Gender;

/// 일반 로그인 요청 (닉네임 + 비밀번호)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "닉네임은 필수입니다."))]
    pub nickname: String,

    #[validate(length(min = 1, message = "비밀번호는 필수입니다."))]
    pub password: String,
}

/// 카카오 로그인 요청 (신규 사용자는 자동 회원가입)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KakaoLoginRequest {
    #[validate(length(min = 1, message = "kakaoId는 필수입니다."))]
    pub kakao_id: String,

    /// 카카오 닉네임 (필수)
    #[validate(length(min = 1, message = "닉네임은 필수입니다."))]
    pub nickname: String,

    /// 프로필 이미지 URL (선택사항)
    pub profile_image: Option<String>,
}

/// 로그인 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_no: i64,
    pub nickname: String,
    pub is_kakao_user: bool,
    pub access_token: String,
    /// Access Token 만료 시간 (초)
    pub expires_in: i64,
}

/// 현재 사용자 정보 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_no: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub streak_count: i32,
    pub is_kakao_user: bool,
    pub created_at: NaiveDateTime,
}
