use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::user::{self, Gender};

/// 회원가입 요청
///
/// 일반 가입은 password, 카카오 가입은 kakao_id를 채운다. 두 방식은
/// 상호 배타적이며 둘 다 비어 있으면 거부된다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[validate(length(min = 1, max = 50, message = "닉네임은 1~50자여야 합니다."))]
    pub nickname: String,

    /// 일반 회원가입 시 필수, 카카오는 null
    pub password: Option<String>,

    /// 카카오 회원가입 시 필수, 일반은 null
    pub kakao_id: Option<String>,

    pub profile_image: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
}

impl UserCreateRequest {
    /// 일반 회원가입인지 확인
    pub fn is_general_signup(&self) -> bool {
        self.password
            .as_ref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }

    /// 카카오 회원가입인지 확인
    pub fn is_kakao_signup(&self) -> bool {
        self.kakao_id
            .as_ref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

/// 사용자 정보 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub profile_image: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    /// 일반 사용자만 비밀번호 변경 가능
    pub password: Option<String>,
}

/// 사용자 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_no: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub streak_count: i32,
    pub last_record_date: Option<NaiveDate>,
    /// 지급된 뱃지 ID 목록
    pub badge_ids: Vec<i64>,
    pub is_kakao_user: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        let badge_ids = model.awarded_badge_ids();
        let is_kakao_user = model.is_kakao_user();
        Self {
            user_no: model.user_no,
            nickname: model.nickname,
            profile_image: model.profile_image,
            gender: model.gender,
            birth_date: model.birth_date,
            streak_count: model.streak_count,
            last_record_date: model.last_record_date,
            badge_ids,
            is_kakao_user,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 스트릭 카운트 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreakCountResponse {
    pub user_no: i64,
    pub streak_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> UserCreateRequest {
        UserCreateRequest {
            nickname: "순이".to_string(),
            password: None,
            kakao_id: None,
            profile_image: None,
            gender: None,
            birth_date: None,
        }
    }

    #[test]
    fn blank_password_should_not_count_as_general_signup() {
        let mut req = base_request();
        req.password = Some("   ".to_string());
        assert!(!req.is_general_signup());
    }

    #[test]
    fn signup_modes_should_reflect_fields() {
        let mut req = base_request();
        req.password = Some("pw1234".to_string());
        assert!(req.is_general_signup());
        assert!(!req.is_kakao_signup());

        let mut req = base_request();
        req.kakao_id = Some("kakao-1".to_string());
        assert!(req.is_kakao_signup());
        assert!(!req.is_general_signup());
    }

    #[test]
    fn user_response_should_expose_badge_cache_as_ids() {
        let model = user::Model {
            user_no: 1,
            nickname: "순이".to_string(),
            password: Some("pw".to_string()),
            kakao_id: None,
            profile_image: None,
            gender: None,
            birth_date: None,
            streak_count: 3,
            last_record_date: None,
            badges: "[1]".to_string(),
            created_at: Default::default(),
            updated_at: Default::default(),
        };

        let response = UserResponse::from(model);
        assert_eq!(response.badge_ids, vec![1]);
        assert!(!response.is_kakao_user);
    }
}
