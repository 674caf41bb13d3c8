use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::badge;

/// 뱃지 등록/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRequest {
    #[validate(length(min = 1, max = 50, message = "뱃지 이름은 1~50자여야 합니다."))]
    pub name: String,

    #[validate(length(max = 255, message = "뱃지 설명은 255자를 초과할 수 없습니다."))]
    pub description: String,

    /// 지급 조건 (기계 판독용 JSON 문자열)
    #[validate(length(min = 1, message = "지급 조건은 필수입니다."))]
    pub condition_json: String,
}

/// 뱃지 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub badge_id: i64,
    pub name: String,
    pub description: String,
    pub condition_json: String,
}

impl From<badge::Model> for BadgeResponse {
    fn from(model: badge::Model) -> Self {
        Self {
            badge_id: model.badge_id,
            name: model.name,
            description: model.description,
            condition_json: model.condition_json,
        }
    }
}

/// 뱃지 수동 지급 요청 (관리자용)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeRequest {
    #[validate(range(min = 1, message = "userNo는 1 이상의 양수여야 합니다."))]
    pub user_no: i64,
    #[validate(range(min = 1, message = "badgeId는 1 이상의 양수여야 합니다."))]
    pub badge_id: i64,
}

/// 뱃지 지급 결과
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeResponse {
    pub user_no: i64,
    pub badge_id: i64,
    pub awarded_at: NaiveDateTime,
}
