use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "Gender")]
pub enum Gender {
    #[sea_orm(string_value = "MALE")]
    Male,
    #[sea_orm(string_value = "FEMALE")]
    Female,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_no: i64,
    /// 로그인 ID (unique)
    #[sea_orm(unique)]
    pub nickname: String,
    /// 일반 로그인용 (카카오 사용자는 NULL)
    pub password: Option<String>,
    /// 카카오 회원번호 (일반 사용자는 NULL)
    #[sea_orm(unique)]
    pub kakao_id: Option<String>,
    pub profile_image: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<Date>,
    pub streak_count: i32,
    pub last_record_date: Option<Date>,
    /// 지급된 뱃지 ID 목록의 JSON 배열 (user_badges 조인 테이블의 비정규화 캐시)
    #[sea_orm(column_type = "Text")]
    pub badges: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::record::entity::record::Entity")]
    Record,
    #[sea_orm(has_many = "crate::domain::quiz::entity::quiz::Entity")]
    Quiz,
    #[sea_orm(has_many = "crate::domain::badge::entity::user_badge::Entity")]
    UserBadge,
}

impl Related<crate::domain::record::entity::record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Record.def()
    }
}

impl Related<crate::domain::quiz::entity::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<crate::domain::badge::entity::user_badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 카카오 사용자 여부
    pub fn is_kakao_user(&self) -> bool {
        self.kakao_id.is_some()
    }

    /// 뱃지 캐시 컬럼을 ID 목록으로 파싱
    ///
    /// 파싱에 실패하면 빈 목록으로 간주한다. 조인 테이블이 진실의 원천이다.
    pub fn awarded_badge_ids(&self) -> Vec<i64> {
        serde_json::from_str(&self.badges).unwrap_or_default()
    }
}

/// 뱃지 캐시 JSON에 ID를 추가한 새 JSON 반환 (이미 있으면 그대로)
pub fn add_badge_to_cache(cache_json: &str, badge_id: i64) -> String {
    let mut ids: Vec<i64> = serde_json::from_str(cache_json).unwrap_or_default();
    if !ids.contains(&badge_id) {
        ids.push(badge_id);
    }
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_badge_to_cache_should_append_new_id() {
        let cache = add_badge_to_cache("[1,2]", 3);
        let ids: Vec<i64> = serde_json::from_str(&cache).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn add_badge_to_cache_should_ignore_existing_id() {
        let cache = add_badge_to_cache("[1,2]", 2);
        let ids: Vec<i64> = serde_json::from_str(&cache).unwrap();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn add_badge_to_cache_should_recover_from_garbage() {
        let cache = add_badge_to_cache("not-json", 1);
        let ids: Vec<i64> = serde_json::from_str(&cache).unwrap();
        assert_eq!(ids, vec![1]);
    }
}
