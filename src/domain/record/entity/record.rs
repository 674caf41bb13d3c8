use std::collections::BTreeMap;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 필수 질문 키 (Q1~Q4)
pub const REQUIRED_QUESTIONS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub record_id: i64,
    pub user_no: i64,
    /// 작성 날짜 (사용자당 하루 1건)
    pub date: Date,
    /// 질문별 답변의 JSON 객체 ({"Q1": "...", ...})
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    /// Q2 답변에서 추출한 인물 카테고리
    pub person_category: Option<String>,
    /// Q2 답변 원문
    #[sea_orm(column_type = "Text", nullable)]
    pub person_name: Option<String>,
    /// 감정 태그
    pub emotion: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserNo",
        to = "crate::domain::user::entity::user::Column::UserNo"
    )]
    User,
    #[sea_orm(has_many = "crate::domain::quiz::entity::quiz::Entity")]
    Quiz,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::quiz::entity::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// answers JSON 컬럼을 Map으로 파싱
    ///
    /// 파싱에 실패하면 빈 Map을 반환한다.
    pub fn answers_map(&self) -> BTreeMap<String, String> {
        serde_json::from_str(&self.answers).unwrap_or_default()
    }

    /// 특정 질문의 답변 조회
    pub fn answer(&self, question_id: &str) -> Option<String> {
        self.answers_map().get(question_id).cloned()
    }

    /// 모든 필수 답변(Q1~Q4)이 작성되었는지 확인
    pub fn is_complete(&self) -> bool {
        let answers = self.answers_map();
        REQUIRED_QUESTIONS
            .iter()
            .all(|q| answers.get(*q).map(|a| !a.trim().is_empty()).unwrap_or(false))
    }

    /// 작성된 답변 수
    pub fn answer_count(&self) -> usize {
        let answers = self.answers_map();
        REQUIRED_QUESTIONS
            .iter()
            .filter(|q| answers.get(**q).map(|a| !a.trim().is_empty()).unwrap_or(false))
            .count()
    }
}

/// 답변 Map을 JSON 컬럼 값으로 직렬화
pub fn answers_to_json(answers: &BTreeMap<String, String>) -> String {
    serde_json::to_string(answers).unwrap_or_else(|_| "{}".to_string())
}
