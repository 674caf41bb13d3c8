use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 보기 목록 직렬화 구분자
pub const CHOICES_SEPARATOR: &str = "||";

/// 회상 퀴즈의 출처 질문 유형 (Q2~Q4)
///
/// Q1(아침 식사 여부)은 회상 퀴즈 소재로 쓰지 않는다.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "QuestionType")]
pub enum QuestionType {
    #[sea_orm(string_value = "Q2")]
    Q2,
    #[sea_orm(string_value = "Q3")]
    Q3,
    #[sea_orm(string_value = "Q4")]
    Q4,
}

impl QuestionType {
    /// 고정 질문 문장
    pub fn question_text(&self) -> &'static str {
        match self {
            QuestionType::Q2 => "누구와 시간을 보냈나요?",
            QuestionType::Q3 => "무엇을 먹었나요?",
            QuestionType::Q4 => "기억에 남는 일은 무엇인가요?",
        }
    }

    /// 답변 Map에서 쓰는 키
    pub fn answer_key(&self) -> &'static str {
        match self {
            QuestionType::Q2 => "Q2",
            QuestionType::Q3 => "Q3",
            QuestionType::Q4 => "Q4",
        }
    }

    /// 시드 정렬용 순서 (Q2 < Q3 < Q4)
    pub fn order_index(&self) -> u8 {
        match self {
            QuestionType::Q2 => 0,
            QuestionType::Q3 => 1,
            QuestionType::Q4 => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub quiz_id: i64,
    pub user_no: i64,
    /// 출처 일기 기록
    pub record_id: i64,
    pub question_id: QuestionType,
    /// 문제 힌트
    pub context: String,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    /// 정답 (응답 DTO에는 노출하지 않는다)
    pub answer: String,
    /// 3지선다 보기 ("||" 구분 문자열)
    #[sea_orm(column_type = "Text")]
    pub choices: String,
    /// 사용자가 제출한 답 (제출 전 NULL)
    pub user_answer: Option<String>,
    /// 정답 여부 (제출 전 NULL)
    pub is_correct: Option<bool>,
    /// 건너뛰기 여부
    pub skipped: bool,
    /// 제출 시각 (제출 전 NULL)
    pub submitted_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserNo",
        to = "crate::domain::user::entity::user::Column::UserNo"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::record::entity::record::Entity",
        from = "Column::RecordId",
        to = "crate::domain::record::entity::record::Column::RecordId"
    )]
    Record,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::record::entity::record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Record.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 보기 컬럼을 목록으로 분해
    pub fn choices_list(&self) -> Vec<String> {
        self.choices
            .split(CHOICES_SEPARATOR)
            .map(|s| s.to_string())
            .collect()
    }
}

/// 보기 목록을 컬럼 값으로 직렬화
pub fn join_choices(choices: &[String]) -> String {
    choices.join(CHOICES_SEPARATOR)
}
