use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::quiz::entity::quiz;

/// 퀴즈 문제 제공 DTO
///
/// 정답은 서버에만 보관한다. 풀어야 할 문제를 내려주면서
/// 정답을 함께 내려주지 않는 것이 계약이다.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub quiz_id: i64,
    pub context: String,
    pub question: String,
    pub choices: Vec<String>,
}

impl From<&quiz::Model> for QuizResponse {
    fn from(model: &quiz::Model) -> Self {
        Self {
            quiz_id: model.quiz_id,
            context: model.context.clone(),
            question: model.question.clone(),
            choices: model.choices_list(),
        }
    }
}

/// 개발용 퀴즈 생성 응답 (저장하지 않으며 정답을 포함)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraftResponse {
    pub question: String,
    pub answer: String,
    pub choices: Vec<String>,
}

/// 퀴즈 정답 제출 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmitRequest {
    #[validate(range(min = 1, message = "quizId는 1 이상의 양수여야 합니다."))]
    pub quiz_id: i64,
    /// 제출 답안 (건너뛰기 시 생략 가능)
    pub user_answer: Option<String>,
    /// 건너뛰기 여부 (기본 false)
    #[serde(default)]
    pub skipped: bool,
}

/// 오늘 스킵 현황 응답
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkipStatusResponse {
    /// 오늘 건너뛴 횟수
    pub skipped_count: i32,
    /// 남은 건너뛰기 가능 횟수
    pub remaining_skips: i32,
}

/// 오늘 퀴즈 결과 요약
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultSummary {
    pub all_correct: bool,
    pub total_solved: i32,
    pub correct_count: i32,
}

impl QuizResultSummary {
    /// 전체 풀이 수와 정답 수로 요약 생성
    ///
    /// all_correct는 한 문제도 풀지 않은 날에는 성립하지 않는다.
    pub fn new(total_solved: i32, correct_count: i32) -> Self {
        Self {
            all_correct: total_solved > 0 && total_solved == correct_count,
            total_solved,
            correct_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessQuizListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<QuizResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessQuizResultResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: QuizResultSummary,
}
