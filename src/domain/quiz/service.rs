use std::collections::HashSet;

use chrono::Duration;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::ai::client::QuizDraft;
use crate::domain::quiz::entity::quiz::{self, QuestionType};
use crate::domain::quiz::seed::{extract_seeds, QuestionSeed};
use crate::domain::record::entity::record;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::time::{day_bounds, now_kst, today_kst};

use super::dto::{QuizResponse, QuizResultSummary, QuizSubmitRequest, SkipStatusResponse};

/// 한 번의 생성 호출에서 만드는 최대 퀴즈 수
const DAILY_QUIZ_LIMIT: usize = 2;

/// 하루 최대 건너뛰기 횟수
const DAILY_SKIP_LIMIT: i32 = 2;

/// 시드 추출 대상 기간 (오늘 제외, 일 단위)
const SEED_WINDOW_DAYS: i64 = 3;

/// 저장되는 퀴즈의 공통 힌트 문구
const QUIZ_CONTEXT: &str = "기록 기반 회상 퀴즈";

/// 이미 제출된 퀴즈에 다시 제출이 들어왔을 때의 처리 방침
///
/// 현재는 덮어쓰기를 허용한다. 거부로 바꾸려면 상수만 교체하면 된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResubmitPolicy {
    Overwrite,
    Reject,
}

const RESUBMIT_POLICY: ResubmitPolicy = ResubmitPolicy::Overwrite;

pub struct QuizService;

impl QuizService {
    /// 오늘의 퀴즈 생성
    ///
    /// 최근 3일 기록에서 시드를 뽑아 최대 2개의 퀴즈를 생성한다.
    /// (사용자, 기록, 질문 유형)이 같은 퀴즈는 다시 만들지 않는다.
    pub async fn generate_today_quizzes(
        state: &AppState,
        user_no: i64,
    ) -> Result<Vec<QuizResponse>, AppError> {
        info!("오늘 퀴즈 생성 요청: user_no={}", user_no);

        let today = today_kst();
        let from = today - Duration::days(SEED_WINDOW_DAYS);
        let to = today - Duration::days(1);

        // 1. 최근 기록 조회 (오늘 제외 3일)
        let recent_records = record::Entity::find()
            .filter(record::Column::UserNo.eq(user_no))
            .filter(record::Column::Date.gte(from))
            .filter(record::Column::Date.lte(to))
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        // 2. 시드 추출 (날짜 오름차순, Q2 → Q3 → Q4)
        let seeds = extract_seeds(&recent_records);
        if seeds.is_empty() {
            return Ok(Vec::new());
        }

        // 3. 이미 생성된 (기록, 질문 유형) 조합 수집
        let record_ids: Vec<i64> = recent_records.iter().map(|r| r.record_id).collect();
        let existing_quizzes = quiz::Entity::find()
            .filter(quiz::Column::UserNo.eq(user_no))
            .filter(quiz::Column::RecordId.is_in(record_ids))
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let existing: HashSet<(i64, QuestionType)> = existing_quizzes
            .iter()
            .map(|q| (q.record_id, q.question_id.clone()))
            .collect();

        // 4. 생성 대상 선정 (중복 제외, 최대 2개)
        let planned = plan_generation(seeds, &existing, DAILY_QUIZ_LIMIT);

        // 5. GPT 호출 및 저장
        //    생성기 호출이 실패하면 전체 호출을 에러로 중단한다.
        //    이미 저장된 앞선 퀴즈는 유지된다.
        let mut responses = Vec::with_capacity(planned.len());
        for seed in &planned {
            let draft = state.quiz_generator.generate(seed).await?;

            let model = build_quiz_model(user_no, seed, &draft);
            let saved = model
                .insert(&state.db)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?;

            info!(
                "퀴즈 저장 완료: quiz_id={}, record_id={}, question_id={:?}",
                saved.quiz_id, saved.record_id, saved.question_id
            );
            responses.push(QuizResponse::from(&saved));
        }

        Ok(responses)
    }

    /// 퀴즈 정답 제출 / 건너뛰기 처리
    pub async fn submit_quiz_answer(
        state: &AppState,
        user_no: i64,
        req: QuizSubmitRequest,
    ) -> Result<(), AppError> {
        let quiz_model = quiz::Entity::find_by_id(req.quiz_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::QuizNotFound("퀴즈가 존재하지 않습니다.".to_string()))?;

        // 본인 퀴즈만 제출 가능
        if quiz_model.user_no != user_no {
            return Err(AppError::QuizAccessDenied(
                "본인의 퀴즈만 제출할 수 있습니다.".to_string(),
            ));
        }

        // 재제출 방침 확인
        if quiz_model.submitted_at.is_some() && RESUBMIT_POLICY == ResubmitPolicy::Reject {
            return Err(AppError::QuizAlreadySubmitted(
                "이미 제출한 퀴즈입니다.".to_string(),
            ));
        }

        let mut active: quiz::ActiveModel = quiz_model.clone().into();

        if req.skipped {
            // 건너뛰기 쿼터 확인 (상태 변경 전에 검사)
            let skipped_today = Self::count_skipped_today(state, user_no).await?;
            if skipped_today >= DAILY_SKIP_LIMIT {
                return Err(AppError::QuizSkipLimitExceeded(
                    "오늘은 더 이상 퀴즈를 건너뛸 수 없습니다 (하루 최대 2회)".to_string(),
                ));
            }

            active.user_answer = Set(None);
            active.is_correct = Set(Some(false)); // 건너뛴 경우 정답 처리 안됨
            active.skipped = Set(true);
        } else {
            let submitted = req.user_answer.unwrap_or_default();
            let is_correct = answers_match(&quiz_model.answer, &submitted);

            active.user_answer = Set(Some(submitted));
            active.is_correct = Set(Some(is_correct));
            active.skipped = Set(false);
        }

        active.submitted_at = Set(Some(now_kst()));
        let updated = active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "퀴즈 제출 처리 완료: quiz_id={}, skipped={}, is_correct={:?}",
            updated.quiz_id, updated.skipped, updated.is_correct
        );

        Ok(())
    }

    /// 오늘 스킵 횟수 및 남은 가능 횟수 조회
    pub async fn get_today_skip_status(
        state: &AppState,
        user_no: i64,
    ) -> Result<SkipStatusResponse, AppError> {
        let skipped_count = Self::count_skipped_today(state, user_no).await?;
        let remaining_skips = (DAILY_SKIP_LIMIT - skipped_count).max(0);

        Ok(SkipStatusResponse {
            skipped_count,
            remaining_skips,
        })
    }

    /// 오늘 푼 퀴즈 중 오답/건너뛴 퀴즈 전체 목록 조회
    pub async fn get_today_wrong_quizzes(
        state: &AppState,
        user_no: i64,
    ) -> Result<Vec<QuizResponse>, AppError> {
        let wrong_or_skipped = Self::find_today_wrong_or_skipped(state, user_no).await?;
        Ok(wrong_or_skipped.iter().map(QuizResponse::from).collect())
    }

    /// 다음 재시도 퀴즈 조회
    ///
    /// 오답/건너뛴 목록의 첫 번째 퀴즈를 돌려준다. 해당 퀴즈의 상태가
    /// 바뀌기 전까지는 반복 호출해도 같은 퀴즈가 나온다.
    pub async fn get_next_retry_quiz(
        state: &AppState,
        user_no: i64,
    ) -> Result<Option<QuizResponse>, AppError> {
        let wrong_or_skipped = Self::find_today_wrong_or_skipped(state, user_no).await?;
        Ok(wrong_or_skipped.first().map(QuizResponse::from))
    }

    /// 오늘 퀴즈 결과 요약 (총 문항 수, 정답 수)
    pub async fn get_today_quiz_result_summary(
        state: &AppState,
        user_no: i64,
    ) -> Result<QuizResultSummary, AppError> {
        let (start, end) = day_bounds(today_kst());

        let today_quizzes = quiz::Entity::find()
            .filter(quiz::Column::UserNo.eq(user_no))
            .filter(quiz::Column::SubmittedAt.gte(start))
            .filter(quiz::Column::SubmittedAt.lt(end))
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let total = today_quizzes.len() as i32;
        let correct = today_quizzes
            .iter()
            .filter(|q| q.is_correct == Some(true))
            .count() as i32;

        Ok(QuizResultSummary::new(total, correct))
    }

    /// 단일 퀴즈 삭제 (본인 소유만)
    pub async fn delete_quiz(
        state: &AppState,
        user_no: i64,
        quiz_id: i64,
    ) -> Result<(), AppError> {
        let quiz_model = quiz::Entity::find_by_id(quiz_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::QuizNotFound("존재하지 않는 퀴즈입니다.".to_string()))?;

        if quiz_model.user_no != user_no {
            return Err(AppError::QuizAccessDenied(
                "삭제 권한이 없습니다.".to_string(),
            ));
        }

        quiz_model
            .delete(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("퀴즈 삭제 완료: quiz_id={}, user_no={}", quiz_id, user_no);
        Ok(())
    }

    /// 오늘 생성된 퀴즈 전체 삭제
    ///
    /// 제출 여부와 무관하게 오늘 만들어진 퀴즈를 모두 지운다.
    pub async fn delete_today_quizzes(state: &AppState, user_no: i64) -> Result<u64, AppError> {
        let (start, end) = day_bounds(today_kst());

        let result = quiz::Entity::delete_many()
            .filter(quiz::Column::UserNo.eq(user_no))
            .filter(quiz::Column::CreatedAt.gte(start))
            .filter(quiz::Column::CreatedAt.lt(end))
            .exec(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "오늘 퀴즈 전체 삭제 완료: user_no={}, 삭제된 수={}",
            user_no, result.rows_affected
        );
        Ok(result.rows_affected)
    }

    /// 오늘 건너뛴 퀴즈 수
    async fn count_skipped_today(state: &AppState, user_no: i64) -> Result<i32, AppError> {
        let (start, end) = day_bounds(today_kst());

        let count = quiz::Entity::find()
            .filter(quiz::Column::UserNo.eq(user_no))
            .filter(quiz::Column::Skipped.eq(true))
            .filter(quiz::Column::SubmittedAt.gte(start))
            .filter(quiz::Column::SubmittedAt.lt(end))
            .count(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(count as i32)
    }

    /// 오늘 제출된 퀴즈 중 오답이거나 건너뛴 퀴즈 조회 (quiz_id 오름차순)
    async fn find_today_wrong_or_skipped(
        state: &AppState,
        user_no: i64,
    ) -> Result<Vec<quiz::Model>, AppError> {
        let (start, end) = day_bounds(today_kst());

        quiz::Entity::find()
            .filter(quiz::Column::UserNo.eq(user_no))
            .filter(quiz::Column::SubmittedAt.gte(start))
            .filter(quiz::Column::SubmittedAt.lt(end))
            .filter(
                Condition::any()
                    .add(quiz::Column::IsCorrect.eq(false))
                    .add(quiz::Column::Skipped.eq(true)),
            )
            .order_by_asc(quiz::Column::QuizId)
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}

/// 시드 목록에서 생성 대상 선정
///
/// 시드 순서를 유지한 채, 이미 퀴즈가 존재하는 (기록, 질문 유형) 조합을
/// 건너뛰고 최대 limit개를 고른다. 선정되지 못한 시드는 별도로 소모되지
/// 않는다. 다음 호출에서는 새로 생성된 퀴즈 때문에 자연히 제외된다.
pub fn plan_generation(
    seeds: Vec<QuestionSeed>,
    existing: &HashSet<(i64, QuestionType)>,
    limit: usize,
) -> Vec<QuestionSeed> {
    seeds
        .into_iter()
        .filter(|s| !existing.contains(&(s.record_id, s.question_id.clone())))
        .take(limit)
        .collect()
}

/// 정답 비교: 앞뒤 공백 제거 후 대소문자 무시 비교
pub fn answers_match(canonical: &str, submitted: &str) -> bool {
    canonical.trim().to_lowercase() == submitted.trim().to_lowercase()
}

/// 시드와 초안으로 저장용 ActiveModel 구성 (제출 필드는 모두 NULL)
fn build_quiz_model(user_no: i64, seed: &QuestionSeed, draft: &QuizDraft) -> quiz::ActiveModel {
    quiz::ActiveModel {
        user_no: Set(user_no),
        record_id: Set(seed.record_id),
        question_id: Set(seed.question_id.clone()),
        context: Set(QUIZ_CONTEXT.to_string()),
        question: Set(draft.question.clone()),
        answer: Set(draft.answer.clone()),
        choices: Set(quiz::join_choices(&draft.choices)),
        user_answer: Set(None),
        is_correct: Set(None),
        skipped: Set(false),
        submitted_at: Set(None),
        created_at: Set(now_kst()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::ActiveValue;

    fn seed(record_id: i64, question_id: QuestionType) -> QuestionSeed {
        QuestionSeed {
            question: question_id.question_text().to_string(),
            question_id,
            answer: "답변".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            record_id,
        }
    }

    #[test]
    fn plan_generation_should_cap_at_limit() {
        let seeds = vec![
            seed(1, QuestionType::Q2),
            seed(1, QuestionType::Q3),
            seed(1, QuestionType::Q4),
        ];
        let planned = plan_generation(seeds, &HashSet::new(), 2);

        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].question_id, QuestionType::Q2);
        assert_eq!(planned[1].question_id, QuestionType::Q3);
    }

    #[test]
    fn plan_generation_should_skip_existing_pairs() {
        let seeds = vec![
            seed(1, QuestionType::Q2),
            seed(1, QuestionType::Q3),
            seed(2, QuestionType::Q2),
        ];
        let mut existing = HashSet::new();
        existing.insert((1, QuestionType::Q2));

        let planned = plan_generation(seeds, &existing, 2);

        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].record_id, 1);
        assert_eq!(planned[0].question_id, QuestionType::Q3);
        assert_eq!(planned[1].record_id, 2);
    }

    #[test]
    fn plan_generation_should_never_duplicate_a_triple() {
        // 같은 (기록, 질문 유형) 시드가 반복되어도 기존 조합은 다시 선정되지 않는다
        let seeds = vec![seed(1, QuestionType::Q3), seed(1, QuestionType::Q3)];
        let mut existing = HashSet::new();
        existing.insert((1, QuestionType::Q3));

        let planned = plan_generation(seeds, &existing, 2);
        assert!(planned.is_empty());
    }

    #[test]
    fn answers_match_should_ignore_case_and_whitespace() {
        assert!(answers_match("seoul", "Seoul "));
        assert!(answers_match(" Seoul", "SEOUL"));
        assert!(answers_match("김치찌개", " 김치찌개 "));
        assert!(!answers_match("seoul", "busan"));
    }

    #[test]
    fn build_quiz_model_should_leave_submission_fields_null() {
        let draft = QuizDraft {
            question: "7월 1일, 어떤 음식을 드셨나요?".to_string(),
            answer: "김치찌개".to_string(),
            choices: vec![
                "김치찌개".to_string(),
                "불고기".to_string(),
                "비빔밥".to_string(),
            ],
        };
        let model = build_quiz_model(7, &seed(42, QuestionType::Q3), &draft);

        assert_eq!(model.user_no, ActiveValue::Set(7));
        assert_eq!(model.record_id, ActiveValue::Set(42));
        assert_eq!(model.question_id, ActiveValue::Set(QuestionType::Q3));
        assert_eq!(model.answer, ActiveValue::Set("김치찌개".to_string()));
        assert_eq!(
            model.choices,
            ActiveValue::Set("김치찌개||불고기||비빔밥".to_string())
        );
        assert_eq!(model.user_answer, ActiveValue::Set(None));
        assert_eq!(model.is_correct, ActiveValue::Set(None));
        assert_eq!(model.submitted_at, ActiveValue::Set(None));
        assert_eq!(model.skipped, ActiveValue::Set(false));
    }
}
