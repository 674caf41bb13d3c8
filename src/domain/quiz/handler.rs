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

use super::dto::{
    QuizDraftResponse, QuizResponse, QuizResultSummary, QuizSubmitRequest, SkipStatusResponse,
    SuccessQuizListResponse, SuccessQuizResultResponse,
};
use super::seed::QuestionSeed;
use super::service::QuizService;

/// 개별 퀴즈 생성 API (개발용)
///
/// 질문 시드를 직접 받아 GPT로 퀴즈를 생성합니다. 저장하지 않으며
/// 프롬프트 점검을 위해 정답을 함께 반환합니다.
#[utoipa::path(
    post,
    path = "/api/quizzes/generate",
    request_body = QuestionSeed,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "퀴즈 생성 성공"),
        (status = 400, description = "잘못된 질문 시드 데이터", body = ErrorResponse),
        (status = 502, description = "GPT API 호출 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn generate_quiz(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(seed): Json<QuestionSeed>,
) -> Result<Json<BaseResponse<QuizDraftResponse>>, AppError> {
    if seed.answer.trim().is_empty() {
        return Err(AppError::ValidationError(
            "시드 답변이 비어 있습니다.".to_string(),
        ));
    }

    let draft = state.quiz_generator.generate(&seed).await?;

    Ok(Json(BaseResponse::success(QuizDraftResponse {
        question: draft.question,
        answer: draft.answer,
        choices: draft.choices,
    })))
}

/// 오늘의 퀴즈 생성 API
///
/// 최근 3일간의 일기 기록을 바탕으로 오늘의 회상 퀴즈를 최대 2개 생성합니다.
#[utoipa::path(
    get,
    path = "/api/quizzes/today",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "퀴즈 생성 성공", body = SuccessQuizListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 502, description = "GPT API 호출 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn get_today_quizzes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<QuizResponse>>>, AppError> {
    let user_no = user.user_no()?;
    let quizzes = QuizService::generate_today_quizzes(&state, user_no).await?;

    Ok(Json(BaseResponse::success(quizzes)))
}

/// 퀴즈 정답 제출 API
///
/// 퀴즈의 정답을 제출하거나 건너뛰기를 처리합니다.
#[utoipa::path(
    post,
    path = "/api/quizzes/submit",
    request_body = QuizSubmitRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정답 제출 성공"),
        (status = 404, description = "존재하지 않는 퀴즈", body = ErrorResponse),
        (status = 429, description = "건너뛰기 횟수 초과", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<QuizSubmitRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    let user_no = user.user_no()?;
    QuizService::submit_quiz_answer(&state, user_no, req).await?;

    Ok(Json(BaseResponse::empty("퀴즈 제출이 완료되었습니다.")))
}

/// 오늘 스킵 상태 조회 API
///
/// 오늘 건너뛴 퀴즈 횟수와 남은 건너뛰기 가능 횟수를 조회합니다. (하루 최대 2회)
#[utoipa::path(
    get,
    path = "/api/quizzes/today/skip-status",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "스킵 상태 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn get_today_skip_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<SkipStatusResponse>>, AppError> {
    let user_no = user.user_no()?;
    let status = QuizService::get_today_skip_status(&state, user_no).await?;

    Ok(Json(BaseResponse::success(status)))
}

/// 오늘 오답 퀴즈 조회 API
///
/// 오늘 풀었던 퀴즈 중 틀렸거나 건너뛴 퀴즈들을 조회합니다.
#[utoipa::path(
    get,
    path = "/api/quizzes/today/wrong",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오답 퀴즈 조회 성공", body = SuccessQuizListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn get_today_wrong_quizzes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<QuizResponse>>>, AppError> {
    let user_no = user.user_no()?;
    let quizzes = QuizService::get_today_wrong_quizzes(&state, user_no).await?;

    Ok(Json(BaseResponse::success(quizzes)))
}

/// 다음 재시도 퀴즈 조회 API
///
/// 오답이거나 건너뛴 퀴즈 중 다음으로 재시도할 퀴즈 1개를 반환합니다.
/// 더 이상 재시도할 퀴즈가 없으면 result가 null입니다.
#[utoipa::path(
    get,
    path = "/api/quizzes/today/retry-next",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "재시도 퀴즈 반환"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn get_next_retry_quiz(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Option<QuizResponse>>>, AppError> {
    let user_no = user.user_no()?;
    let quiz = QuizService::get_next_retry_quiz(&state, user_no).await?;

    Ok(Json(BaseResponse::success(quiz)))
}

/// 오늘 퀴즈 결과 요약 API
///
/// 오늘 풀었던 퀴즈의 총 문항 수와 정답 수를 요약해서 반환합니다.
#[utoipa::path(
    get,
    path = "/api/quizzes/today/result",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "퀴즈 결과 요약 반환", body = SuccessQuizResultResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn get_today_quiz_result_summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<QuizResultSummary>>, AppError> {
    let user_no = user.user_no()?;
    let summary = QuizService::get_today_quiz_result_summary(&state, user_no).await?;

    Ok(Json(BaseResponse::success(summary)))
}

/// 단일 퀴즈 삭제 API
///
/// 특정 퀴즈를 삭제합니다. 본인이 생성한 퀴즈만 삭제 가능합니다.
#[utoipa::path(
    delete,
    path = "/api/quizzes/{quiz_id}",
    params(
        ("quiz_id" = i64, Path, description = "삭제할 퀴즈 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "퀴즈 삭제 성공"),
        (status = 403, description = "삭제 권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 퀴즈", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn delete_quiz(
    State(state): State<AppState>,
    user: AuthUser,
    Path(quiz_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_no = user.user_no()?;
    QuizService::delete_quiz(&state, user_no, quiz_id).await?;

    Ok(Json(BaseResponse::empty("퀴즈가 삭제되었습니다.")))
}

/// 오늘 퀴즈 전체 삭제 API
///
/// 오늘 생성된 모든 퀴즈를 제출 여부와 무관하게 삭제합니다.
#[utoipa::path(
    delete,
    path = "/api/quizzes/today",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오늘 퀴즈 전체 삭제 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Quiz"
)]
pub async fn delete_today_quizzes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_no = user.user_no()?;
    QuizService::delete_today_quizzes(&state, user_no).await?;

    Ok(Json(BaseResponse::empty(
        "오늘 생성된 퀴즈가 모두 삭제되었습니다.",
    )))
}
