use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{
    MonthlyEmotionResponse, RecordCreateRequest, RecordCreateResponse, RecordResponse,
    TodayRecordStatus,
};
use super::service::RecordService;

/// 월별 감정 조회 쿼리 파라미터
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlyEmotionParams {
    /// 조회할 연도 (2020~2030)
    pub year: i32,
    /// 조회할 월 (1~12)
    pub month: u32,
}

/// 오늘 일기 작성 API
///
/// 오늘 날짜로 새 일기를 작성합니다. 작성 시 스트릭이 갱신되고
/// 임계값 도달 시 새로 지급된 뱃지가 함께 반환됩니다.
#[utoipa::path(
    post,
    path = "/api/records",
    request_body = RecordCreateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "일기 작성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 409, description = "이미 작성된 일기", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn create_today_record(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<RecordCreateRequest>,
) -> Result<Json<BaseResponse<RecordCreateResponse>>, AppError> {
    let user_no = user.user_no()?;
    let response = RecordService::create_today_record(&state, user_no, req).await?;

    Ok(Json(BaseResponse::success(response)))
}

/// 오늘 기록 상태 조회 API
#[utoipa::path(
    get,
    path = "/api/records/today",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오늘 기록 상태 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn get_today_record_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<TodayRecordStatus>>, AppError> {
    let user_no = user.user_no()?;
    let status = RecordService::get_today_record_status(&state, user_no).await?;

    Ok(Json(BaseResponse::success(status)))
}

/// 특정 날짜 기록 조회 API
///
/// 해당 날짜의 기록이 없으면 result가 null입니다.
#[utoipa::path(
    get,
    path = "/api/records/date/{date}",
    params(
        ("date" = String, Path, description = "조회할 날짜 (YYYY-MM-DD)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "기록 조회 성공"),
        (status = 400, description = "날짜 형식 오류", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn get_record_by_date(
    State(state): State<AppState>,
    user: AuthUser,
    Path(date): Path<String>,
) -> Result<Json<BaseResponse<Option<RecordResponse>>>, AppError> {
    let user_no = user.user_no()?;

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("날짜 형식이 올바르지 않습니다. (YYYY-MM-DD 형식 필요)".to_string())
    })?;

    let record = RecordService::get_record_by_date(&state, user_no, date).await?;
    Ok(Json(BaseResponse::success(record)))
}

/// 사용자 전체 일기 목록 조회 API
///
/// 특정 사용자의 모든 일기를 최신순으로 조회합니다.
#[utoipa::path(
    get,
    path = "/api/records/user/{user_no}/all",
    params(
        ("user_no" = i64, Path, description = "조회할 사용자 번호")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "일기 목록 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn get_all_records_by_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_no): Path<i64>,
) -> Result<Json<BaseResponse<Vec<RecordResponse>>>, AppError> {
    let records = RecordService::get_all_records_by_user(&state, user_no).await?;
    Ok(Json(BaseResponse::success(records)))
}

/// 월별 감정 데이터 조회 API
///
/// 특정 월의 날짜별 감정과 감정 통계를 조회합니다.
#[utoipa::path(
    get,
    path = "/api/records/emotions/{user_no}",
    params(
        ("user_no" = i64, Path, description = "조회할 사용자 번호"),
        MonthlyEmotionParams
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "월별 감정 데이터 조회 성공"),
        (status = 400, description = "잘못된 연도/월", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn get_monthly_emotions(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_no): Path<i64>,
    Query(params): Query<MonthlyEmotionParams>,
) -> Result<Json<BaseResponse<MonthlyEmotionResponse>>, AppError> {
    // 입력 검증
    if !(2020..=2030).contains(&params.year) {
        return Err(AppError::BadRequest(
            "유효하지 않은 연도입니다 (2020-2030)".to_string(),
        ));
    }
    if !(1..=12).contains(&params.month) {
        return Err(AppError::BadRequest(
            "유효하지 않은 월입니다 (1-12)".to_string(),
        ));
    }

    let response =
        RecordService::get_monthly_emotions(&state, user_no, params.year, params.month).await?;
    Ok(Json(BaseResponse::success(response)))
}

/// 일기 수정 API
#[utoipa::path(
    put,
    path = "/api/records/{record_id}",
    params(
        ("record_id" = i64, Path, description = "수정할 일기 ID")
    ),
    request_body = RecordCreateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "기록 수정 성공"),
        (status = 404, description = "기록을 찾을 수 없음", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn update_record(
    State(state): State<AppState>,
    user: AuthUser,
    Path(record_id): Path<i64>,
    Json(req): Json<RecordCreateRequest>,
) -> Result<Json<BaseResponse<RecordResponse>>, AppError> {
    let user_no = user.user_no()?;
    let response = RecordService::update_record(&state, user_no, record_id, req).await?;

    Ok(Json(BaseResponse::success(response)))
}

/// 일기 삭제 API
#[utoipa::path(
    delete,
    path = "/api/records/{record_id}",
    params(
        ("record_id" = i64, Path, description = "삭제할 일기 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "기록 삭제 성공"),
        (status = 404, description = "기록을 찾을 수 없음", body = ErrorResponse)
    ),
    tag = "Record"
)]
pub async fn delete_record(
    State(state): State<AppState>,
    user: AuthUser,
    Path(record_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_no = user.user_no()?;
    RecordService::delete_record(&state, user_no, record_id).await?;

    Ok(Json(BaseResponse::empty("기록이 삭제되었습니다.")))
}
