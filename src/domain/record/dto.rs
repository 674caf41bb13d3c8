use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::badge::dto::UserBadgeResponse;

use super::entity::record;

/// 일기 작성/수정 요청
///
/// answers는 Q1~Q4 키를 모두 가져야 하며 각 답변은 비어 있을 수 없다.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordCreateRequest {
    pub answers: BTreeMap<String, String>,
    /// 감정 태그 (예: happy, gloomy)
    pub emotion: String,
}

impl RecordCreateRequest {
    /// 모든 필수 질문(Q1~Q4)에 답했는지 확인
    pub fn has_all_required_answers(&self) -> bool {
        record::REQUIRED_QUESTIONS.iter().all(|q| {
            self.answers
                .get(*q)
                .map(|a| !a.trim().is_empty())
                .unwrap_or(false)
        })
    }
}

/// 일기 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub record_id: i64,
    pub user_no: i64,
    pub date: NaiveDate,
    pub answers: BTreeMap<String, String>,
    pub emotion: String,
    pub is_complete: bool,
    pub is_today: bool,
    pub answer_count: usize,
    pub status_message: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RecordResponse {
    /// 엔티티를 응답 DTO로 변환 (오늘 날짜 기준 포함)
    pub fn from_model(model: &record::Model, today: NaiveDate) -> Self {
        let is_complete = model.is_complete();
        Self {
            record_id: model.record_id,
            user_no: model.user_no,
            date: model.date,
            answers: model.answers_map(),
            emotion: model.emotion.clone(),
            is_complete,
            is_today: model.date == today,
            answer_count: model.answer_count(),
            status_message: if is_complete {
                "완료".to_string()
            } else {
                "진행 중".to_string()
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 일기 작성 응답 (새로 지급된 뱃지 포함)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordCreateResponse {
    pub record: RecordResponse,
    /// 이번 작성으로 새로 지급된 뱃지 (없으면 null)
    pub new_badge: Option<UserBadgeResponse>,
}

/// 오늘 기록 상태 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayRecordStatus {
    pub has_record: bool,
    pub date: NaiveDate,
    pub record: Option<RecordResponse>,
    pub can_create: bool,
    pub can_edit: bool,
    pub status_message: String,
    pub action_message: String,
}

/// 월별 감정 데이터 응답 (캘린더 표시용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEmotionResponse {
    pub user_no: i64,
    pub year: i32,
    pub month: u32,
    /// 날짜별 감정 맵 (예: {"2025-07-01": "happy"})
    pub emotions: BTreeMap<String, String>,
    pub total_records: usize,
    /// 감정별 빈도 (예: {"happy": 5, "sad": 2})
    pub emotion_stats: BTreeMap<String, usize>,
    /// 가장 많이 나타난 감정
    pub dominant_emotion: Option<String>,
    pub timestamp: NaiveDateTime,
}
