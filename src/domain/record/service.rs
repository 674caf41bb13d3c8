use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};

use crate::domain::record::entity::record::{self, answers_to_json};
use crate::domain::user::entity::user;
use crate::domain::user::streak::StreakService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::time::{now_kst, today_kst};

use super::dto::{
    MonthlyEmotionResponse, RecordCreateRequest, RecordCreateResponse, RecordResponse,
    TodayRecordStatus,
};

pub struct RecordService;

impl RecordService {
    /// 오늘 일기 작성
    ///
    /// 1. 요청 데이터 검증
    /// 2. 오늘 이미 기록했는지 확인 (하루 1건)
    /// 3. Record 저장
    /// 4. 스트릭 갱신 및 뱃지 지급 확인 (실패해도 일기 저장은 유지)
    pub async fn create_today_record(
        state: &AppState,
        user_no: i64,
        req: RecordCreateRequest,
    ) -> Result<RecordCreateResponse, AppError> {
        let today = today_kst();
        info!(
            "일기 작성 시작: user_no={}, date={}, emotion={}",
            user_no, today, req.emotion
        );

        // 1. 기본 검증
        Self::validate_create_request(&req)?;

        // 사용자 존재 확인
        let user_exists = user::Entity::find_by_id(user_no)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .is_some();
        if !user_exists {
            return Err(AppError::UserNotFound(format!(
                "사용자를 찾을 수 없습니다: {}",
                user_no
            )));
        }

        // 2. 오늘 이미 기록했는지 확인
        //    동시 작성 경쟁은 (user_no, date) 유니크 인덱스가 최종 해소한다.
        let already_written = record::Entity::find()
            .filter(record::Column::UserNo.eq(user_no))
            .filter(record::Column::Date.eq(today))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .is_some();

        if already_written {
            return Err(AppError::RecordAlreadyExists(
                "오늘은 이미 기록을 작성하셨습니다".to_string(),
            ));
        }

        // 3. Record 저장
        let model = Self::build_record_model(user_no, today, &req);
        let saved = match model.insert(&state.db).await {
            Ok(saved) => saved,
            Err(e) if crate::utils::error::is_unique_violation(&e) => {
                // 동시 요청이 먼저 저장한 경우
                return Err(AppError::RecordAlreadyExists(
                    "오늘은 이미 기록을 작성하셨습니다".to_string(),
                ));
            }
            Err(e) => return Err(AppError::InternalError(e.to_string())),
        };
        info!(
            "일기 저장 완료: record_id={}, emotion={}",
            saved.record_id, saved.emotion
        );

        // 4. 스트릭 갱신 및 뱃지 지급 확인
        //    뱃지 경로 실패는 일기 작성 실패로 전파하지 않는다.
        let new_badge = match StreakService::record_written(state, user_no, today).await {
            Ok(badge) => {
                info!(
                    "스트릭 갱신 완료: user_no={}, badge={:?}",
                    user_no,
                    badge.as_ref().map(|b| b.badge_id)
                );
                badge
            }
            Err(e) => {
                warn!("스트릭 갱신 실패: {}", e.message());
                None // 일기 저장은 유지
            }
        };

        Ok(RecordCreateResponse {
            record: RecordResponse::from_model(&saved, today),
            new_badge,
        })
    }

    /// 오늘 기록 상태 조회
    pub async fn get_today_record_status(
        state: &AppState,
        user_no: i64,
    ) -> Result<TodayRecordStatus, AppError> {
        let today = today_kst();

        let today_record = record::Entity::find()
            .filter(record::Column::UserNo.eq(user_no))
            .filter(record::Column::Date.eq(today))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let status = match today_record {
            Some(rec) => {
                let is_complete = rec.is_complete();
                TodayRecordStatus {
                    has_record: true,
                    date: today,
                    record: Some(RecordResponse::from_model(&rec, today)),
                    can_create: false,
                    can_edit: true,
                    status_message: if is_complete {
                        "오늘 기록을 완료했어요!".to_string()
                    } else {
                        "오늘 기록이 진행 중이에요".to_string()
                    },
                    action_message: if is_complete {
                        "회상 퀴즈를 풀어보세요!".to_string()
                    } else {
                        "기록을 마저 완성해보세요".to_string()
                    },
                }
            }
            None => TodayRecordStatus {
                has_record: false,
                date: today,
                record: None,
                can_create: true,
                can_edit: false,
                status_message: "아직 오늘 기록을 작성하지 않으셨네요".to_string(),
                action_message: "5분만 투자해서 오늘을 기록해보세요!".to_string(),
            },
        };

        Ok(status)
    }

    /// 특정 날짜 기록 조회
    pub async fn get_record_by_date(
        state: &AppState,
        user_no: i64,
        date: NaiveDate,
    ) -> Result<Option<RecordResponse>, AppError> {
        let found = record::Entity::find()
            .filter(record::Column::UserNo.eq(user_no))
            .filter(record::Column::Date.eq(date))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(found.map(|rec| RecordResponse::from_model(&rec, today_kst())))
    }

    /// 사용자의 모든 일기 목록 조회 (최신순)
    pub async fn get_all_records_by_user(
        state: &AppState,
        user_no: i64,
    ) -> Result<Vec<RecordResponse>, AppError> {
        let records = record::Entity::find()
            .filter(record::Column::UserNo.eq(user_no))
            .order_by_desc(record::Column::Date)
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let today = today_kst();
        Ok(records
            .iter()
            .map(|rec| RecordResponse::from_model(rec, today))
            .collect())
    }

    /// 월별 감정 데이터 조회 (캘린더 표시용)
    pub async fn get_monthly_emotions(
        state: &AppState,
        user_no: i64,
        year: i32,
        month: u32,
    ) -> Result<MonthlyEmotionResponse, AppError> {
        let records = record::Entity::find()
            .filter(record::Column::UserNo.eq(user_no))
            .order_by_asc(record::Column::Date)
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let monthly: Vec<&record::Model> = records
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .collect();

        let mut emotions = BTreeMap::new();
        let mut emotion_stats: BTreeMap<String, usize> = BTreeMap::new();
        for rec in &monthly {
            emotions.insert(rec.date.format("%Y-%m-%d").to_string(), rec.emotion.clone());
            *emotion_stats.entry(rec.emotion.clone()).or_default() += 1;
        }

        let dominant_emotion = emotion_stats
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(emotion, _)| emotion.clone());

        Ok(MonthlyEmotionResponse {
            user_no,
            year,
            month,
            total_records: monthly.len(),
            emotions,
            emotion_stats,
            dominant_emotion,
            timestamp: now_kst(),
        })
    }

    /// 기록 수정 (본인 소유만)
    pub async fn update_record(
        state: &AppState,
        user_no: i64,
        record_id: i64,
        req: RecordCreateRequest,
    ) -> Result<RecordResponse, AppError> {
        info!(
            "기록 수정: user_no={}, record_id={}, emotion={}",
            user_no, record_id, req.emotion
        );

        // 기록 조회 및 권한 확인
        let record_model = Self::find_owned_record(state, user_no, record_id).await?;

        // 요청 검증
        Self::validate_create_request(&req)?;

        let mut active: record::ActiveModel = record_model.into();
        active.answers = Set(answers_to_json(&req.answers));
        active.emotion = Set(req.emotion.clone());

        // Q2 정보 갱신
        if let Some(q2_answer) = req.answers.get("Q2") {
            active.person_category = Set(Some(extract_person_category(q2_answer).to_string()));
            active.person_name = Set(Some(q2_answer.clone()));
        }
        active.updated_at = Set(now_kst());

        let updated = active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "기록 수정 완료: record_id={}, emotion={}",
            updated.record_id, updated.emotion
        );
        Ok(RecordResponse::from_model(&updated, today_kst()))
    }

    /// 기록 삭제 (본인 소유만)
    pub async fn delete_record(
        state: &AppState,
        user_no: i64,
        record_id: i64,
    ) -> Result<(), AppError> {
        info!("기록 삭제: user_no={}, record_id={}", user_no, record_id);

        let record_model = Self::find_owned_record(state, user_no, record_id).await?;

        record_model
            .delete(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("기록 삭제 완료: record_id={}", record_id);
        Ok(())
    }

    /// 일기 작성 요청 검증 (감정 포함)
    fn validate_create_request(req: &RecordCreateRequest) -> Result<(), AppError> {
        if !req.has_all_required_answers() {
            return Err(AppError::ValidationError(
                "모든 질문(Q1~Q4)과 감정을 입력해주세요".to_string(),
            ));
        }

        if req.emotion.trim().is_empty() {
            return Err(AppError::ValidationError(
                "감정을 선택해주세요".to_string(),
            ));
        }

        Ok(())
    }

    /// Record ActiveModel 구성
    fn build_record_model(
        user_no: i64,
        date: NaiveDate,
        req: &RecordCreateRequest,
    ) -> record::ActiveModel {
        let now = now_kst();

        // Q2에서 자동으로 person_category 추출
        let (person_category, person_name) = match req.answers.get("Q2") {
            Some(q2_answer) => (
                Some(extract_person_category(q2_answer).to_string()),
                Some(q2_answer.clone()),
            ),
            None => (None, None),
        };

        record::ActiveModel {
            user_no: Set(user_no),
            date: Set(date),
            answers: Set(answers_to_json(&req.answers)),
            person_category: Set(person_category),
            person_name: Set(person_name),
            emotion: Set(req.emotion.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    /// 기록 조회 + 소유권 확인
    async fn find_owned_record(
        state: &AppState,
        user_no: i64,
        record_id: i64,
    ) -> Result<record::Model, AppError> {
        record::Entity::find_by_id(record_id)
            .filter(record::Column::UserNo.eq(user_no))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::RecordNotFound("해당 기록을 찾을 수 없습니다".to_string())
            })
    }
}

/// Q2 답변에서 사람 카테고리 자동 추출
pub fn extract_person_category(q2_answer: &str) -> &'static str {
    let answer = q2_answer.to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| answer.contains(k));

    if contains_any(&["가족", "엄마", "아빠", "딸", "아들", "부모"]) {
        "가족"
    } else if contains_any(&["친구", "동기", "지인"]) {
        "친구"
    } else if contains_any(&["직장", "동료", "상사", "부하", "회사"]) {
        "직장동료"
    } else if contains_any(&["혼자", "나만", "홀로"]) {
        "혼자"
    } else {
        "기타"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_category_should_classify_family_keywords() {
        assert_eq!(extract_person_category("엄마랑 저녁을 먹었다"), "가족");
        assert_eq!(extract_person_category("아들 생일이었다"), "가족");
    }

    #[test]
    fn person_category_should_classify_friends_and_coworkers() {
        assert_eq!(extract_person_category("오랜 친구를 만났다"), "친구");
        assert_eq!(extract_person_category("회사 동료와 점심"), "직장동료");
    }

    #[test]
    fn person_category_should_classify_alone() {
        assert_eq!(extract_person_category("혼자 산책했다"), "혼자");
    }

    #[test]
    fn person_category_should_default_to_etc() {
        assert_eq!(extract_person_category("강아지와 놀았다"), "기타");
    }

    #[test]
    fn create_request_should_require_all_answers() {
        let mut answers = BTreeMap::new();
        answers.insert("Q1".to_string(), "네".to_string());
        answers.insert("Q2".to_string(), "엄마".to_string());
        answers.insert("Q3".to_string(), "김치찌개".to_string());

        let req = RecordCreateRequest {
            answers: answers.clone(),
            emotion: "happy".to_string(),
        };
        assert!(!req.has_all_required_answers());

        answers.insert("Q4".to_string(), "산책".to_string());
        let req = RecordCreateRequest {
            answers,
            emotion: "happy".to_string(),
        };
        assert!(req.has_all_required_answers());
    }
}
