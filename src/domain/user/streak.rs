//! 스트릭 및 뱃지 엔진
//!
//! 일기 작성 이벤트마다 연속 작성 일수를 갱신하고, 임계값 도달 시
//! 뱃지를 1회 지급한다. 사용자 행의 스트릭 필드는 이 엔진만 수정한다.
//!
//! 스트릭 갱신이 1순위 보장이다. 뱃지 경로의 어떤 실패도 이미 저장된
//! 스트릭을 되돌리지 않는다.

use chrono::{Duration, NaiveDate};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::{error, info, warn};

use crate::domain::badge::dto::UserBadgeResponse;
use crate::domain::badge::entity::{badge, user_badge};
use crate::domain::user::entity::user::{self, add_badge_to_cache};
use crate::state::AppState;
use crate::utils::error::{is_unique_violation, AppError};
use crate::utils::time::now_kst;

/// 스트릭 임계값 → 뱃지 매핑
///
/// 정적 전역이 아니라 AppState에 주입되는 설정이다. 테스트에서
/// 임계값을 재정의할 수 있다.
#[derive(Debug, Clone)]
pub struct StreakBadgeTable {
    entries: Vec<(i32, i64)>,
}

impl StreakBadgeTable {
    /// 임계값 오름차순의 (임계값, 뱃지 ID) 목록으로 생성
    pub fn new(mut entries: Vec<(i32, i64)>) -> Self {
        entries.sort_by_key(|(threshold, _)| *threshold);
        Self { entries }
    }

    /// 기본 매핑: 3일→1번, 7일→2번, 14일→3번, 30일→4번
    pub fn standard() -> Self {
        Self::new(vec![(3, 1), (7, 2), (14, 3), (30, 4)])
    }

    /// 해당 스트릭 값에 도달했을 때 지급할 뱃지 ID
    pub fn badge_for(&self, streak: i32) -> Option<i64> {
        self.entries
            .iter()
            .find(|(threshold, _)| *threshold == streak)
            .map(|(_, badge_id)| *badge_id)
    }
}

/// 다음 스트릭 값 계산
///
/// 마지막 기록일이 어제면 1 증가, 아니면 1로 초기화.
pub fn next_streak(
    last_record_date: Option<NaiveDate>,
    today: NaiveDate,
    current_streak: i32,
) -> i32 {
    match last_record_date {
        Some(last) if last == today - Duration::days(1) => current_streak + 1,
        _ => 1,
    }
}

pub struct StreakService;

impl StreakService {
    /// 일기 작성 이벤트 처리
    ///
    /// 스트릭을 갱신하고, 임계값 도달 시 새로 지급된 뱃지를 반환한다.
    /// 지급할 뱃지가 없거나 이미 지급된 경우 None.
    pub async fn record_written(
        state: &AppState,
        user_no: i64,
        today: NaiveDate,
    ) -> Result<Option<UserBadgeResponse>, AppError> {
        let user_model = user::Entity::find_by_id(user_no)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::UserNotFound("사용자를 찾을 수 없습니다.".to_string()))?;

        // 1. 스트릭 카운트 갱신 (뱃지 경로보다 먼저 저장한다)
        let new_streak = next_streak(user_model.last_record_date, today, user_model.streak_count);

        let mut active: user::ActiveModel = user_model.clone().into();
        active.streak_count = Set(new_streak);
        active.last_record_date = Set(Some(today));
        active.updated_at = Set(now_kst());
        let user_model = active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "스트릭 갱신 완료: user_no={}, streak_count={}",
            user_no, new_streak
        );

        // 2. 뱃지 지급 조건 확인
        let badge_id = match state.streak_badges.badge_for(new_streak) {
            Some(id) => id,
            None => return Ok(None), // 뱃지 조건 미충족
        };

        Self::give_badge(state, &user_model, badge_id).await
    }

    /// 뱃지 1회 지급
    ///
    /// (user_no, badge_id) 조합은 평생 1회만 지급된다. 중복 지급 시도는
    /// 에러가 아니라 None으로 처리한다. 동시 지급 경쟁은 조인 테이블의
    /// 복합 키 제약이 해소하며, 삽입 시 유니크 위반도 이미 지급으로 본다.
    async fn give_badge(
        state: &AppState,
        user_model: &user::Model,
        badge_id: i64,
    ) -> Result<Option<UserBadgeResponse>, AppError> {
        // 1. 이미 지급된 뱃지인지 확인
        let already_awarded = user_badge::Entity::find()
            .filter(user_badge::Column::UserNo.eq(user_model.user_no))
            .filter(user_badge::Column::BadgeId.eq(badge_id))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .is_some();

        if already_awarded {
            return Ok(None); // 이미 받은 뱃지
        }

        // 2. 뱃지 카탈로그 조회
        //    매핑된 ID가 카탈로그에 없으면 설정 오류다. 스트릭 갱신은 이미
        //    저장되었으므로 되돌리지 않고 에러만 보고한다.
        let badge_model = badge::Entity::find_by_id(badge_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let badge_model = match badge_model {
            Some(b) => b,
            None => {
                error!(
                    "뱃지 카탈로그 설정 오류: 매핑된 badge_id={}가 존재하지 않습니다",
                    badge_id
                );
                return Err(AppError::BadgeNotFound(format!(
                    "존재하지 않는 뱃지입니다: {}",
                    badge_id
                )));
            }
        };

        // 3. 지급 기록 삽입 (복합 키가 1회 지급을 보장)
        let awarded_at = now_kst();
        let award = user_badge::ActiveModel {
            user_no: Set(user_model.user_no),
            badge_id: Set(badge_model.badge_id),
            awarded_at: Set(awarded_at),
        };

        if let Err(e) = award.insert(&state.db).await {
            if is_unique_violation(&e) {
                // 동시 요청이 먼저 지급한 경우: 이미 받은 뱃지로 간주
                warn!(
                    "중복 뱃지 지급 시도: user_no={}, badge_id={}",
                    user_model.user_no, badge_id
                );
                return Ok(None);
            }
            return Err(AppError::InternalError(e.to_string()));
        }

        // 4. 사용자 행의 뱃지 캐시 갱신 (조인 테이블이 진실의 원천)
        let mut active: user::ActiveModel = user_model.clone().into();
        active.badges = Set(add_badge_to_cache(&user_model.badges, badge_id));
        active.updated_at = Set(now_kst());
        active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "뱃지 지급 성공: user_no={}, badge_id={}, awarded_at={}",
            user_model.user_no, badge_id, awarded_at
        );

        Ok(Some(UserBadgeResponse {
            user_no: user_model.user_no,
            badge_id,
            awarded_at,
        }))
    }
}
