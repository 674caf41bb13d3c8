use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use tracing::{info, warn};

use crate::domain::badge::entity::{badge, user_badge};
use crate::domain::user::entity::user::{self, add_badge_to_cache};
use crate::state::AppState;
use crate::utils::error::{is_unique_violation, AppError};
use crate::utils::time::now_kst;

use super::dto::{BadgeRequest, BadgeResponse, UserBadgeRequest, UserBadgeResponse};

/// 뱃지 카탈로그 관리 서비스 (관리자 CRUD)
///
/// 카탈로그는 엔진이 아니라 관리자 경로에서만 변경된다.
pub struct BadgeService;

impl BadgeService {
    /// 모든 뱃지 목록 조회
    pub async fn get_all_badges(state: &AppState) -> Result<Vec<BadgeResponse>, AppError> {
        let badges = badge::Entity::find()
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(badges.into_iter().map(BadgeResponse::from).collect())
    }

    /// 특정 뱃지 조회
    pub async fn get_badge(state: &AppState, badge_id: i64) -> Result<BadgeResponse, AppError> {
        let badge_model = badge::Entity::find_by_id(badge_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                warn!("뱃지 조회 실패: 존재하지 않는 badge_id={}", badge_id);
                AppError::BadgeNotFound(format!("존재하지 않는 뱃지입니다: {}", badge_id))
            })?;

        Ok(BadgeResponse::from(badge_model))
    }

    /// 뱃지 등록
    pub async fn create_badge(
        state: &AppState,
        req: BadgeRequest,
    ) -> Result<BadgeResponse, AppError> {
        info!("뱃지 등록 요청: name={}", req.name);

        // 이미 존재하는 이름이면 등록 실패
        let duplicated = badge::Entity::find()
            .filter(badge::Column::Name.eq(req.name.clone()))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .is_some();

        if duplicated {
            return Err(AppError::BadgeNameDuplicate(format!(
                "이미 존재하는 뱃지 이름입니다: {}",
                req.name
            )));
        }

        let model = badge::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            condition_json: Set(req.condition_json),
            ..Default::default()
        };

        let saved = model
            .insert(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("뱃지 등록 완료: badge_id={}", saved.badge_id);
        Ok(BadgeResponse::from(saved))
    }

    /// 뱃지 수정
    pub async fn update_badge(
        state: &AppState,
        badge_id: i64,
        req: BadgeRequest,
    ) -> Result<BadgeResponse, AppError> {
        info!("뱃지 수정 요청: badge_id={}, name={}", badge_id, req.name);

        let badge_model = badge::Entity::find_by_id(badge_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::BadgeNotFound(format!("존재하지 않는 뱃지입니다: {}", badge_id))
            })?;

        // 이름이 변경된 경우 중복 여부 체크
        if badge_model.name != req.name {
            let duplicated = badge::Entity::find()
                .filter(badge::Column::Name.eq(req.name.clone()))
                .one(&state.db)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?
                .is_some();

            if duplicated {
                return Err(AppError::BadgeNameDuplicate(format!(
                    "이미 존재하는 뱃지 이름입니다: {}",
                    req.name
                )));
            }
        }

        let mut active: badge::ActiveModel = badge_model.into();
        active.name = Set(req.name);
        active.description = Set(req.description);
        active.condition_json = Set(req.condition_json);

        let updated = active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("뱃지 수정 완료: badge_id={}", updated.badge_id);
        Ok(BadgeResponse::from(updated))
    }

    /// 뱃지 삭제
    pub async fn delete_badge(state: &AppState, badge_id: i64) -> Result<(), AppError> {
        info!("뱃지 삭제 요청: badge_id={}", badge_id);

        let badge_model = badge::Entity::find_by_id(badge_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::BadgeNotFound(format!("존재하지 않는 뱃지입니다: {}", badge_id))
            })?;

        badge_model
            .delete(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("뱃지 삭제 완료: badge_id={}", badge_id);
        Ok(())
    }
}

/// 뱃지 수동 지급 서비스 (관리자용)
pub struct UserBadgeService;

impl UserBadgeService {
    /// 사용자에게 뱃지 수동 지급
    ///
    /// 엔진의 자동 지급과 달리 중복 지급 시도는 명시적 충돌 에러다.
    pub async fn assign_badge_to_user(
        state: &AppState,
        req: UserBadgeRequest,
    ) -> Result<UserBadgeResponse, AppError> {
        info!(
            "뱃지 수동 지급 요청: user_no={}, badge_id={}",
            req.user_no, req.badge_id
        );

        let user_model = user::Entity::find_by_id(req.user_no)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::UserNotFound("사용자를 찾을 수 없습니다.".to_string()))?;

        let badge_model = badge::Entity::find_by_id(req.badge_id)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::BadgeNotFound(format!("존재하지 않는 뱃지입니다: {}", req.badge_id))
            })?;

        // 중복 체크
        let already_awarded = user_badge::Entity::find()
            .filter(user_badge::Column::UserNo.eq(req.user_no))
            .filter(user_badge::Column::BadgeId.eq(req.badge_id))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .is_some();

        if already_awarded {
            return Err(AppError::BadgeAlreadyAwarded(
                "이미 부여된 뱃지입니다.".to_string(),
            ));
        }

        let awarded_at = now_kst();
        let award = user_badge::ActiveModel {
            user_no: Set(user_model.user_no),
            badge_id: Set(badge_model.badge_id),
            awarded_at: Set(awarded_at),
        };

        if let Err(e) = award.insert(&state.db).await {
            if is_unique_violation(&e) {
                return Err(AppError::BadgeAlreadyAwarded(
                    "이미 부여된 뱃지입니다.".to_string(),
                ));
            }
            return Err(AppError::InternalError(e.to_string()));
        }

        // 사용자 행의 뱃지 캐시 갱신
        let mut active: user::ActiveModel = user_model.clone().into();
        active.badges = Set(add_badge_to_cache(&user_model.badges, req.badge_id));
        active.updated_at = Set(now_kst());
        active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "뱃지 수동 지급 성공: user_no={}, badge_id={}, awarded_at={}",
            req.user_no, req.badge_id, awarded_at
        );

        Ok(UserBadgeResponse {
            user_no: req.user_no,
            badge_id: req.badge_id,
            awarded_at,
        })
    }
}
