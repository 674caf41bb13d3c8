use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use tracing::info;

use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::time::now_kst;

use super::dto::{StreakCountResponse, UserCreateRequest, UserResponse, UserUpdateRequest};

pub struct UserService;

impl UserService {
    /// 사용자 생성 (회원가입)
    pub async fn create_user(
        state: &AppState,
        req: UserCreateRequest,
    ) -> Result<UserResponse, AppError> {
        info!("사용자 생성 시작: nickname={}", req.nickname);

        // 회원가입 유형 검증 (일반/카카오 중 정확히 하나)
        if !req.is_general_signup() && !req.is_kakao_signup() {
            return Err(AppError::ValidationError(
                "일반 회원가입 또는 카카오 회원가입 정보가 필요합니다".to_string(),
            ));
        }
        if req.is_general_signup() && req.is_kakao_signup() {
            return Err(AppError::ValidationError(
                "일반 회원가입과 카카오 회원가입은 동시에 사용할 수 없습니다".to_string(),
            ));
        }

        // 닉네임 중복 확인
        let nickname_taken = user::Entity::find()
            .filter(user::Column::Nickname.eq(req.nickname.clone()))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .is_some();

        if nickname_taken {
            return Err(AppError::NicknameDuplicate(format!(
                "이미 사용 중인 닉네임입니다: {}",
                req.nickname
            )));
        }

        // 카카오 ID 중복 확인 (카카오 회원가입인 경우)
        if let Some(kakao_id) = req.kakao_id.as_ref().filter(|k| !k.trim().is_empty()) {
            let kakao_taken = user::Entity::find()
                .filter(user::Column::KakaoId.eq(kakao_id.clone()))
                .one(&state.db)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?
                .is_some();

            if kakao_taken {
                return Err(AppError::KakaoIdDuplicate(
                    "이미 가입된 카카오 계정입니다".to_string(),
                ));
            }
        }

        let now = now_kst();
        let model = user::ActiveModel {
            nickname: Set(req.nickname),
            password: Set(req.password.filter(|p| !p.trim().is_empty())),
            kakao_id: Set(req.kakao_id.filter(|k| !k.trim().is_empty())),
            profile_image: Set(req.profile_image),
            gender: Set(req.gender),
            birth_date: Set(req.birth_date),
            streak_count: Set(0),
            last_record_date: Set(None),
            badges: Set("[]".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model
            .insert(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            "사용자 생성 완료: user_no={}, nickname={}",
            saved.user_no, saved.nickname
        );
        Ok(UserResponse::from(saved))
    }

    /// 사용자 조회 (ID)
    pub async fn get_user_by_id(state: &AppState, user_no: i64) -> Result<UserResponse, AppError> {
        let user_model = Self::find_user(state, user_no).await?;
        Ok(UserResponse::from(user_model))
    }

    /// 사용자 조회 (닉네임)
    pub async fn get_user_by_nickname(
        state: &AppState,
        nickname: &str,
    ) -> Result<UserResponse, AppError> {
        let user_model = user::Entity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::UserNotFound(format!("사용자를 찾을 수 없습니다: {}", nickname))
            })?;

        Ok(UserResponse::from(user_model))
    }

    /// 모든 사용자 조회
    pub async fn get_all_users(state: &AppState) -> Result<Vec<UserResponse>, AppError> {
        let users = user::Entity::find()
            .all(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 사용자 정보 수정
    ///
    /// 수정 가능한 필드만 갱신한다. 비밀번호는 일반 사용자만 변경할 수 있다.
    pub async fn update_user(
        state: &AppState,
        user_no: i64,
        req: UserUpdateRequest,
    ) -> Result<UserResponse, AppError> {
        info!("사용자 수정 시작: user_no={}", user_no);

        let user_model = Self::find_user(state, user_no).await?;
        let is_kakao_user = user_model.is_kakao_user();

        let mut active: user::ActiveModel = user_model.into();

        if let Some(profile_image) = req.profile_image.filter(|p| !p.trim().is_empty()) {
            active.profile_image = Set(Some(profile_image));
        }
        if let Some(gender) = req.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(birth_date) = req.birth_date {
            active.birth_date = Set(Some(birth_date));
        }
        // 일반 사용자만 비밀번호 변경 가능
        if let Some(password) = req.password.filter(|p| !p.trim().is_empty()) {
            if !is_kakao_user {
                active.password = Set(Some(password));
            }
        }
        active.updated_at = Set(now_kst());

        let updated = active
            .update(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("사용자 수정 완료: user_no={}", updated.user_no);
        Ok(UserResponse::from(updated))
    }

    /// 사용자 삭제
    pub async fn delete_user(state: &AppState, user_no: i64) -> Result<(), AppError> {
        info!("사용자 삭제 시작: user_no={}", user_no);

        let user_model = Self::find_user(state, user_no).await?;

        user_model
            .delete(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!("사용자 삭제 완료: user_no={}", user_no);
        Ok(())
    }

    /// 스트릭 카운트 조회
    pub async fn get_streak_count(
        state: &AppState,
        user_no: i64,
    ) -> Result<StreakCountResponse, AppError> {
        let user_model = Self::find_user(state, user_no).await?;

        Ok(StreakCountResponse {
            user_no: user_model.user_no,
            streak_count: user_model.streak_count,
        })
    }

    async fn find_user(state: &AppState, user_no: i64) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(user_no)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::UserNotFound(format!("사용자를 찾을 수 없습니다: {}", user_no))
            })
    }
}
