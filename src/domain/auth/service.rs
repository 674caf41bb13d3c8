use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::{info, warn};

use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::encode_access_token;
use crate::utils::time::now_kst;

use super::dto::{KakaoLoginRequest, LoginRequest, LoginResponse, UserInfo};

pub struct AuthService;

impl AuthService {
    /// 일반 로그인 (닉네임 + 비밀번호)
    ///
    /// 닉네임 없음과 비밀번호 불일치는 같은 메시지로 응답한다.
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
        info!("일반 로그인 시도: nickname={}", req.nickname);

        // 1. 닉네임으로 사용자 찾기
        let user_model = user::Entity::find()
            .filter(user::Column::Nickname.eq(req.nickname.clone()))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let user_model = match user_model {
            Some(u) => u,
            None => {
                warn!("존재하지 않는 닉네임: {}", req.nickname);
                return Err(AppError::Unauthorized(
                    "닉네임 또는 비밀번호가 올바르지 않습니다".to_string(),
                ));
            }
        };

        // 2. 카카오 사용자인지 확인
        if user_model.is_kakao_user() {
            warn!("카카오 사용자가 일반 로그인 시도: nickname={}", req.nickname);
            return Err(AppError::Unauthorized(
                "카카오 로그인을 이용해주세요".to_string(),
            ));
        }

        // 3. 비밀번호 확인
        let password_ok = user_model
            .password
            .as_deref()
            .map(|p| p == req.password)
            .unwrap_or(false);

        if !password_ok {
            warn!("비밀번호 불일치: nickname={}", req.nickname);
            return Err(AppError::Unauthorized(
                "닉네임 또는 비밀번호가 올바르지 않습니다".to_string(),
            ));
        }

        // 4. JWT 토큰 생성
        let response = Self::issue_login_response(state, &user_model)?;

        info!(
            "일반 로그인 성공: user_no={}, nickname={}",
            user_model.user_no, user_model.nickname
        );
        Ok(response)
    }

    /// 카카오 로그인 (자동 회원가입 포함)
    pub async fn kakao_login(
        state: &AppState,
        req: KakaoLoginRequest,
    ) -> Result<LoginResponse, AppError> {
        info!(
            "카카오 로그인 시도: kakao_id={}, nickname={}",
            req.kakao_id, req.nickname
        );

        // 1. 카카오 ID로 기존 사용자 찾기
        let existing = user::Entity::find()
            .filter(user::Column::KakaoId.eq(req.kakao_id.clone()))
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if let Some(user_model) = existing {
            // === 기존 사용자 로그인 ===
            // 프로필 이미지 업데이트 (카카오에서 변경될 수 있음)
            let user_model = if req.profile_image.is_some()
                && req.profile_image != user_model.profile_image
            {
                let mut active: user::ActiveModel = user_model.into();
                active.profile_image = Set(req.profile_image.clone());
                active.updated_at = Set(now_kst());
                let updated = active
                    .update(&state.db)
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;
                info!("프로필 이미지 업데이트: user_no={}", updated.user_no);
                updated
            } else {
                user_model
            };

            let response = Self::issue_login_response(state, &user_model)?;
            info!(
                "기존 카카오 사용자 로그인 성공: user_no={}, nickname={}",
                user_model.user_no, user_model.nickname
            );
            return Ok(response);
        }

        // === 신규 사용자 자동 회원가입 ===
        info!(
            "신규 카카오 사용자 - 자동 회원가입 진행: kakao_id={}",
            req.kakao_id
        );

        // 2. 닉네임 중복 처리
        let final_nickname = Self::generate_unique_nickname(state, &req.nickname).await?;

        // 3. 새 사용자 생성
        let now = now_kst();
        let new_user = user::ActiveModel {
            kakao_id: Set(Some(req.kakao_id)),
            nickname: Set(final_nickname),
            profile_image: Set(req.profile_image),
            password: Set(None), // 카카오 사용자는 비밀번호 없음
            gender: Set(None),
            birth_date: Set(None),
            streak_count: Set(0),
            last_record_date: Set(None),
            badges: Set("[]".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = new_user
            .insert(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let response = Self::issue_login_response(state, &saved)?;
        info!(
            "카카오 자동 회원가입 및 로그인 성공: user_no={}, nickname={}",
            saved.user_no, saved.nickname
        );
        Ok(response)
    }

    /// 현재 사용자 정보 조회
    pub async fn get_current_user(state: &AppState, user_no: i64) -> Result<UserInfo, AppError> {
        let user_model = user::Entity::find_by_id(user_no)
            .one(&state.db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::UserNotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let is_kakao_user = user_model.is_kakao_user();
        Ok(UserInfo {
            user_no: user_model.user_no,
            nickname: user_model.nickname,
            profile_image: user_model.profile_image,
            gender: user_model.gender,
            birth_date: user_model.birth_date,
            streak_count: user_model.streak_count,
            is_kakao_user,
            created_at: user_model.created_at,
        })
    }

    /// 닉네임 중복 시 유니크한 닉네임 생성 (숫자 접미사)
    async fn generate_unique_nickname(
        state: &AppState,
        base_nickname: &str,
    ) -> Result<String, AppError> {
        let mut nickname = base_nickname.to_string();
        let mut suffix = 1;

        loop {
            let taken = user::Entity::find()
                .filter(user::Column::Nickname.eq(nickname.clone()))
                .one(&state.db)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?
                .is_some();

            if !taken {
                break;
            }

            nickname = format!("{}{}", base_nickname, suffix);
            suffix += 1;
        }

        if nickname != base_nickname {
            info!("유니크 닉네임 생성: {} -> {}", base_nickname, nickname);
        }
        Ok(nickname)
    }

    /// 토큰 발급 및 로그인 응답 구성
    fn issue_login_response(
        state: &AppState,
        user_model: &user::Model,
    ) -> Result<LoginResponse, AppError> {
        let access_token = encode_access_token(
            user_model.user_no,
            &user_model.nickname,
            user_model.is_kakao_user(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        Ok(LoginResponse {
            user_no: user_model.user_no,
            nickname: user_model.nickname.clone(),
            is_kakao_user: user_model.is_kakao_user(),
            access_token,
            expires_in: state.config.jwt_expiration,
        })
    }
}
