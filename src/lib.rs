pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Bearer 토큰 보안 스키마 등록
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::auth::handler::login,
        domain::auth::handler::kakao_login,
        domain::auth::handler::logout,
        domain::auth::handler::get_current_user,
        domain::user::handler::create_user,
        domain::user::handler::get_all_users,
        domain::user::handler::get_user_by_id,
        domain::user::handler::get_user_by_nickname,
        domain::user::handler::update_user,
        domain::user::handler::delete_user,
        domain::user::handler::get_streak_count,
        domain::record::handler::create_today_record,
        domain::record::handler::get_today_record_status,
        domain::record::handler::get_record_by_date,
        domain::record::handler::get_all_records_by_user,
        domain::record::handler::get_monthly_emotions,
        domain::record::handler::update_record,
        domain::record::handler::delete_record,
        domain::badge::handler::get_all_badges,
        domain::badge::handler::get_badge,
        domain::badge::handler::create_badge,
        domain::badge::handler::update_badge,
        domain::badge::handler::delete_badge,
        domain::badge::handler::assign_badge_to_user,
        domain::quiz::handler::generate_quiz,
        domain::quiz::handler::get_today_quizzes,
        domain::quiz::handler::submit_quiz,
        domain::quiz::handler::get_today_skip_status,
        domain::quiz::handler::get_today_wrong_quizzes,
        domain::quiz::handler::get_next_retry_quiz,
        domain::quiz::handler::get_today_quiz_result_summary,
        domain::quiz::handler::delete_quiz,
        domain::quiz::handler::delete_today_quizzes,
    ),
    components(
        schemas(
            domain::health::handler::HealthResponse,
            domain::auth::dto::LoginRequest,
            domain::auth::dto::KakaoLoginRequest,
            domain::auth::dto::LoginResponse,
            domain::auth::dto::UserInfo,
            domain::user::dto::UserCreateRequest,
            domain::user::dto::UserUpdateRequest,
            domain::user::dto::UserResponse,
            domain::user::dto::StreakCountResponse,
            domain::user::entity::user::Gender,
            domain::record::dto::RecordCreateRequest,
            domain::record::dto::RecordResponse,
            domain::record::dto::RecordCreateResponse,
            domain::record::dto::TodayRecordStatus,
            domain::record::dto::MonthlyEmotionResponse,
            domain::badge::dto::BadgeRequest,
            domain::badge::dto::BadgeResponse,
            domain::badge::dto::UserBadgeRequest,
            domain::badge::dto::UserBadgeResponse,
            domain::quiz::dto::QuizResponse,
            domain::quiz::dto::QuizDraftResponse,
            domain::quiz::dto::QuizSubmitRequest,
            domain::quiz::dto::SkipStatusResponse,
            domain::quiz::dto::QuizResultSummary,
            domain::quiz::dto::SuccessQuizListResponse,
            domain::quiz::dto::SuccessQuizResultResponse,
            domain::quiz::seed::QuestionSeed,
            domain::quiz::entity::quiz::QuestionType,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "로그인/로그아웃 API"),
        (name = "User", description = "사용자 관리 API"),
        (name = "Record", description = "일기 작성, 조회, 수정, 삭제 API"),
        (name = "Badge", description = "뱃지 카탈로그 및 지급 API"),
        (name = "Quiz", description = "일기 기반 회상 퀴즈 API"),
        (name = "Health", description = "서버 상태 API")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::handler::health_check))
        // 인증
        .route("/api/auth/login", post(domain::auth::handler::login))
        .route(
            "/api/auth/kakao-login",
            post(domain::auth::handler::kakao_login),
        )
        .route("/api/auth/logout", post(domain::auth::handler::logout))
        .route("/api/auth/me", get(domain::auth::handler::get_current_user))
        // 사용자
        .route(
            "/api/users",
            post(domain::user::handler::create_user).get(domain::user::handler::get_all_users),
        )
        .route(
            "/api/users/:user_no",
            get(domain::user::handler::get_user_by_id)
                .put(domain::user::handler::update_user)
                .delete(domain::user::handler::delete_user),
        )
        .route(
            "/api/users/nickname/:nickname",
            get(domain::user::handler::get_user_by_nickname),
        )
        .route(
            "/api/users/:user_no/streak",
            get(domain::user::handler::get_streak_count),
        )
        // 일기 기록
        .route(
            "/api/records",
            post(domain::record::handler::create_today_record),
        )
        .route(
            "/api/records/today",
            get(domain::record::handler::get_today_record_status),
        )
        .route(
            "/api/records/date/:date",
            get(domain::record::handler::get_record_by_date),
        )
        .route(
            "/api/records/user/:user_no/all",
            get(domain::record::handler::get_all_records_by_user),
        )
        .route(
            "/api/records/emotions/:user_no",
            get(domain::record::handler::get_monthly_emotions),
        )
        .route(
            "/api/records/:record_id",
            put(domain::record::handler::update_record)
                .delete(domain::record::handler::delete_record),
        )
        // 뱃지
        .route(
            "/api/badges",
            get(domain::badge::handler::get_all_badges)
                .post(domain::badge::handler::create_badge),
        )
        .route(
            "/api/badges/:badge_id",
            get(domain::badge::handler::get_badge)
                .put(domain::badge::handler::update_badge)
                .delete(domain::badge::handler::delete_badge),
        )
        .route(
            "/api/user-badges",
            post(domain::badge::handler::assign_badge_to_user),
        )
        // 회상 퀴즈
        .route(
            "/api/quizzes/generate",
            post(domain::quiz::handler::generate_quiz),
        )
        .route(
            "/api/quizzes/today",
            get(domain::quiz::handler::get_today_quizzes)
                .delete(domain::quiz::handler::delete_today_quizzes),
        )
        .route("/api/quizzes/submit", post(domain::quiz::handler::submit_quiz))
        .route(
            "/api/quizzes/today/skip-status",
            get(domain::quiz::handler::get_today_skip_status),
        )
        .route(
            "/api/quizzes/today/wrong",
            get(domain::quiz::handler::get_today_wrong_quizzes),
        )
        .route(
            "/api/quizzes/today/retry-next",
            get(domain::quiz::handler::get_next_retry_quiz),
        )
        .route(
            "/api/quizzes/today/result",
            get(domain::quiz::handler::get_today_quiz_result_summary),
        )
        .route(
            "/api/quizzes/:quiz_id",
            delete(domain::quiz::handler::delete_quiz),
        )
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
