use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    ValidationError(String),
    JsonParseFailed(String),
    Unauthorized(String),

    // 사용자
    UserNotFound(String),
    NicknameDuplicate(String),
    KakaoIdDuplicate(String),

    // 일기 기록
    RecordNotFound(String),
    RecordAlreadyExists(String),

    // 뱃지
    BadgeNotFound(String),
    BadgeNameDuplicate(String),
    BadgeAlreadyAwarded(String),

    // 퀴즈
    QuizNotFound(String),
    QuizAccessDenied(String),
    QuizAlreadySubmitted(String),
    QuizSkipLimitExceeded(String),

    // OpenAI
    OpenAiAuthError,
    OpenAiRateLimitError,
    OpenAiTemporaryError,
    OpenAiParseFailed(String),
    OpenAiError(String),

    InternalError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::UserNotFound(msg) => msg.clone(),
            AppError::NicknameDuplicate(msg) => msg.clone(),
            AppError::KakaoIdDuplicate(msg) => msg.clone(),
            AppError::RecordNotFound(msg) => msg.clone(),
            AppError::RecordAlreadyExists(msg) => msg.clone(),
            AppError::BadgeNotFound(msg) => msg.clone(),
            AppError::BadgeNameDuplicate(msg) => msg.clone(),
            AppError::BadgeAlreadyAwarded(msg) => msg.clone(),
            AppError::QuizNotFound(msg) => msg.clone(),
            AppError::QuizAccessDenied(msg) => msg.clone(),
            AppError::QuizAlreadySubmitted(msg) => msg.clone(),
            AppError::QuizSkipLimitExceeded(msg) => msg.clone(),
            AppError::OpenAiAuthError => "AI 서비스 인증에 실패했습니다.".to_string(),
            AppError::OpenAiRateLimitError => {
                "AI 서비스 요청 한도를 초과했습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
            AppError::OpenAiTemporaryError => {
                "AI 서비스가 일시적으로 응답하지 않습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
            AppError::OpenAiParseFailed(msg) => {
                format!("AI 응답을 해석하지 못했습니다: {}", msg)
            }
            AppError::OpenAiError(msg) => format!("AI 서비스 호출에 실패했습니다: {}", msg),
            AppError::InternalError(msg) => msg.clone(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::UserNotFound(_) => "USER4041",
            AppError::NicknameDuplicate(_) => "USER4091",
            AppError::KakaoIdDuplicate(_) => "USER4092",
            AppError::RecordNotFound(_) => "RECORD4041",
            AppError::RecordAlreadyExists(_) => "RECORD4091",
            AppError::BadgeNotFound(_) => "BADGE4041",
            AppError::BadgeNameDuplicate(_) => "BADGE4091",
            AppError::BadgeAlreadyAwarded(_) => "BADGE4092",
            AppError::QuizNotFound(_) => "QUIZ4041",
            AppError::QuizAccessDenied(_) => "QUIZ4031",
            AppError::QuizAlreadySubmitted(_) => "QUIZ4091",
            AppError::QuizSkipLimitExceeded(_) => "QUIZ4291",
            AppError::OpenAiAuthError => "AI5001",
            AppError::OpenAiRateLimitError => "AI4291",
            AppError::OpenAiTemporaryError => "AI5031",
            AppError::OpenAiParseFailed(_) => "AI5002",
            AppError::OpenAiError(_) => "AI5000",
            AppError::InternalError(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NicknameDuplicate(_) => StatusCode::CONFLICT,
            AppError::KakaoIdDuplicate(_) => StatusCode::CONFLICT,
            AppError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            AppError::RecordAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::BadgeNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadgeNameDuplicate(_) => StatusCode::CONFLICT,
            AppError::BadgeAlreadyAwarded(_) => StatusCode::CONFLICT,
            AppError::QuizNotFound(_) => StatusCode::NOT_FOUND,
            AppError::QuizAccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::QuizAlreadySubmitted(_) => StatusCode::CONFLICT,
            AppError::QuizSkipLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::OpenAiAuthError => StatusCode::BAD_GATEWAY,
            AppError::OpenAiRateLimitError => StatusCode::TOO_MANY_REQUESTS,
            AppError::OpenAiTemporaryError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::OpenAiParseFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::OpenAiError(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        match &self {
            AppError::InternalError(_) => {
                error!("Internal Server Error: {}", message);
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

/// validator 검증 실패를 AppError로 변환
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect::<Vec<_>>()
            .join(", ");

        if message.is_empty() {
            AppError::ValidationError("요청 값이 올바르지 않습니다.".to_string())
        } else {
            AppError::ValidationError(message)
        }
    }
}

/// DB 유니크 제약 위반 여부 판단
///
/// 엔진은 뱃지 중복 지급 등 일부 충돌을 멱등 처리해야 하므로
/// 드라이버별 에러 문자열로 유니크 위반을 구분한다.
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("duplicate") || msg.contains("unique")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_limit_error_should_map_to_429() {
        let err = AppError::QuizSkipLimitExceeded("quota".to_string());
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.error_code(), "QUIZ4291");
    }

    #[test]
    fn record_conflict_should_map_to_409() {
        let err = AppError::RecordAlreadyExists("dup".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "RECORD4091");
    }

    #[test]
    fn unique_violation_should_match_mysql_duplicate_entry() {
        let err = sea_orm::DbErr::Custom(
            "Duplicate entry '1-1' for key 'user_badges.PRIMARY'".to_string(),
        );
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn unique_violation_should_not_match_other_errors() {
        let err = sea_orm::DbErr::Custom("connection reset by peer".to_string());
        assert!(!is_unique_violation(&err));
    }
}
