use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::info;

use crate::domain::ai::parser::parse_quiz_draft;
use crate::domain::ai::prompt::create_prompt;
use crate::domain::ai::retry::with_retry;
use crate::domain::quiz::seed::QuestionSeed;
use crate::utils::error::AppError;

/// OpenAI 호출 타임아웃 (초)
const OPENAI_TIMEOUT_SECS: u64 = 25;

/// 퀴즈 생성에 사용하는 모델
const QUIZ_MODEL: &str = "gpt-4o";

/// 생성기가 돌려주는 퀴즈 초안
///
/// 정답과 정답을 포함한 보기 3개를 가진다. 아직 저장 전 상태이다.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
    pub choices: Vec<String>,
}

/// 회상 퀴즈 생성기 인터페이스
///
/// OpenAI 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait QuizGeneratorTrait: Send + Sync {
    /// 시드 하나로부터 퀴즈 초안 생성
    async fn generate(&self, seed: &QuestionSeed) -> Result<QuizDraft, AppError>;
}

/// Arc로 래핑된 QuizGenerator (Clone 지원)
pub type QuizGenerator = Arc<dyn QuizGeneratorTrait>;

/// OpenAI 에러를 세분화된 AppError로 변환
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("");
            let message = &api_err.message;

            // 에러 코드가 JSON Value일 수 있으므로 문자열로 변환
            let err_code = api_err
                .code
                .as_ref()
                .map(|v| v.as_str())
                .unwrap_or("");

            if err_type == "invalid_request_error"
                && (err_code == "invalid_api_key" || message.contains("API key"))
            {
                AppError::OpenAiAuthError
            } else if err_type == "rate_limit_error"
                || err_code == "rate_limit_exceeded"
                || message.contains("rate limit")
            {
                AppError::OpenAiRateLimitError
            } else if err_type == "server_error"
                || err_code.contains("server")
                || message.contains("server")
            {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(message.clone())
            }
        }
        OpenAIError::Reqwest(req_err) => {
            if req_err.is_timeout() || req_err.is_connect() {
                AppError::OpenAiTemporaryError
            } else if req_err.status().map(|s| s.as_u16()) == Some(401) {
                AppError::OpenAiAuthError
            } else if req_err.status().map(|s| s.as_u16()) == Some(429) {
                AppError::OpenAiRateLimitError
            } else if req_err
                .status()
                .map(|s| s.is_server_error())
                .unwrap_or(false)
            {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(req_err.to_string())
            }
        }
        _ => AppError::OpenAiError(error.to_string()),
    }
}

/// OpenAI API 기반 퀴즈 생성기 구현체
#[derive(Clone)]
pub struct OpenAiQuizGenerator {
    client: Client<OpenAIConfig>,
}

impl OpenAiQuizGenerator {
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
        }
    }

    async fn complete(&self, instruction: &str) -> Result<String, AppError> {
        let message = ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(instruction)
                .build()
                .map_err(|e| AppError::InternalError(e.to_string()))?,
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(QUIZ_MODEL)
            .messages(vec![message])
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        // OpenAI 호출 타임아웃 적용 (25초)
        let response = tokio::time::timeout(
            Duration::from_secs(OPENAI_TIMEOUT_SECS),
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| AppError::OpenAiTemporaryError)? // 타임아웃
        .map_err(classify_openai_error)?; // OpenAI 에러

        Ok(response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl QuizGeneratorTrait for OpenAiQuizGenerator {
    async fn generate(&self, seed: &QuestionSeed) -> Result<QuizDraft, AppError> {
        let instruction = create_prompt(seed);
        info!(
            record_id = seed.record_id,
            question_id = ?seed.question_id,
            "GPT 퀴즈 생성 시도"
        );

        let content = with_retry(|| self.complete(&instruction)).await?;

        let draft = parse_quiz_draft(&content)?;
        info!(
            question = %draft.question,
            "GPT 퀴즈 생성 완료"
        );

        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_openai_quiz_generator() {
        let generator = OpenAiQuizGenerator::new("test-api-key");
        assert!(std::mem::size_of_val(&generator) > 0);
    }
}
