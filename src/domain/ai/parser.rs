//! GPT 응답 파서
//!
//! 모델이 JSON 앞뒤에 잡담을 붙이는 경우가 있어 첫 번째 JSON 블록만
//! 정규식으로 추출한 뒤 역직렬화한다.

use rand::seq::SliceRandom;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::domain::ai::client::QuizDraft;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
struct RawQuiz {
    question: String,
    answer: String,
    choices: Vec<String>,
}

/// GPT 응답 본문에서 퀴즈 초안을 파싱
///
/// 보기 목록에 정답이 빠져 있으면 강제로 추가한다 (안전망).
/// 보기 순서는 매번 섞는다.
pub fn parse_quiz_draft(content: &str) -> Result<QuizDraft, AppError> {
    let json_block = extract_json_block(content).ok_or_else(|| {
        AppError::OpenAiParseFailed("응답에서 JSON 블록을 찾지 못했습니다.".to_string())
    })?;

    let raw: RawQuiz = serde_json::from_str(&json_block)
        .map_err(|e| AppError::OpenAiParseFailed(e.to_string()))?;

    if raw.question.trim().is_empty() || raw.answer.trim().is_empty() {
        return Err(AppError::OpenAiParseFailed(
            "question/answer 필드가 비어 있습니다.".to_string(),
        ));
    }

    let mut choices = raw.choices;
    if !choices.contains(&raw.answer) {
        warn!(
            answer = %raw.answer,
            "보기 목록에 정답이 포함되지 않아 강제로 추가합니다"
        );
        choices.push(raw.answer.clone());
    }

    choices.shuffle(&mut rand::thread_rng());

    Ok(QuizDraft {
        question: raw.question,
        answer: raw.answer,
        choices,
    })
}

/// 응답 텍스트에서 첫 번째 JSON 블록만 추출 (JSON 내 개행 허용)
fn extract_json_block(text: &str) -> Option<String> {
    let pattern = Regex::new(r"\{[\s\S]*?\}").ok()?;
    pattern.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_plain_json_response() {
        let content = r#"{"question": "7월 1일, 어떤 음식을 드셨나요?", "answer": "김치찌개", "choices": ["김치찌개", "불고기", "비빔밥"]}"#;
        let draft = parse_quiz_draft(content).unwrap();

        assert_eq!(draft.question, "7월 1일, 어떤 음식을 드셨나요?");
        assert_eq!(draft.answer, "김치찌개");
        assert_eq!(draft.choices.len(), 3);
        assert!(draft.choices.contains(&"김치찌개".to_string()));
    }

    #[test]
    fn should_extract_json_block_from_surrounding_prose() {
        let content = "물론이죠! 퀴즈입니다.\n{\"question\": \"q\", \"answer\": \"a\", \"choices\": [\"a\", \"b\", \"c\"]}\n즐겁게 풀어보세요.";
        let draft = parse_quiz_draft(content).unwrap();
        assert_eq!(draft.answer, "a");
    }

    #[test]
    fn should_inject_answer_when_missing_from_choices() {
        let content = r#"{"question": "q", "answer": "정답", "choices": ["오답1", "오답2"]}"#;
        let draft = parse_quiz_draft(content).unwrap();
        assert!(draft.choices.contains(&"정답".to_string()));
        assert_eq!(draft.choices.len(), 3);
    }

    #[test]
    fn should_fail_on_missing_json_block() {
        let result = parse_quiz_draft("죄송합니다, 퀴즈를 만들 수 없습니다.");
        assert!(matches!(result, Err(AppError::OpenAiParseFailed(_))));
    }

    #[test]
    fn should_fail_on_empty_answer() {
        let content = r#"{"question": "q", "answer": "  ", "choices": ["a", "b", "c"]}"#;
        let result = parse_quiz_draft(content);
        assert!(matches!(result, Err(AppError::OpenAiParseFailed(_))));
    }
}
