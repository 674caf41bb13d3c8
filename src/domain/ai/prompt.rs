//! 회상 퀴즈 생성 프롬프트
//!
//! 질문 유형별로 GPT에 보낼 지시문을 만든다. 응답은 항상
//! question/answer/choices 필드를 가진 JSON 한 블록이어야 한다.

use crate::domain::quiz::entity::quiz::QuestionType;
use crate::domain::quiz::seed::QuestionSeed;

/// 모든 유형에 공통으로 붙는 출력 형식 지시
const OUTPUT_FORMAT: &str = r#"
반드시 아래 형식의 JSON 객체 하나만 출력하세요. 다른 설명은 붙이지 마세요.
{"question": "질문 문장", "answer": "정답", "choices": ["보기1", "보기2", "보기3"]}
choices는 정답을 포함한 3개의 보기여야 합니다."#;

/// 시드로부터 프롬프트 지시문 생성
pub fn create_prompt(seed: &QuestionSeed) -> String {
    let date = seed.date.format("%Y-%m-%d").to_string();
    let answer = seed.answer.trim();

    let body = match seed.question_id {
        QuestionType::Q2 => format!(
            "사용자가 시간을 보낸 인물에 대한 회상 퀴즈를 만들어주세요.\n\
             따뜻하고 정감 있는 말투로 질문을 구성해주세요.\n\
             날짜({})와 인물 이름({})을 반영하여 자연스럽고 중립적인 질문을 만들고,\n\
             정답과 오답 2개를 포함한 3지선다 퀴즈를 생성해주세요.\n\
             질문 문장에는 카테고리명(예: 친구, 가족, 직장 동료 등)을 포함하지 마세요.",
            date, answer
        ),
        QuestionType::Q3 => format!(
            "사용자가 작성한 문장에서 음식을 하나 추출하고,\n\
             그 내용을 정답으로 하는 유사한 맥락의 3지선다 회상 퀴즈를 생성해주세요.\n\
             따뜻하고 정감 있는 말투로 질문을 구성해주세요.\n\
             날짜({})와 문맥을 자연스럽게 반영해주세요.\n\
             응답: \"{}\"",
            date, answer
        ),
        QuestionType::Q4 => format!(
            "사용자가 작성한 문장에서 기억에 남는 활동이나 장면을 하나 요약하여 정답으로 삼고,\n\
             그것을 바탕으로 유사한 맥락의 3지선다 회상 퀴즈를 생성해주세요.\n\
             따뜻하고 정감 있는 말투로 질문을 구성해주세요.\n\
             보기(choice)는 모두 5~10자 이내의 짧은 명사구 또는 동명사 형태로 작성해 주세요.\n\
             날짜({})와 문맥을 자연스럽게 반영해주세요.\n\
             응답: \"{}\"",
            date, answer
        ),
    };

    format!("{}\n{}", body, OUTPUT_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn seed(question_id: QuestionType, answer: &str) -> QuestionSeed {
        QuestionSeed {
            question_id,
            question: "무엇을 먹었나요?".to_string(),
            answer: answer.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            record_id: 42,
        }
    }

    #[test]
    fn prompt_should_embed_date_and_answer() {
        let prompt = create_prompt(&seed(QuestionType::Q3, "김치찌개"));
        assert!(prompt.contains("2025-07-01"));
        assert!(prompt.contains("김치찌개"));
        assert!(prompt.contains("choices"));
    }

    #[test]
    fn prompt_should_trim_answer_whitespace() {
        let prompt = create_prompt(&seed(QuestionType::Q2, "  엄마  "));
        assert!(prompt.contains("(엄마)"));
    }
}
