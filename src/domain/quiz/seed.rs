//! 회상 퀴즈 시드 추출
//!
//! 최근 기록(오늘 제외 3일)에서 Q2~Q4 답변을 시드로 뽑는다.
//! 추출 순서는 명시적으로 고정한다: 날짜 오름차순, 같은 날짜 안에서는 Q2 < Q3 < Q4.
//! 어느 시드가 먼저 생성 대상이 되는지가 이 순서로 결정된다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::quiz::entity::quiz::QuestionType;
use crate::domain::record::entity::record;

/// 퀴즈 생성 요청에 쓰이는 시드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSeed {
    /// 질문 유형 (Q2~Q4)
    pub question_id: QuestionType,
    /// 고정 질문 문장
    pub question: String,
    /// 사용자 답변 원문
    pub answer: String,
    /// 기록 날짜
    pub date: NaiveDate,
    /// 출처 기록 ID
    pub record_id: i64,
}

/// 기록 목록에서 시드 추출
///
/// 답변이 비어 있는 질문은 건너뛴다.
pub fn extract_seeds(records: &[record::Model]) -> Vec<QuestionSeed> {
    let mut sorted: Vec<&record::Model> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut seeds = Vec::new();
    for rec in sorted {
        let answers = rec.answers_map();
        for question_id in [QuestionType::Q2, QuestionType::Q3, QuestionType::Q4] {
            let answer = match answers.get(question_id.answer_key()) {
                Some(a) if !a.trim().is_empty() => a.clone(),
                _ => continue,
            };

            seeds.push(QuestionSeed {
                question: question_id.question_text().to_string(),
                question_id,
                answer,
                date: rec.date,
                record_id: rec.record_id,
            });
        }
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(record_id: i64, date: (i32, u32, u32), answers: &str) -> record::Model {
        record::Model {
            record_id,
            user_no: 1,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            answers: answers.to_string(),
            person_category: None,
            person_name: None,
            emotion: "happy".to_string(),
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn seeds_should_be_ordered_by_date_then_question() {
        let records = vec![
            record(2, (2025, 7, 2), r#"{"Q2":"친구","Q4":"산책"}"#),
            record(1, (2025, 7, 1), r#"{"Q3":"김치찌개"}"#),
        ];

        let seeds = extract_seeds(&records);

        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].record_id, 1);
        assert_eq!(seeds[0].question_id, QuestionType::Q3);
        assert_eq!(seeds[1].record_id, 2);
        assert_eq!(seeds[1].question_id, QuestionType::Q2);
        assert_eq!(seeds[2].record_id, 2);
        assert_eq!(seeds[2].question_id, QuestionType::Q4);
    }

    #[test]
    fn blank_answers_should_not_produce_seeds() {
        let records = vec![record(
            1,
            (2025, 7, 1),
            r#"{"Q2":"  ","Q3":"김밥","Q4":""}"#,
        )];

        let seeds = extract_seeds(&records);

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].question_id, QuestionType::Q3);
        assert_eq!(seeds[0].answer, "김밥");
    }

    #[test]
    fn q1_answers_should_never_become_seeds() {
        let records = vec![record(1, (2025, 7, 1), r#"{"Q1":"네, 먹었어요"}"#)];
        assert!(extract_seeds(&records).is_empty());
    }

    #[test]
    fn seed_should_carry_fixed_question_sentence() {
        let records = vec![record(7, (2025, 7, 1), r#"{"Q2":"엄마"}"#)];
        let seeds = extract_seeds(&records);
        assert_eq!(seeds[0].question, "누구와 시간을 보냈나요?");
    }
}
