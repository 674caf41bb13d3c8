//! 퀴즈 생애주기 엔진 규칙 테스트
//!
//! 시드 추출 순서, 생성 대상 선정(중복 제거/상한), 정답 판정,
//! 결과 요약, 생성기 스텁 동작을 검증합니다.

use std::collections::HashSet;

use chrono::NaiveDate;

use thinkeep_server::domain::ai::client::{QuizDraft, QuizGeneratorTrait};
use thinkeep_server::domain::quiz::dto::QuizResultSummary;
use thinkeep_server::domain::quiz::entity::quiz::QuestionType;
use thinkeep_server::domain::quiz::seed::{extract_seeds, QuestionSeed};
use thinkeep_server::domain::quiz::service::{answers_match, plan_generation};
use thinkeep_server::domain::record::entity::record;
use thinkeep_server::utils::error::AppError;

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

/// 시드가 날짜순 → 질문순으로 나오고, 선정은 그 순서로 최대 2개까지만 이루어진다
#[test]
fn generation_should_pick_first_two_eligible_seeds_in_documented_order() {
    let records = vec![
        record(3, (2025, 7, 3), r#"{"Q2":"동생","Q3":"냉면"}"#),
        record(1, (2025, 7, 1), r#"{"Q2":"엄마","Q3":"김치찌개","Q4":"산책"}"#),
        record(2, (2025, 7, 2), r#"{"Q4":"영화 감상"}"#),
    ];

    let seeds = extract_seeds(&records);
    let planned = plan_generation(seeds, &HashSet::new(), 2);

    assert_eq!(planned.len(), 2);
    assert_eq!(
        (planned[0].record_id, planned[0].question_id.clone()),
        (1, QuestionType::Q2)
    );
    assert_eq!(
        (planned[1].record_id, planned[1].question_id.clone()),
        (1, QuestionType::Q3)
    );
}

/// 이미 생성된 (기록, 질문 유형) 조합은 반복 호출에서도 다시 선정되지 않는다
#[test]
fn repeated_generation_should_never_duplicate_a_triple() {
    let records = vec![record(
        1,
        (2025, 7, 1),
        r#"{"Q2":"엄마","Q3":"김치찌개","Q4":"산책"}"#,
    )];

    // 1차 호출: Q2, Q3 생성
    let first = plan_generation(extract_seeds(&records), &HashSet::new(), 2);
    assert_eq!(first.len(), 2);

    let mut existing: HashSet<(i64, QuestionType)> = HashSet::new();
    for seed in &first {
        existing.insert((seed.record_id, seed.question_id.clone()));
    }

    // 2차 호출: 남은 Q4만 생성
    let second = plan_generation(extract_seeds(&records), &existing, 2);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].question_id, QuestionType::Q4);

    for seed in &second {
        existing.insert((seed.record_id, seed.question_id.clone()));
    }

    // 3차 호출: 더 이상 생성할 시드가 없다
    let third = plan_generation(extract_seeds(&records), &existing, 2);
    assert!(third.is_empty());
}

#[test]
fn answers_should_match_case_and_whitespace_insensitively() {
    assert!(answers_match("seoul", "Seoul "));
    assert!(answers_match("Kimchi Stew", " kimchi stew"));
    assert!(!answers_match("seoul", "incheon"));
}

#[test]
fn result_summary_should_only_be_all_correct_with_at_least_one_solved() {
    assert!(!QuizResultSummary::new(0, 0).all_correct);
    assert!(!QuizResultSummary::new(3, 2).all_correct);

    let perfect = QuizResultSummary::new(2, 2);
    assert!(perfect.all_correct);
    assert_eq!(perfect.total_solved, 2);
    assert_eq!(perfect.correct_count, 2);
}

/// 스킵 쿼터 계산: 남은 횟수는 0 밑으로 내려가지 않는다
#[test]
fn remaining_skips_should_never_go_negative() {
    for (skipped, expected_remaining) in [(0, 2), (1, 1), (2, 0), (3, 0)] {
        let remaining = (2 - skipped as i32).max(0);
        assert_eq!(remaining, expected_remaining);
    }
}

/// 생성기 스텁: 시드를 그대로 반영한 초안이 반환된다
struct StubGenerator;

#[async_trait::async_trait]
impl QuizGeneratorTrait for StubGenerator {
    async fn generate(&self, seed: &QuestionSeed) -> Result<QuizDraft, AppError> {
        Ok(QuizDraft {
            question: format!("{}에 무엇을 드셨나요?", seed.date),
            answer: seed.answer.clone(),
            choices: vec![seed.answer.clone(), "불고기".to_string(), "비빔밥".to_string()],
        })
    }
}

#[tokio::test]
async fn stub_generator_should_echo_seed_answer_with_three_choices() {
    let seed = QuestionSeed {
        question_id: QuestionType::Q3,
        question: "무엇을 먹었나요?".to_string(),
        answer: "kimchi stew".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        record_id: 42,
    };

    let generator = StubGenerator;
    let draft = generator.generate(&seed).await.unwrap();

    assert_eq!(draft.answer, "kimchi stew");
    assert_eq!(draft.choices.len(), 3);
    assert!(draft.choices.contains(&"kimchi stew".to_string()));
}

/// 생성기 실패는 에러로 전파된다 (조용한 건너뛰기 금지)
struct FailingGenerator;

#[async_trait::async_trait]
impl QuizGeneratorTrait for FailingGenerator {
    async fn generate(&self, _seed: &QuestionSeed) -> Result<QuizDraft, AppError> {
        Err(AppError::OpenAiTemporaryError)
    }
}

#[tokio::test]
async fn failing_generator_should_surface_upstream_error() {
    let seed = QuestionSeed {
        question_id: QuestionType::Q2,
        question: "누구와 시간을 보냈나요?".to_string(),
        answer: "엄마".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        record_id: 1,
    };

    let result = FailingGenerator.generate(&seed).await;
    assert!(matches!(result, Err(AppError::OpenAiTemporaryError)));
}
