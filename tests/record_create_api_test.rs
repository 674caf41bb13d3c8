//! 일기 작성 API 통합 테스트
//!
//! POST /api/records 엔드포인트에 대한 HTTP 통합 테스트입니다.
//! Mock 기반 테스트로 실제 DB 연결 없이 핸들러 동작을 검증합니다.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

mod record_test_helpers {
    use super::*;

    const REQUIRED_QUESTIONS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

    /// 일기 작성 테스트용 라우터 생성
    ///
    /// emotion이 "duplicate"면 중복 작성 상황을 흉내낸다.
    pub fn create_record_test_router() -> Router {
        async fn test_handler(
            headers: axum::http::HeaderMap,
            axum::Json(body): axum::Json<Value>,
        ) -> Result<axum::Json<Value>, (StatusCode, axum::Json<Value>)> {
            let auth_str = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            if !auth_str.starts_with("Bearer ") {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({
                        "isSuccess": false,
                        "code": "AUTH4001",
                        "message": "로그인이 필요합니다.",
                        "result": null
                    })),
                ));
            }

            // 필수 답변 검증 (Q1~Q4 모두, 공백만은 불가)
            let answers = body.get("answers").and_then(|v| v.as_object());
            let complete = answers
                .map(|map| {
                    REQUIRED_QUESTIONS.iter().all(|q| {
                        map.get(*q)
                            .and_then(|v| v.as_str())
                            .map(|a| !a.trim().is_empty())
                            .unwrap_or(false)
                    })
                })
                .unwrap_or(false);

            let emotion = body.get("emotion").and_then(|v| v.as_str()).unwrap_or("");

            if !complete || emotion.trim().is_empty() {
                return Err((
                    StatusCode::BAD_REQUEST,
                    axum::Json(json!({
                        "isSuccess": false,
                        "code": "COMMON400",
                        "message": "모든 질문(Q1~Q4)과 감정을 입력해주세요",
                        "result": null
                    })),
                ));
            }

            // Mock: 오늘 이미 작성한 경우
            if emotion == "duplicate" {
                return Err((
                    StatusCode::CONFLICT,
                    axum::Json(json!({
                        "isSuccess": false,
                        "code": "RECORD4091",
                        "message": "오늘은 이미 기록을 작성하셨습니다",
                        "result": null
                    })),
                ));
            }

            // Mock: 스트릭 3 도달로 뱃지 1 지급
            let new_badge = if emotion == "third-day" {
                json!({"userNo": 1, "badgeId": 1, "awardedAt": "2025-07-03T09:00:00"})
            } else {
                Value::Null
            };

            Ok(axum::Json(json!({
                "isSuccess": true,
                "code": "COMMON200",
                "message": "성공입니다.",
                "result": {
                    "record": {
                        "recordId": 10,
                        "userNo": 1,
                        "answers": body.get("answers"),
                        "emotion": emotion,
                        "isComplete": true
                    },
                    "newBadge": new_badge
                }
            })))
        }

        Router::new().route("/api/records", post(test_handler))
    }

    pub fn record_request(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/records")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn full_answers() -> Value {
        json!({
            "Q1": "네, 아침을 먹었어요",
            "Q2": "엄마",
            "Q3": "김치찌개",
            "Q4": "공원 산책"
        })
    }
}

use record_test_helpers::{create_record_test_router, full_answers, record_request};

#[tokio::test]
async fn create_without_token_should_return_401() {
    let app = create_record_test_router();

    let request = record_request(None, json!({"answers": full_answers(), "emotion": "happy"}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_answer_should_return_400() {
    let app = create_record_test_router();

    let request = record_request(
        Some("token"),
        json!({
            "answers": {"Q1": "네", "Q2": "엄마", "Q3": "김치찌개"},
            "emotion": "happy"
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "COMMON400");
}

#[tokio::test]
async fn blank_answer_should_return_400() {
    let app = create_record_test_router();

    let request = record_request(
        Some("token"),
        json!({
            "answers": {"Q1": "네", "Q2": "  ", "Q3": "김치찌개", "Q4": "산책"},
            "emotion": "happy"
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_emotion_should_return_400() {
    let app = create_record_test_router();

    let request = record_request(
        Some("token"),
        json!({"answers": full_answers(), "emotion": " "}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_daily_record_should_return_409() {
    let app = create_record_test_router();

    let request = record_request(
        Some("token"),
        json!({"answers": full_answers(), "emotion": "duplicate"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["isSuccess"], false);
    assert_eq!(json["code"], "RECORD4091");
}

#[tokio::test]
async fn valid_create_should_return_record_without_badge() {
    let app = create_record_test_router();

    let request = record_request(
        Some("token"),
        json!({"answers": full_answers(), "emotion": "happy"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["isSuccess"], true);
    assert_eq!(json["result"]["record"]["recordId"], 10);
    assert_eq!(json["result"]["newBadge"], Value::Null);
}

#[tokio::test]
async fn third_consecutive_day_should_include_new_badge() {
    let app = create_record_test_router();

    let request = record_request(
        Some("token"),
        json!({"answers": full_answers(), "emotion": "third-day"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["result"]["newBadge"]["badgeId"], 1);
    assert_eq!(json["result"]["newBadge"]["userNo"], 1);
}
