//! 퀴즈 제출 API 통합 테스트
//!
//! POST /api/quizzes/submit 엔드포인트에 대한 HTTP 통합 테스트입니다.
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

mod submit_test_helpers {
    use super::*;

    /// 퀴즈 제출 테스트용 라우터 생성
    pub fn create_submit_test_router() -> Router {
        async fn test_handler(
            headers: axum::http::HeaderMap,
            body: Result<axum::Json<Value>, axum::extract::rejection::JsonRejection>,
        ) -> Result<axum::Json<Value>, (StatusCode, axum::Json<Value>)> {
            // Authorization 헤더 검증
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

            // Body 파싱 검증
            let body = match body {
                Ok(b) => b,
                Err(e) => {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        axum::Json(json!({
                            "isSuccess": false,
                            "code": "COMMON400",
                            "message": format!("잘못된 요청 형식입니다: {}", e),
                            "result": null
                        })),
                    ));
                }
            };

            let quiz_id = body.get("quizId").and_then(|v| v.as_i64()).unwrap_or(0);
            let skipped = body.get("skipped").and_then(|v| v.as_bool()).unwrap_or(false);

            // Mock: 존재하지 않는 퀴즈 (999)
            if quiz_id == 999 {
                return Err((
                    StatusCode::NOT_FOUND,
                    axum::Json(json!({
                        "isSuccess": false,
                        "code": "QUIZ4041",
                        "message": "퀴즈가 존재하지 않습니다.",
                        "result": null
                    })),
                ));
            }

            // Mock: 타인 소유 퀴즈 (777)
            if quiz_id == 777 {
                return Err((
                    StatusCode::FORBIDDEN,
                    axum::Json(json!({
                        "isSuccess": false,
                        "code": "QUIZ4031",
                        "message": "본인의 퀴즈만 제출할 수 있습니다.",
                        "result": null
                    })),
                ));
            }

            // Mock: 스킵 쿼터 소진 상태에서 건너뛰기 (555)
            if quiz_id == 555 && skipped {
                return Err((
                    StatusCode::TOO_MANY_REQUESTS,
                    axum::Json(json!({
                        "isSuccess": false,
                        "code": "QUIZ4291",
                        "message": "오늘은 더 이상 퀴즈를 건너뛸 수 없습니다 (하루 최대 2회)",
                        "result": null
                    })),
                ));
            }

            Ok(axum::Json(json!({
                "isSuccess": true,
                "code": "COMMON200",
                "message": "퀴즈 제출이 완료되었습니다.",
                "result": null
            })))
        }

        Router::new().route("/api/quizzes/submit", post(test_handler))
    }

    pub fn submit_request(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/quizzes/submit")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }
}

use submit_test_helpers::{create_submit_test_router, submit_request};

#[tokio::test]
async fn submit_without_token_should_return_401() {
    let app = create_submit_test_router();

    let request = submit_request(None, json!({"quizId": 1, "userAnswer": "김치찌개"}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["isSuccess"], false);
    assert_eq!(json["code"], "AUTH4001");
}

#[tokio::test]
async fn submit_unknown_quiz_should_return_404() {
    let app = create_submit_test_router();

    let request = submit_request(Some("token"), json!({"quizId": 999, "userAnswer": "답"}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "QUIZ4041");
}

#[tokio::test]
async fn submit_other_users_quiz_should_return_403() {
    let app = create_submit_test_router();

    let request = submit_request(Some("token"), json!({"quizId": 777, "userAnswer": "답"}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "QUIZ4031");
}

#[tokio::test]
async fn third_skip_of_the_day_should_return_429() {
    let app = create_submit_test_router();

    let request = submit_request(Some("token"), json!({"quizId": 555, "skipped": true}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["isSuccess"], false);
    assert_eq!(json["code"], "QUIZ4291");
}

#[tokio::test]
async fn valid_submit_should_return_success_envelope() {
    let app = create_submit_test_router();

    let request = submit_request(Some("token"), json!({"quizId": 1, "userAnswer": "Seoul "}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["isSuccess"], true);
    assert_eq!(json["code"], "COMMON200");
}

#[tokio::test]
async fn malformed_body_should_return_400() {
    let app = create_submit_test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/quizzes/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer token")
        .body(Body::from("{not-json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
