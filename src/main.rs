use std::net::SocketAddr;
use std::sync::Arc;

use thinkeep_server::config::{establish_connection, AppConfig};
use thinkeep_server::domain::ai::client::OpenAiQuizGenerator;
use thinkeep_server::domain::user::streak::StreakBadgeTable;
use thinkeep_server::state::AppState;
use thinkeep_server::utils::logging::init_logging;
use thinkeep_server::app;

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 프로세스 종료까지 유지)
    let _guard = init_logging();

    // 3. 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 4. 데이터베이스 연결
    let db = match establish_connection(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("데이터베이스 연결 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 5. 애플리케이션 상태 구성
    let state = AppState {
        db,
        quiz_generator: Arc::new(OpenAiQuizGenerator::new(&config.openai_api_key)),
        streak_badges: StreakBadgeTable::standard(),
        config,
    };

    // 6. 라우터 설정 및 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    let app = app(state);

    tracing::info!("Server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("포트 바인딩 실패: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("서버 실행 실패: {}", e);
        std::process::exit(1);
    }
}
