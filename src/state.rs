use crate::config::AppConfig;
use crate::domain::ai::client::QuizGenerator;
use crate::domain::user::streak::StreakBadgeTable;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// 회상 퀴즈 생성기 (테스트에서 Mock으로 대체 가능)
    pub quiz_generator: QuizGenerator,
    /// 스트릭 임계값 → 뱃지 매핑 (테스트에서 재정의 가능)
    pub streak_badges: StreakBadgeTable,
}
