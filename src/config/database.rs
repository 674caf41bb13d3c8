use crate::domain::{
    badge::entity::{badge, user_badge},
    quiz::entity::quiz,
    record::entity::record,
    user::entity::user,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
    Set, Statement,
};
use std::env;
use tracing::info;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    // Check if schema update is enabled
    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        // Auto-create tables (Schema Sync)
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // List of entities to create
    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Independent Entities
    create_table_if_not_exists(db, &schema, user::Entity).await?;
    create_table_if_not_exists(db, &schema, badge::Entity).await?;

    // 2. Dependent Entities
    create_table_if_not_exists(db, &schema, record::Entity).await?;
    create_table_if_not_exists(db, &schema, user_badge::Entity).await?;
    create_table_if_not_exists(db, &schema, quiz::Entity).await?;

    // 하루 1건 기록 제약
    create_unique_index_if_not_exists(db, "uq_records_user_date", "records", &["user_no", "date"])
        .await?;
    // (사용자, 기록, 질문 유형) 중복 퀴즈 생성 방지
    create_unique_index_if_not_exists(
        db,
        "uq_quizzes_user_record_question",
        "quizzes",
        &["user_no", "record_id", "question_id"],
    )
    .await?;
    // 오늘 퀴즈 집계 쿼리 최적화를 위한 인덱스
    create_index_if_not_exists(
        db,
        "idx_quizzes_user_submitted",
        "quizzes",
        &["user_no", "submitted_at"],
    )
    .await?;

    // 기본 뱃지 카탈로그 시딩
    seed_default_badges(db).await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

/// 스트릭 임계값에 대응하는 기본 뱃지(1~4번)를 시딩한다.
///
/// 이미 존재하는 뱃지는 건드리지 않는다. 운영 중 카탈로그 수정은 관리자 API로 한다.
async fn seed_default_badges(db: &DatabaseConnection) -> Result<(), DbErr> {
    let defaults: [(i64, &str, &str, &str); 4] = [
        (
            1,
            "3일의 기적",
            "3일 연속으로 일기를 작성했어요",
            r#"{"type":"streak","days":3}"#,
        ),
        (
            2,
            "일주일의 습관",
            "7일 연속으로 일기를 작성했어요",
            r#"{"type":"streak","days":7}"#,
        ),
        (
            3,
            "2주의 끈기",
            "14일 연속으로 일기를 작성했어요",
            r#"{"type":"streak","days":14}"#,
        ),
        (
            4,
            "한 달의 기록가",
            "30일 연속으로 일기를 작성했어요",
            r#"{"type":"streak","days":30}"#,
        ),
    ];

    for (badge_id, name, description, condition) in defaults {
        let exists = badge::Entity::find_by_id(badge_id).one(db).await?.is_some();
        if exists {
            continue;
        }

        let model = badge::ActiveModel {
            badge_id: Set(badge_id),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            condition_json: Set(condition.to_string()),
        };
        model.insert(db).await?;
        info!("Seeded default badge: badge_id={}, name={}", badge_id, name);
    }

    Ok(())
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate")
                || err_str.contains("already exists")
                || err_str.contains("exists")
            {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_unique_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name, table_name, cols
    );
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            // Ignore duplicate index errors for idempotency.
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate")
                || err_str.contains("already exists")
                || err_str.contains("exists")
            {
                Ok(())
            } else {
                tracing::error!("Failed to create unique index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    match db.execute(create_stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create table: {}", e);
            Err(e)
        }
    }
}
