//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 연결 풀은 프로세스 시작 시 `connect()`로 한 번만 만들고,
//! `AppState`를 통해 핸들러에 명시적으로 전달합니다.
//!
//! 각 하위 모듈:
//! - `versions`: 문서 버전 기록의 삽입/조회 쿼리

pub mod versions;

pub use versions::*;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// ./migrations 폴더의 SQL 파일들을 컴파일 타임에 바이너리에 포함시킵니다.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite 연결 풀을 생성하고 마이그레이션을 실행합니다.
///
/// DB 파일이 없으면 새로 만듭니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

/// 테스트용 인메모리 DB.
/// 인메모리 DB는 연결마다 별개이므로 연결을 하나로 제한합니다.
#[cfg(test)]
pub async fn connect_in_memory() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}
