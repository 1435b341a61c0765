//! # 버전(Version) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/versions`      → 새 버전 저장 (직전 버전과의 단어 diff 포함)
//! - `GET  /api/v1/versions`      → 버전 목록 조회 (`?limit=50&skip=0&sort=desc`)
//! - `GET  /api/v1/versions/{id}` → 단일 버전 조회

use crate::{db, error::AppError, models::*, services};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 목록 조회 시 `limit`이 없거나 0일 때 사용하는 기본값
const DEFAULT_LIMIT: u32 = 50;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// "최신 버전 조회 → 새 버전 저장"을 한 번에 하나씩만 실행하기 위한 잠금.
    /// 동시에 들어온 두 요청이 같은 직전 버전을 기준으로 diff하지 않게 합니다.
    pub create_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            create_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// `POST /versions` — 새 버전을 저장합니다.
///
/// 가장 최근 버전의 내용(없으면 빈 문자열)과 비교해 추가/삭제 단어와 요약을 계산한 뒤
/// 함께 저장하고, 저장된 버전을 `201 Created`로 반환합니다.
///
/// `content`가 없거나 null이거나 문자열이 아니면 400을 반환합니다.
pub async fn create_version(
    State(state): State<AppState>,
    payload: Result<Json<CreateVersionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Version>), AppError> {
    let Json(req) = payload?;
    let content = req
        .content
        .ok_or_else(|| AppError::BadRequest("Content is required".to_string()))?;

    let _guard = state.create_lock.lock().await;
    let mut tx = state.pool.begin().await?;

    let previous = db::latest_version(&mut tx).await?;
    let previous_content = previous.as_ref().map_or("", |v| v.content.as_str());

    let diff = services::compute_diff(previous_content, &content);
    let summary = services::compute_summary(&diff);

    // 시계가 뒤로 가더라도 타임스탬프는 직전 버전보다 작아지지 않습니다.
    let now = chrono::Utc::now().timestamp_millis();
    let timestamp = previous.as_ref().map_or(now, |v| now.max(v.timestamp));

    let version = Version {
        id: uuid::Uuid::now_v7().to_string(),
        content,
        timestamp,
        added_words: diff.added_words,
        removed_words: diff.removed_words,
        old_length: diff.old_length as i64,
        new_length: diff.new_length as i64,
        summary,
    };

    db::insert_version(&mut tx, &version).await?;
    tx.commit().await?;

    tracing::info!(
        id = %version.id,
        added = version.summary.total_words_added,
        removed = version.summary.total_words_removed,
        words = version.new_length,
        "Created version"
    );

    Ok((StatusCode::CREATED, Json(version)))
}

/// `GET /versions` — 버전 목록과 페이지 정보를 반환합니다.
///
/// 응답: `{ "versions": [...], "pagination": { "total", "limit", "skip", "hasMore" } }`
pub async fn list_versions(
    State(state): State<AppState>,
    query: Result<Query<ListVersionsQuery>, QueryRejection>,
) -> Result<Json<VersionList>, AppError> {
    let Query(query) = query?;

    let limit = match query.limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(limit) => limit,
    };
    let skip = query.skip.unwrap_or(0);
    let order = SortOrder::parse(query.sort.as_deref());

    let versions = db::list_versions(&state.pool, order, limit, skip).await?;
    let total = db::count_versions(&state.pool).await?;

    Ok(Json(VersionList {
        versions,
        pagination: Pagination::new(total, limit, skip),
    }))
}

/// `GET /versions/{id}` — 단일 버전을 조회합니다.
pub async fn get_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Version>, AppError> {
    let version = db::get_version(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(version))
}
