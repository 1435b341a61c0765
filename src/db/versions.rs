use crate::error::AppError;
use crate::models::{SortOrder, Version, VersionRow};
use sqlx::{SqliteConnection, SqlitePool};

const VERSION_COLUMNS: &str = r#"
    id, content, timestamp, added_words, removed_words, old_length, new_length,
    total_words_added, total_words_removed, net_word_change, previous_word_count,
    current_word_count, change_percentage, unique_words_added, unique_words_removed
"#;

/// 가장 최근에 저장된 버전을 조회합니다.
///
/// "최근"의 기준은 타임스탬프가 아니라 삽입 순서(seq)입니다.
/// 같은 밀리초에 저장된 버전이 있어도 결과가 하나로 정해집니다.
pub async fn latest_version(conn: &mut SqliteConnection) -> Result<Option<Version>, AppError> {
    let row = sqlx::query_as::<_, VersionRow>(&format!(
        "SELECT {VERSION_COLUMNS} FROM versions ORDER BY seq DESC LIMIT 1"
    ))
    .fetch_optional(conn)
    .await?;

    Ok(row.map(Version::try_from).transpose()?)
}

pub async fn insert_version(
    conn: &mut SqliteConnection,
    version: &Version,
) -> Result<(), AppError> {
    let added_words = serde_json::to_string(&version.added_words)?;
    let removed_words = serde_json::to_string(&version.removed_words)?;
    let summary = &version.summary;

    sqlx::query(
        r#"
        INSERT INTO versions (
            id, content, timestamp, added_words, removed_words, old_length, new_length,
            total_words_added, total_words_removed, net_word_change, previous_word_count,
            current_word_count, change_percentage, unique_words_added, unique_words_removed
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&version.id)
    .bind(&version.content)
    .bind(version.timestamp)
    .bind(added_words)
    .bind(removed_words)
    .bind(version.old_length)
    .bind(version.new_length)
    .bind(summary.total_words_added)
    .bind(summary.total_words_removed)
    .bind(summary.net_word_change)
    .bind(summary.previous_word_count)
    .bind(summary.current_word_count)
    .bind(summary.change_percentage)
    .bind(summary.unique_words_added)
    .bind(summary.unique_words_removed)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn list_versions(
    pool: &SqlitePool,
    order: SortOrder,
    limit: u32,
    skip: u32,
) -> Result<Vec<Version>, AppError> {
    let direction = match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    let rows = sqlx::query_as::<_, VersionRow>(&format!(
        "SELECT {VERSION_COLUMNS} FROM versions ORDER BY seq {direction} LIMIT ? OFFSET ?"
    ))
    .bind(i64::from(limit))
    .bind(i64::from(skip))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| Version::try_from(row).map_err(AppError::from))
        .collect()
}

pub async fn count_versions(pool: &SqlitePool) -> Result<i64, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM versions")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn get_version(pool: &SqlitePool, id: &str) -> Result<Option<Version>, AppError> {
    let row = sqlx::query_as::<_, VersionRow>(&format!(
        "SELECT {VERSION_COLUMNS} FROM versions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Version::try_from).transpose()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::services::{compute_diff, compute_summary};

    fn make_version(id: &str, previous: &str, content: &str, timestamp: i64) -> Version {
        let diff = compute_diff(previous, content);
        let summary = compute_summary(&diff);
        Version {
            id: id.to_string(),
            content: content.to_string(),
            timestamp,
            added_words: diff.added_words,
            removed_words: diff.removed_words,
            old_length: diff.old_length as i64,
            new_length: diff.new_length as i64,
            summary,
        }
    }

    async fn seed(pool: &SqlitePool, versions: &[Version]) {
        let mut conn = pool.acquire().await.unwrap();
        for version in versions {
            insert_version(&mut conn, version).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_latest_version_empty_store() {
        let pool = connect_in_memory().await;
        let mut conn = pool.acquire().await.unwrap();
        assert!(latest_version(&mut conn).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let pool = connect_in_memory().await;
        let version = make_version("v1", "", "Hello hello world", 1_000);
        seed(&pool, &[version.clone()]).await;

        let stored = get_version(&pool, "v1").await.unwrap().unwrap();
        assert_eq!(stored, version);
        assert!(get_version(&pool, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_version_breaks_timestamp_ties_by_insertion() {
        let pool = connect_in_memory().await;
        seed(
            &pool,
            &[
                make_version("first", "", "one", 5_000),
                make_version("second", "one", "one two", 5_000),
            ],
        )
        .await;

        let mut conn = pool.acquire().await.unwrap();
        let latest = latest_version(&mut conn).await.unwrap().unwrap();
        assert_eq!(latest.id, "second");
    }

    #[tokio::test]
    async fn test_list_versions_order_and_paging() {
        let pool = connect_in_memory().await;
        seed(
            &pool,
            &[
                make_version("a", "", "a", 1),
                make_version("b", "a", "a b", 2),
                make_version("c", "a b", "a b c", 3),
            ],
        )
        .await;

        let ids = |versions: Vec<Version>| versions.into_iter().map(|v| v.id).collect::<Vec<_>>();

        let desc = list_versions(&pool, SortOrder::Desc, 50, 0).await.unwrap();
        assert_eq!(ids(desc), ["c", "b", "a"]);

        let asc = list_versions(&pool, SortOrder::Asc, 2, 0).await.unwrap();
        assert_eq!(ids(asc), ["a", "b"]);

        let skipped = list_versions(&pool, SortOrder::Desc, 2, 2).await.unwrap();
        assert_eq!(ids(skipped), ["a"]);

        assert_eq!(count_versions(&pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let pool = connect_in_memory().await;
        seed(&pool, &[make_version("dup", "", "x", 1)]).await;

        let mut conn = pool.acquire().await.unwrap();
        let result = insert_version(&mut conn, &make_version("dup", "x", "y", 2)).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
