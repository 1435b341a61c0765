use serde::{Deserialize, Serialize};

/// 버전 간 단어 변화 요약
///
/// 저장/조회 경로 모두 같은 고정된 형태를 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_words_added: i64,
    pub total_words_removed: i64,
    pub net_word_change: i64,
    pub previous_word_count: i64,
    pub current_word_count: i64,
    pub change_percentage: i64,
    pub unique_words_added: i64,
    pub unique_words_removed: i64,
}

/// 저장된 문서 버전 하나 (API 응답 형태)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub content: String,
    /// 생성 시각 (Unix epoch 기준 밀리초)
    pub timestamp: i64,
    pub added_words: Vec<String>,
    pub removed_words: Vec<String>,
    pub old_length: i64,
    pub new_length: i64,
    pub summary: Summary,
}

/// `versions` 테이블의 행.
/// 단어 목록은 JSON 텍스트로, 요약은 개별 컬럼으로 저장됩니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VersionRow {
    pub id: String,
    pub content: String,
    pub timestamp: i64,
    pub added_words: String,
    pub removed_words: String,
    pub old_length: i64,
    pub new_length: i64,
    pub total_words_added: i64,
    pub total_words_removed: i64,
    pub net_word_change: i64,
    pub previous_word_count: i64,
    pub current_word_count: i64,
    pub change_percentage: i64,
    pub unique_words_added: i64,
    pub unique_words_removed: i64,
}

impl TryFrom<VersionRow> for Version {
    type Error = serde_json::Error;

    fn try_from(row: VersionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            content: row.content,
            timestamp: row.timestamp,
            added_words: serde_json::from_str(&row.added_words)?,
            removed_words: serde_json::from_str(&row.removed_words)?,
            old_length: row.old_length,
            new_length: row.new_length,
            summary: Summary {
                total_words_added: row.total_words_added,
                total_words_removed: row.total_words_removed,
                net_word_change: row.net_word_change,
                previous_word_count: row.previous_word_count,
                current_word_count: row.current_word_count,
                change_percentage: row.change_percentage,
                unique_words_added: row.unique_words_added,
                unique_words_removed: row.unique_words_removed,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVersionRequest {
    /// 필드 누락과 null은 모두 None으로 들어옵니다.
    pub content: Option<String>,
}

/// `GET /versions`의 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct ListVersionsQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// 오래된 버전부터
    Asc,
    /// 최신 버전부터 (기본값)
    Desc,
}

impl SortOrder {
    /// `"asc"`만 오름차순이고, 그 외 값이나 누락은 모두 내림차순입니다.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub limit: u32,
    pub skip: u32,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: i64, limit: u32, skip: u32) -> Self {
        Self {
            total,
            limit,
            skip,
            has_more: i64::from(skip) + i64::from(limit) < total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionList {
    pub versions: Vec<Version>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Version {
        Version {
            id: "0192f0c1-0000-7000-8000-000000000000".to_string(),
            content: "a a b".to_string(),
            timestamp: 1_700_000_000_000,
            added_words: vec!["a".to_string()],
            removed_words: vec![],
            old_length: 2,
            new_length: 3,
            summary: Summary {
                total_words_added: 1,
                total_words_removed: 0,
                net_word_change: 1,
                previous_word_count: 2,
                current_word_count: 3,
                change_percentage: 50,
                unique_words_added: 1,
                unique_words_removed: 0,
            },
        }
    }

    #[test]
    fn test_version_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "0192f0c1-0000-7000-8000-000000000000",
                "content": "a a b",
                "timestamp": 1_700_000_000_000_i64,
                "addedWords": ["a"],
                "removedWords": [],
                "oldLength": 2,
                "newLength": 3,
                "summary": {
                    "totalWordsAdded": 1,
                    "totalWordsRemoved": 0,
                    "netWordChange": 1,
                    "previousWordCount": 2,
                    "currentWordCount": 3,
                    "changePercentage": 50,
                    "uniqueWordsAdded": 1,
                    "uniqueWordsRemoved": 0
                }
            })
        );
    }

    #[test]
    fn test_row_with_broken_word_list_is_rejected() {
        let row = VersionRow {
            id: "x".to_string(),
            content: String::new(),
            timestamp: 0,
            added_words: "not json".to_string(),
            removed_words: "[]".to_string(),
            old_length: 0,
            new_length: 0,
            total_words_added: 0,
            total_words_removed: 0,
            net_word_change: 0,
            previous_word_count: 0,
            current_word_count: 0,
            change_percentage: 100,
            unique_words_added: 0,
            unique_words_removed: 0,
        };
        assert!(Version::try_from(row).is_err());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }

    #[test]
    fn test_pagination_has_more() {
        assert!(Pagination::new(10, 5, 0).has_more);
        assert!(!Pagination::new(10, 5, 5).has_more);
        assert!(!Pagination::new(0, 50, 0).has_more);
    }
}
