//! # 단어 단위 버전 비교(diff) 엔진
//!
//! 두 텍스트를 단어 빈도(bag-of-words) 기준으로 비교하고 요약 통계를 계산합니다.
//! 위치나 순서는 보지 않고, 단어별 등장 횟수의 증감만 기록합니다.
//!
//! 이 모듈의 함수들:
//! - `tokenize()`: 텍스트를 단어 토큰으로 분리
//! - `frequency_map()`: 토큰 목록 → 소문자 단어별 등장 횟수
//! - `compute_diff()`: 이전/새 텍스트의 추가·삭제 단어 계산
//! - `compute_summary()`: diff 결과로부터 요약(Summary) 생성
//!
//! 모든 함수는 I/O가 없는 순수 함수이므로 여러 요청에서 동시에 호출해도 안전합니다.

use crate::models::Summary;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// ASCII 단어 문자(영숫자 + 밑줄)의 최대 연속 구간.
/// 한글 등 비ASCII 문자는 구분자로 취급됩니다.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    // 리터럴 패턴이므로 컴파일 실패는 프로그래밍 오류입니다.
    Regex::new(r"[0-9A-Za-z_]+").expect("word pattern is valid")
});

/// 두 텍스트 사이의 단어 빈도 차이
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult {
    /// 새 텍스트에서 등장 횟수가 늘어난 단어 (증가분만큼 반복)
    pub added_words: Vec<String>,
    /// 이전 텍스트보다 등장 횟수가 줄어든 단어 (감소분만큼 반복)
    pub removed_words: Vec<String>,
    /// 이전 텍스트의 토큰 수
    pub old_length: usize,
    /// 새 텍스트의 토큰 수
    pub new_length: usize,
}

/// 텍스트를 단어 토큰으로 분리합니다.
///
/// 대소문자는 그대로 유지합니다. 소문자 변환은 `frequency_map()`에서 합니다.
///
/// # 예시
/// ```text
/// tokenize("Hello, world_1!") → ["Hello", "world_1"]
/// tokenize("!!! ??? ...")     → []
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// 토큰 목록을 소문자 단어별 등장 횟수 맵으로 변환합니다.
///
/// `"Word"`와 `"word"`는 같은 키로 합쳐집니다.
pub fn frequency_map<S: AsRef<str>>(tokens: &[S]) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for token in tokens {
        *freq.entry(token.as_ref().to_lowercase()).or_insert(0) += 1;
    }
    freq
}

/// 이전 내용과 새 내용의 단어 빈도 차이를 계산합니다.
///
/// 단어 `w`의 등장 횟수가 `c_old`에서 `c_new`로 바뀌었다면:
/// - `c_new > c_old`: `added_words`에 `w`를 `c_new - c_old`번 추가
/// - `c_old > c_new`: `removed_words`에 `w`를 `c_old - c_new`번 추가
///
/// 결과 목록은 각 텍스트에서 단어가 처음 등장한 순서를 따릅니다.
/// 따라서 `added_words.len() - removed_words.len() == new_length - old_length`가
/// 항상 성립합니다.
pub fn compute_diff(previous_content: &str, new_content: &str) -> DiffResult {
    let previous_tokens = tokenize(previous_content);
    let new_tokens = tokenize(new_content);

    let previous_freq = frequency_map(&previous_tokens);
    let new_freq = frequency_map(&new_tokens);

    DiffResult {
        added_words: surplus_words(&new_tokens, &new_freq, &previous_freq),
        removed_words: surplus_words(&previous_tokens, &previous_freq, &new_freq),
        old_length: previous_tokens.len(),
        new_length: new_tokens.len(),
    }
}

/// `freq`에서 `baseline`보다 많이 등장한 단어를 초과분만큼 반복해 모읍니다.
/// `tokens`는 출력 순서(첫 등장 순)를 정하는 데만 사용합니다.
fn surplus_words(
    tokens: &[&str],
    freq: &HashMap<String, usize>,
    baseline: &HashMap<String, usize>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for token in tokens {
        let word = token.to_lowercase();
        if !seen.insert(word.clone()) {
            continue;
        }
        let count = freq.get(&word).copied().unwrap_or(0);
        let base = baseline.get(&word).copied().unwrap_or(0);
        // saturating_sub: 감소한 단어는 음수 추가가 아니라 0으로 처리
        for _ in 0..count.saturating_sub(base) {
            words.push(word.clone());
        }
    }

    words
}

/// diff 결과로부터 요약 통계를 계산합니다.
///
/// `change_percentage`는 이전 토큰 수 대비 증감률(%)을 반올림한 값입니다.
/// 이전 내용이 비어 있으면(`old_length == 0`) 새 길이와 무관하게 항상 100입니다.
pub fn compute_summary(diff: &DiffResult) -> Summary {
    let total_added = diff.added_words.len() as i64;
    let total_removed = diff.removed_words.len() as i64;

    Summary {
        total_words_added: total_added,
        total_words_removed: total_removed,
        net_word_change: total_added - total_removed,
        previous_word_count: diff.old_length as i64,
        current_word_count: diff.new_length as i64,
        change_percentage: change_percentage(diff.old_length, diff.new_length),
        unique_words_added: distinct_count(&diff.added_words),
        unique_words_removed: distinct_count(&diff.removed_words),
    }
}

/// 정확히 .5인 경우 양의 무한대 방향으로 올림합니다 (-2.5 → -2, 2.5 → 3).
fn change_percentage(old_length: usize, new_length: usize) -> i64 {
    if old_length == 0 {
        return 100;
    }
    let ratio = (new_length as f64 - old_length as f64) / old_length as f64;
    (ratio * 100.0 + 0.5).floor() as i64
}

fn distinct_count(words: &[String]) -> i64 {
    words.iter().collect::<HashSet<_>>().len() as i64
}
