//! # 비즈니스 로직 모듈
//!
//! - `diff`: 버전 간 단어 빈도 비교와 요약 계산 (순수 함수)

pub mod diff;

pub use diff::*;
