//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `version`: 문서 버전(Version), 변화 요약(Summary), 목록 조회 관련 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Version`처럼 짧게 쓸 수 있습니다.

pub mod version;

pub use version::*;
