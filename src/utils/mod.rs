//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 입력 정리, 사용자명 생성, 검증 에러 포맷팅

pub mod string_utils;
