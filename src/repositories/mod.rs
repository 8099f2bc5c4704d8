//! # Repository Layer
//!
//! 영속성 계약(trait)과 MongoDB/메모리 구현체를 제공합니다.

pub mod users;
pub mod errors;
