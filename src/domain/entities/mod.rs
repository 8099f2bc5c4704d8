//! 데이터베이스에 영속되는 엔티티 모듈

pub mod users;
pub mod errors;
