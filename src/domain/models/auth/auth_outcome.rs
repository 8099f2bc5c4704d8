//! 신원 검증 결과 모델
//!
//! 각 인증 전략은 성공/거부를 에러가 아닌 값으로 반환합니다.
//! 인프라 장애만 `AppError`로 전파됩니다.

use std::fmt;
use crate::domain::dto::users::response::UserProfile;

/// 신원 검증 결과
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// 기존 계정으로 인증 성공
    Authenticated(UserProfile),
    /// 새 계정 생성
    Created(UserProfile),
    /// 기존 계정에 새로운 인증 수단 연결
    Linked(UserProfile),
    /// 비밀번호 자격증명을 가진 계정이 이미 존재함 (토큰을 발급하지 않음)
    AlreadyExists(UserProfile),
    /// 자격증명 거부
    Rejected(RejectReason),
}

impl AuthOutcome {
    /// 토큰을 발급할 수 있는 결과라면 해당 프로필을 반환합니다.
    ///
    /// `AlreadyExists`는 기존 계정의 프로필을 담고 있지만 토큰 발급 대상이 아닙니다.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            AuthOutcome::Authenticated(p) | AuthOutcome::Created(p) | AuthOutcome::Linked(p) => Some(p),
            _ => None,
        }
    }
}

/// 로그인 거부 사유 (로그 및 디버그 정보용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    IncorrectEmail,
    InvalidPassword,
    /// 소셜 로그인으로만 생성된 계정에 비밀번호 로그인 시도
    ThirdPartyAccount,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectReason::IncorrectEmail => "Incorrect email",
            RejectReason::InvalidPassword => "Invalid password",
            RejectReason::ThirdPartyAccount => "You may have registered with a third-party provider",
        };
        write!(f, "{}", msg)
    }
}
