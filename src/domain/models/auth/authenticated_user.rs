use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::domain::dto::users::response::UserProfile;

/// 인증 미들웨어를 통과한 요청에 부착되는 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (토큰의 `data` 클레임)
    pub user_id: String,

    /// 저장소에서 조회한 최소 프로필
    pub profile: UserProfile,
}

impl AuthenticatedUser {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            user_id: profile.id.clone(),
            profile,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어가 보호하지 않는 라우트에서 사용되면 `ERR_AUTH_FAILED`로 거부됩니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::auth_failed("인증되지 않은 요청입니다").into())),
        }
    }
}
