//! # Bearer 토큰 인증 미들웨어
//!
//! 보호된 라우트 앞에서 요청마다 다음 단계를 순서대로 통과해야 합니다.
//!
//! ```text
//! Start → HeaderPresent → SchemeBearer → TokenVerified → IdentityLoaded → Admitted
//! ```
//!
//! | 실패 지점 | 실패 코드 |
//! |-----------|-----------|
//! | `Authorization` 헤더 없음 / UTF-8 아님 | `ERR_INVALID_JWT` |
//! | 공백 기준 두 부분이 아님 | `ERR_INVALID_JWT` |
//! | 스킴이 `Bearer`가 아님 (대소문자 무시) | `ERR_INVALID_JWT` |
//! | 토큰 검증 실패 | `ERR_AUTH_FAILED` |
//! | 사용자 없음 / 조회 실패 | `ERR_AUTH_FAILED` |
//!
//! 통과한 요청에는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)가
//! 부착되고, 거부된 요청은 내부 서비스를 호출하지 않고 `AppError`가 부착된 응답으로 끝납니다.
//!
//! ```rust,ignore
//! web::scope("/auth")
//!     .service(
//!         web::scope("")
//!             .wrap(AuthMiddleware::new(state.tokens.clone(), state.users.clone()))
//!             .service(get_current_user)
//!     )
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;

pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
            users: self.users.clone(),
        }))
    }
}
