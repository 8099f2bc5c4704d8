use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderValue, AUTHORIZATION};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::response::UserProfile;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::users::UserStore;
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();
        let users = self.users.clone();

        Box::pin(async move {
            let admitted = match bearer_token(req.headers().get(AUTHORIZATION)) {
                Ok(token) => load_identity(token, &tokens, users.as_ref()).await,
                Err(err) => Err(err),
            };

            match admitted {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!("인증 거부 {}: {}", req.path(), err);
                    return Ok(req.error_response(err).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 부분을 꺼냅니다.
fn bearer_token(header: Option<&HeaderValue>) -> AppResult<String> {
    let value = header
        .ok_or_else(|| AppError::invalid_jwt("Authorization 헤더가 없습니다"))?
        .to_str()
        .map_err(|_| AppError::invalid_jwt("Authorization 헤더가 올바른 문자열이 아닙니다"))?;

    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 {
        return Err(AppError::invalid_jwt("Authorization 헤더 형식은 'Bearer <token>'이어야 합니다"));
    }
    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AppError::invalid_jwt(format!("지원하지 않는 인증 스킴: {}", parts[0])));
    }

    Ok(parts[1].to_string())
}

async fn load_identity(token: String, tokens: &TokenService, users: &dyn UserStore) -> AppResult<AuthenticatedUser> {
    let verified = tokens.verify(&token)?;

    let user = users
        .find_by_id(&verified.identity_id)
        .await
        .map_err(|e| AppError::auth_failed(format!("사용자 조회 실패: {}", e)))?
        .ok_or_else(|| AppError::auth_failed(format!("사용자를 찾을 수 없습니다: {}", verified.identity_id)))?;

    Ok(AuthenticatedUser::new(UserProfile::from(&user)))
}
