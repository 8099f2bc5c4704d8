//! # 에러 해석 미들웨어
//!
//! 응답에 `AppError`가 부착되어 있으면 [`ErrorResolver`]로 상태 코드와 본문을
//! 다시 결정합니다. 실패에 대한 HTTP 상태는 이곳에서만 결정됩니다.
//!
//! 앱 수준에서 라우트를 감싸도록 등록하면 핸들러, 추출자,
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware)의 실패를 모두 처리합니다.
//! `Logger`보다 안쪽에 두어야 해석된 상태 코드가 접근 로그에 남습니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpResponse, Result,
};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::services::errors::ErrorResolver;

pub struct ErrorResolution {
    resolver: Arc<ErrorResolver>,
}

impl ErrorResolution {
    pub fn new(resolver: Arc<ErrorResolver>) -> Self {
        Self { resolver }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorResolution
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ErrorResolutionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorResolutionService {
            service: Rc::new(service),
            resolver: self.resolver.clone(),
        }))
    }
}

pub struct ErrorResolutionService<S> {
    service: Rc<S>,
    resolver: Arc<ErrorResolver>,
}

impl<S, B> Service<ServiceRequest> for ErrorResolutionService<S>
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
        let resolver = self.resolver.clone();

        Box::pin(async move {
            let http_req = req.request().clone();

            // 안쪽 미들웨어가 응답 대신 Err를 돌려준 경우도 같은 방식으로 해석합니다
            let (http_req, code, failure_text) = match service.call(req).await {
                Ok(res) => {
                    let failure = res
                        .response()
                        .error()
                        .and_then(|e| e.as_error::<AppError>())
                        .map(|e| (e.failure_code(), e.to_string()));

                    let Some((code, failure_text)) = failure else {
                        return Ok(res.map_into_left_body());
                    };
                    let (req, _) = res.into_parts();
                    (req, code, failure_text)
                }
                Err(err) => {
                    let Some(app_error) = err.as_error::<AppError>() else {
                        return Err(err);
                    };
                    (http_req, app_error.failure_code(), app_error.to_string())
                }
            };

            let resolved = resolver.resolve_code(code, &failure_text).await;
            let status = StatusCode::from_u16(resolved.status).unwrap_or_else(|_| {
                log::error!("잘못된 HTTP 상태 코드 {} ({}), 500으로 대체", resolved.status, resolved.body.code);
                StatusCode::INTERNAL_SERVER_ERROR
            });

            log::debug!("{} → {} {}", code, status.as_u16(), resolved.body.code);

            let response = HttpResponse::build(status).json(resolved.body);
            Ok(ServiceResponse::new(http_req, response).map_into_right_body())
        })
    }
}
