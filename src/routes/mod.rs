//! 라우트 구성
//!
//! ```text
//! /api/v1
//! ├── GET  /health
//! └── /auth
//!     ├── POST /login
//!     ├── POST /signup
//!     ├── GET  /facebook
//!     └── GET  /me        ← AuthMiddleware
//! ```

use actix_web::web;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig, state: &web::Data<AppState>) {
    cfg.app_data(state.clone())
        .app_data(json_config())
        .app_data(query_config());

    cfg.service(
        web::scope("/api/v1")
            .service(handlers::health::health_check)
            .service(auth_scope(state)),
    );
}

fn auth_scope(state: &web::Data<AppState>) -> actix_web::Scope {
    web::scope("/auth")
        .service(handlers::auth::local_login)
        .service(handlers::auth::signup)
        .service(handlers::auth::facebook_token)
        .service(
            web::resource("/me")
                .wrap(AuthMiddleware::new(state.tokens.clone(), state.users.clone()))
                .route(web::get().to(handlers::auth::get_current_user)),
        )
}

/// 잘못된 JSON 본문은 `ERR_INVALID_PARMS`로 처리
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::invalid_params(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::invalid_params(err.to_string()).into())
}
