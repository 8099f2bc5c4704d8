//! Authentication HTTP Handlers
//!
//! 로그인, 회원가입, Facebook 토큰 인증, 현재 사용자 조회 엔드포인트입니다.
//! 모든 실패는 `AppError`로 반환되며 상태 코드는
//! [`ErrorResolution`](crate::middlewares::ErrorResolution) 미들웨어가 결정합니다.
//!
//! - `POST /api/v1/auth/login`
//! - `POST /api/v1/auth/signup`
//! - `GET  /api/v1/auth/facebook?access_token=...`
//! - `GET  /api/v1/auth/me` (Bearer 토큰 필요)
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::errors::{AppError, AppResult, FailureCode};
use crate::core::state::AppState;
use crate::domain::dto::users::request::{FacebookTokenQuery, LocalLoginRequest, SignupRequest};
use crate::domain::dto::users::response::{AuthResponse, CurrentUserResponse, UserProfile};
use crate::domain::models::auth::{AuthOutcome, AuthenticatedUser};
use crate::services::auth::AuthStrategy;
use crate::utils::string_utils::format_validation_errors;

fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::invalid_params(format_validation_errors(&e)))
}

/// 프로필에 대한 토큰을 발급하고 성공 응답을 만듭니다.
fn issue_token(state: &AppState, profile: UserProfile, message: &str) -> AppResult<HttpResponse> {
    let jwt = state.tokens.sign(&profile.id)?;
    log::debug!("JWT 발급: user={} ({}초)", profile.id, state.tokens.expires_in());

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: profile,
        jwt,
        message: message.to_string(),
    }))
}

fn outcome_to_response(state: &AppState, outcome: AuthOutcome) -> AppResult<HttpResponse> {
    if outcome.profile().is_none() {
        log::debug!("토큰 발급 대상이 아닌 인증 결과: {:?}", outcome);
    }

    match outcome {
        AuthOutcome::Authenticated(profile) => issue_token(state, profile, "Login successful"),
        AuthOutcome::Created(profile) => issue_token(state, profile, "Account created"),
        AuthOutcome::Linked(profile) => issue_token(state, profile, "Account linked"),
        AuthOutcome::AlreadyExists(profile) => Err(AppError::failure(
            FailureCode::UserAlreadyExists,
            format!("user {} already exists", profile.email.unwrap_or(profile.id)),
        )),
        AuthOutcome::Rejected(reason) => Err(AppError::auth_failed(reason.to_string())),
    }
}

#[post("/login")]
pub async fn local_login(
    state: web::Data<AppState>,
    payload: web::Json<LocalLoginRequest>,
) -> AppResult<HttpResponse> {
    validate(&*payload)?;

    let outcome = state.local_login.authenticate(payload.into_inner()).await?;
    if let AuthOutcome::Rejected(reason) = &outcome {
        log::info!("로컬 로그인 거부: {}", reason);
    }

    outcome_to_response(&state, outcome)
}

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    validate(&*payload)?;

    let outcome = state.local_register.authenticate(payload.into_inner()).await?;
    outcome_to_response(&state, outcome)
}

/// 액세스 토큰은 `access_token` 쿼리 파라미터 또는 같은 이름의 헤더로 받습니다.
#[get("/facebook")]
pub async fn facebook_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: Option<web::Query<FacebookTokenQuery>>,
) -> AppResult<HttpResponse> {
    let credentials = match query {
        Some(query) => query.into_inner(),
        None => {
            let access_token = req
                .headers()
                .get("access_token")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| AppError::invalid_params("access_token이 필요합니다"))?;
            FacebookTokenQuery { access_token: access_token.to_string() }
        }
    };
    validate(&credentials)?;

    let outcome = state.facebook.authenticate(credentials).await?;
    outcome_to_response(&state, outcome)
}

/// 인증 미들웨어가 부착한 사용자를 반환합니다.
///
/// 리소스 단위로 [`AuthMiddleware`](crate::middlewares::AuthMiddleware)를 감싸기 위해
/// 라우트 매크로 없이 등록합니다.
pub async fn get_current_user(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(CurrentUserResponse { user: user.profile })
}
