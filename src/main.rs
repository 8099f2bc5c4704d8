use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use auth_gateway_backend::config::{
    ErrorCatalogConfig, Environment, JwtConfig, RegistrationConfig, ServerConfig,
};
use auth_gateway_backend::core::state::AppState;
use auth_gateway_backend::db::Database;
use auth_gateway_backend::domain::entities::errors::error_description::ErrorDescription;
use auth_gateway_backend::middlewares::ErrorResolution;
use auth_gateway_backend::repositories::errors::{ErrorDescriptionStore, MongoErrorDescriptionRepository};
use auth_gateway_backend::repositories::users::MongoUserRepository;
use auth_gateway_backend::routes::configure_all_routes;
use auth_gateway_backend::services::auth::{FacebookGraphClient, PasswordHasher, TokenService};
use auth_gateway_backend::services::errors::ErrorResolver;
use auth_gateway_backend::services::registration::RegistrationQueue;

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 인증 게이트웨이 시작중...");

    let state = build_app_state().await.map_err(|e| {
        error!("애플리케이션 초기화 실패: {}", e);
        io::Error::other(e)
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// 컴포지션 루트: 저장소, 서비스, 회원가입 워커를 조립합니다.
async fn build_app_state() -> Result<web::Data<AppState>, String> {
    let environment = Environment::current();
    info!("실행 환경: {:?}", environment);

    let jwt_settings = JwtConfig::settings()?;
    let tokens = Arc::new(TokenService::new(jwt_settings));

    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await.map_err(|e| e.to_string())?;

    let users = MongoUserRepository::new(&database);
    users.create_indexes().await.map_err(|e| e.to_string())?;

    let error_descriptions = MongoErrorDescriptionRepository::new(&database);
    error_descriptions.create_indexes().await.map_err(|e| e.to_string())?;

    if ErrorCatalogConfig::seed_defaults() {
        let inserted = error_descriptions
            .seed(ErrorDescription::defaults())
            .await
            .map_err(|e| e.to_string())?;
        info!("기본 에러 설명 {}건 추가", inserted);
    }

    let include_debug = environment.is_development();
    if include_debug {
        warn!("개발 모드: 에러 응답에 debug 정보가 포함됩니다");
    }
    let resolver = Arc::new(ErrorResolver::new(Arc::new(error_descriptions), include_debug));

    let queue = RegistrationQueue::start(RegistrationConfig::timeout());

    Ok(web::Data::new(AppState::new(
        tokens,
        Arc::new(users),
        resolver,
        PasswordHasher::from_config(),
        queue,
        Arc::new(FacebookGraphClient::from_config()),
    )))
}

async fn start_http_server(state: web::Data<AppState>) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/api/v1/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();
        let state = state.clone();

        App::new()
            // Rate Limiting (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            // 실패 응답 해석 (Logger 안쪽)
            .wrap(ErrorResolution::new(state.resolver.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| configure_all_routes(cfg, &state))
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => println!(".env.prod 파일 로드 됨"),
            Err(e) => eprintln!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => println!(".env.dev 파일 로드 됨"),
            Err(e) => eprintln!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("access_token"),
        ])
        .supports_credentials()
        .max_age(3600)
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
