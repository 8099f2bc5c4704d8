//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;
use std::time::Duration;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` (없으면 `NODE_ENV`) 환경 변수에서 현재 환경을 결정합니다.
    ///
    /// 값이 없거나 알 수 없는 값이면 가장 보수적인 `Production`으로 간주합니다.
    pub fn current() -> Self {
        let value = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()));
        Self::from_str(&value)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 에러 응답에 디버그 정보를 포함할지 여부
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt 해싱 비용
    ///
    /// `BCRYPT_COST`가 4-15 범위의 값이면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// MongoDB 연결 설정
///
/// `MONGODB_URI`가 지정되면 그대로 사용하고, 그렇지 않으면 개별 환경 변수로부터
/// 연결 문자열을 조합합니다.
///
/// ```bash
/// export MONGODB_HOST="localhost"
/// export MONGODB_PORT="27017"
/// export MONGODB_USERNAME="app"        # 선택
/// export MONGODB_PASSWORD="secret"     # 선택 (USERNAME과 함께)
/// export MONGODB_REPLICA_SET="rs0"     # 선택
/// export DATABASE_NAME="auth_gateway_dev"
/// ```
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "auth_gateway_dev".to_string())
    }

    pub fn connection_uri() -> Result<String, String> {
        if let Ok(uri) = env::var("MONGODB_URI") {
            return Ok(uri);
        }

        let host = env::var("MONGODB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("MONGODB_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(27017);

        Self::compose_uri(
            &host,
            port,
            env::var("MONGODB_USERNAME").ok().as_deref(),
            env::var("MONGODB_PASSWORD").ok().as_deref(),
            env::var("MONGODB_REPLICA_SET").ok().as_deref(),
            &Self::database_name(),
        )
    }

    /// 개별 설정값으로 MongoDB 연결 문자열을 조합합니다.
    ///
    /// 사용자명과 비밀번호는 둘 다 있거나 둘 다 없어야 합니다.
    pub fn compose_uri(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        replica_set: Option<&str>,
        database: &str,
    ) -> Result<String, String> {
        let base = match (username, password) {
            (Some(user), Some(pass)) => format!("mongodb://{}:{}@{}:{}/{}", user, pass, host, port, database),
            (None, None) => format!("mongodb://{}:{}/{}", host, port, database),
            _ => return Err("MONGODB_USERNAME과 MONGODB_PASSWORD는 함께 설정되어야 합니다".to_string()),
        };

        let mut params = Vec::new();
        if let Some(replica_set) = replica_set {
            params.push(format!("replicaSet={}", replica_set));
        }
        if username.is_some() {
            params.push("authSource=admin".to_string());
            params.push("authMechanism=SCRAM-SHA-256".to_string());
        }

        if params.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{}?{}", base, params.join("&")))
        }
    }
}

pub struct RegistrationConfig;

impl RegistrationConfig {
    /// 등록 작업 완료를 기다리는 최대 시간
    pub fn timeout() -> Duration {
        let secs = env::var("REGISTRATION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(10);
        Duration::from_secs(secs)
    }
}

pub struct ErrorCatalogConfig;

impl ErrorCatalogConfig {
    /// 시작 시 기본 에러 설명을 저장소에 채워 넣을지 여부
    pub fn seed_defaults() -> bool {
        env::var("SEED_ERROR_DESCRIPTIONS")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}
