//! Facebook 액세스 토큰 → 사용자 프로필 조회
//!
//! 클라이언트가 Facebook SDK로 얻은 액세스 토큰을 Graph API로 검증하고
//! 사용자 프로필을 가져옵니다.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::config::FacebookConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::FacebookProfile;

/// 외부 프로바이더 액세스 토큰으로 프로필을 조회하는 계약
///
/// 토큰이 거부되면 `ERR_AUTH_FAILED` 실패를, 프로바이더와 통신할 수 없으면
/// `ExternalServiceError`를 반환합니다.
#[async_trait]
pub trait OAuthProfileProvider: Send + Sync {
    async fn fetch_profile(&self, access_token: &str) -> AppResult<FacebookProfile>;
}

const PROFILE_FIELDS: &str = "id,email,first_name,last_name,name";

pub struct FacebookGraphClient {
    client: reqwest::Client,
    graph_url: String,
    /// 설정되면 토큰이 이 앱에 발급된 것인지 `debug_token`으로 확인합니다.
    app_credentials: Option<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct DebugTokenResponse {
    data: DebugTokenData,
}

#[derive(Debug, Deserialize)]
struct DebugTokenData {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    is_valid: bool,
}

impl FacebookGraphClient {
    pub fn new(graph_url: impl Into<String>, app_credentials: Option<(String, String)>) -> Self {
        Self {
            client: reqwest::Client::new(),
            graph_url: graph_url.into().trim_end_matches('/').to_string(),
            app_credentials,
        }
    }

    pub fn from_config() -> Self {
        let app_id = FacebookConfig::app_id();
        let app_secret = FacebookConfig::app_secret();
        let credentials = if app_id.is_empty() || app_secret.is_empty() {
            warn!("FACEBOOK_APP_ID/FACEBOOK_APP_SECRET 미설정: 토큰 발급 앱 확인을 건너뜁니다");
            None
        } else {
            Some((app_id, app_secret))
        };

        Self::new(FacebookConfig::graph_url(), credentials)
    }

    async fn ensure_issued_for_app(&self, access_token: &str, app_id: &str, app_secret: &str) -> AppResult<()> {
        let app_token = format!("{}|{}", app_id, app_secret);

        let response = self.client
            .get(format!("{}/debug_token", self.graph_url))
            .query(&[("input_token", access_token), ("access_token", app_token.as_str())])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 확인 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::auth_failed(format!("Facebook 토큰 확인 실패: {}", error_text)));
        }

        let debug_token = response
            .json::<DebugTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 확인 응답 파싱 실패: {}", e)))?;

        if !debug_token.data.is_valid || debug_token.data.app_id.as_deref() != Some(app_id) {
            return Err(AppError::auth_failed("Facebook 토큰이 이 앱에 발급되지 않았습니다"));
        }

        Ok(())
    }
}

#[async_trait]
impl OAuthProfileProvider for FacebookGraphClient {
    async fn fetch_profile(&self, access_token: &str) -> AppResult<FacebookProfile> {
        if let Some((app_id, app_secret)) = &self.app_credentials {
            self.ensure_issued_for_app(access_token, app_id, app_secret).await?;
        }

        let response = self.client
            .get(format!("{}/me", self.graph_url))
            .query(&[("fields", PROFILE_FIELDS), ("access_token", access_token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 사용자 정보 요청 실패: {}", e)))?;

        let status = response.status();
        if status.is_client_error() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::auth_failed(format!("Facebook 토큰 거부: {}", error_text)));
        }
        if !status.is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Facebook 사용자 정보 조회 실패: HTTP {}", status
            )));
        }

        let profile = response
            .json::<FacebookProfile>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 사용자 정보 파싱 실패: {}", e)))?;

        debug!("Facebook 프로필 조회 성공: id={}", profile.id);
        Ok(profile)
    }
}

/// 고정된 토큰 → 프로필 대응을 돌려주는 테스트용 프로바이더
#[cfg(test)]
pub(crate) struct StubProfileProvider {
    profiles: std::collections::HashMap<String, FacebookProfile>,
}

#[cfg(test)]
impl StubProfileProvider {
    pub(crate) fn new(entries: Vec<(&str, FacebookProfile)>) -> Self {
        Self {
            profiles: entries.into_iter().map(|(t, p)| (t.to_string(), p)).collect(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl OAuthProfileProvider for StubProfileProvider {
    async fn fetch_profile(&self, access_token: &str) -> AppResult<FacebookProfile> {
        self.profiles
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::auth_failed("Facebook 토큰 거부"))
    }
}
