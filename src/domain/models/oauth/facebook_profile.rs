//! # Facebook Graph API 사용자 정보 모델
//!
//! `GET {graph_url}/me?fields=id,email,first_name,last_name,name` 응답을 매핑합니다.
//! 사용자가 이메일 제공을 거부한 경우 `email`은 없을 수 있습니다.

use serde::Deserialize;

/// Facebook 사용자 프로필
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FacebookProfile {
    /// Facebook 앱 범위 사용자 ID
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl FacebookProfile {
    /// 표시 이름을 결정합니다.
    ///
    /// `name`이 없으면 `first_name`과 `last_name`을 조합합니다.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_ref().filter(|n| !n.trim().is_empty()) {
            return Some(name.trim().to_string());
        }

        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() { None } else { Some(joined) }
    }

    /// 사용자명 생성의 기초가 되는 문자열
    ///
    /// 표시 이름, 이메일 앞부분, `fb_{id}` 순으로 사용합니다.
    pub fn username_seed(&self) -> String {
        self.display_name()
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|e| e.split('@').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("fb_{}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_graph_response_without_email() {
        let profile: FacebookProfile = serde_json::from_str(
            r#"{"id":"1234","first_name":"Jane","last_name":"Doe","name":"Jane Doe"}"#,
        ).unwrap();

        assert_eq!(profile.id, "1234");
        assert!(profile.email.is_none());
        assert_eq!(profile.display_name().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_display_name_falls_back_to_first_and_last() {
        let profile = FacebookProfile {
            id: "1".into(),
            email: None,
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            name: None,
        };
        assert_eq!(profile.display_name().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_username_seed_fallbacks() {
        let mut profile = FacebookProfile {
            id: "42".into(),
            email: Some("jane@example.com".into()),
            first_name: None,
            last_name: None,
            name: None,
        };
        assert_eq!(profile.username_seed(), "jane");

        profile.email = None;
        assert_eq!(profile.username_seed(), "fb_42");
    }
}
