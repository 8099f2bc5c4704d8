//! 인증 응답 DTO
//!
//! 인증 엔드포인트가 반환하는 사용자 정보는 항상 최소한의 프로젝션
//! (`id`, `email`, `fullName`)으로 제한됩니다.

use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

/// 사용자 최소 프로젝션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile::from(&user)
    }
}

/// 로그인/회원가입/OAuth 성공 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub jwt: String,
    pub message: String,
}

/// 현재 인증된 사용자 조회 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_profile_uses_primary_key_not_username() {
        let mut user = User::new_local("a@example.com".into(), "alice".into(), Some("Alice".into()), "hash".into());
        let id = ObjectId::new();
        user.id = Some(id);

        let profile = UserProfile::from(&user);

        assert_eq!(profile.id, id.to_hex());
        assert_eq!(profile.email.as_deref(), Some("a@example.com"));
        assert_eq!(profile.full_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_profile_serializes_full_name_in_camel_case() {
        let profile = UserProfile {
            id: "abc".to_string(),
            email: None,
            full_name: Some("Alice".to_string()),
        };
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["fullName"], "Alice");
        assert!(json.get("full_name").is_none());
    }
}
