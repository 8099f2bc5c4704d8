//! 인증 요청관련 DTO
//!
//! 인증을 요청하는 사용자들의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 로컬 회원가입 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 4, message = "비밀번호는 최소 4자 이상이어야 합니다"))]
    pub password: String,

    #[serde(rename = "fullName", default)]
    #[validate(length(max = 100, message = "이름은 100자 이하여야 합니다"))]
    pub full_name: Option<String>,

    /// 지정하지 않으면 이메일 앞부분으로부터 유일한 사용자명을 생성합니다
    #[serde(default)]
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    pub username: Option<String>,
}

/// Facebook 액세스 토큰 쿼리 파라미터 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FacebookTokenQuery {
    #[validate(length(min = 1, message = "Facebook access_token이 필요합니다"))]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_valid_email() {
        let request = LocalLoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_request_accepts_camel_case_full_name() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"email":"a@example.com","password":"1234","fullName":"Test User"}"#,
        ).unwrap();

        assert_eq!(request.full_name.as_deref(), Some("Test User"));
        assert!(request.username.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_signup_request_rejects_short_username() {
        let request = SignupRequest {
            email: "a@example.com".to_string(),
            password: "1234".to_string(),
            full_name: None,
            username: Some("ab".to_string()),
        };
        assert!(request.validate().is_err());
    }
}
