//! # 문자열 유틸리티
//!
//! 입력 정리와 사용자명 생성에 쓰이는 공통 함수들입니다.

use validator::ValidationErrors;

/// 선택적 문자열 필드 정리
///
/// 값이 없거나 공백뿐이면 `None`, 아니면 앞뒤 공백을 제거한 값을 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    })
}

/// 이메일 정규화 (공백 제거 + 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 이메일의 `@` 앞부분
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// 사용자명 후보 생성
///
/// 소문자로 바꾸고 공백은 `_`로, 영숫자/`_`/`.`/`-` 이외의 문자는 제거합니다.
/// 결과가 비면 `user`를 사용합니다.
pub fn slugify_username(base: &str) -> String {
    let slug: String = base
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_alphanumeric() || matches!(c, '_' | '.' | '-') => Some(c),
            _ => None,
        })
        .collect();

    if slug.is_empty() { "user".to_string() } else { slug }
}

/// validator 에러를 `field: message` 목록 문자열로 변환
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_slugify_username() {
        assert_eq!(slugify_username("Jane Doe"), "jane_doe");
        assert_eq!(slugify_username("j.doe+spam"), "j.doespam");
        assert_eq!(slugify_username("!!!"), "user");
    }

    #[test]
    fn test_email_helpers() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
        assert_eq!(email_local_part("jane@example.com"), "jane");
    }
}
