//! # 신원 검증 전략
//!
//! 라우트마다 하나의 전략이 선택됩니다.
//!
//! | 라우트 | 전략 | 자격증명 |
//! |--------|------|----------|
//! | `POST /login` | [`LocalLoginStrategy`] | 이메일 + 비밀번호 |
//! | `POST /signup` | [`LocalRegisterStrategy`] | 이메일 + 비밀번호 (+ 이름, 사용자명) |
//! | `GET /facebook` | [`FacebookTokenStrategy`] | Facebook 액세스 토큰 |
//!
//! 전략은 예상 가능한 결과(거부, 이미 존재)를 [`AuthOutcome`]으로 반환하고,
//! 저장소나 외부 서비스 장애만 `AppError`로 전파합니다.

use std::sync::Arc;
use async_trait::async_trait;
use log::{debug, info};

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::{FacebookTokenQuery, LocalLoginRequest, SignupRequest};
use crate::domain::dto::users::response::UserProfile;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::{AuthOutcome, RejectReason};
use crate::repositories::users::{UserCriteria, UserPatch, UserStore};
use crate::services::auth::facebook_auth_service::OAuthProfileProvider;
use crate::services::auth::password::PasswordHasher;
use crate::services::registration::RegistrationQueue;
use crate::utils::string_utils::{clean_optional_string, email_local_part, normalize_email, slugify_username};

const MAX_USERNAME_ATTEMPTS: u32 = 1000;

#[async_trait]
pub trait AuthStrategy: Send + Sync {
    type Credentials: Send + 'static;

    async fn authenticate(&self, credentials: Self::Credentials) -> AppResult<AuthOutcome>;
}

/// 사용 중이지 않은 사용자명을 찾습니다.
///
/// `base`를 정리한 값을 먼저 시도하고, 사용 중이면 `_1`, `_2`, ... 를 붙입니다.
pub async fn generate_unique_username(users: &dyn UserStore, base: &str) -> AppResult<String> {
    let base = slugify_username(base);
    let mut candidate = base.clone();
    let mut counter = 1;

    loop {
        if users.find_one(UserCriteria::Username(candidate.clone())).await?.is_none() {
            return Ok(candidate);
        }

        candidate = format!("{}_{}", base, counter);
        counter += 1;

        if counter > MAX_USERNAME_ATTEMPTS {
            return Err(AppError::InternalError(format!("사용자명 생성 실패: {}", base)));
        }
    }
}

fn primary_key(user: &User) -> AppResult<mongodb::bson::oid::ObjectId> {
    user.id
        .ok_or_else(|| AppError::InternalError("저장된 사용자에 _id가 없습니다".to_string()))
}

/// 이메일 + 비밀번호 로그인
pub struct LocalLoginStrategy {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl LocalLoginStrategy {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl AuthStrategy for LocalLoginStrategy {
    type Credentials = LocalLoginRequest;

    async fn authenticate(&self, credentials: LocalLoginRequest) -> AppResult<AuthOutcome> {
        let email = normalize_email(&credentials.email);

        let Some(user) = self.users.find_one(UserCriteria::Email(email)).await? else {
            return Ok(AuthOutcome::Rejected(RejectReason::IncorrectEmail));
        };

        let matched = match &user.password_hash {
            Some(hash) => self.hasher.verify(&credentials.password, hash).await?,
            None => false,
        };

        if !matched {
            let reason = if user.has_third_party_provider() {
                RejectReason::ThirdPartyAccount
            } else {
                RejectReason::InvalidPassword
            };
            return Ok(AuthOutcome::Rejected(reason));
        }

        Ok(AuthOutcome::Authenticated(UserProfile::from(&user)))
    }
}

/// 로컬 회원가입 (동일 이메일 가입은 [`RegistrationQueue`]에서 직렬화)
pub struct LocalRegisterStrategy {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    queue: RegistrationQueue,
}

impl LocalRegisterStrategy {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, queue: RegistrationQueue) -> Self {
        Self { users, hasher, queue }
    }
}

/// 이메일로 찾은 기존 계정에 대한 가입 처리
///
/// 비밀번호 없는 Facebook 계정이면 해시된 비밀번호를 추가해 연결하고,
/// 그 외에는 `AlreadyExists`로 응답합니다.
async fn register_against_existing(
    users: &dyn UserStore,
    existing: User,
    password_hash: String,
    requested_username: Option<String>,
) -> AppResult<AuthOutcome> {
    if !existing.is_linkable_by_password() {
        return Ok(AuthOutcome::AlreadyExists(UserProfile::from(&existing)));
    }

    let id = primary_key(&existing)?;
    let username = match requested_username {
        Some(requested) if slugify_username(&requested) != existing.username => {
            Some(generate_unique_username(users, &requested).await?)
        }
        _ => None,
    };

    let patch = UserPatch {
        username,
        password_hash: Some(password_hash),
        ..Default::default()
    };

    let linked = users
        .find_one_and_update(UserCriteria::Id(id), patch)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("연결 대상 사용자가 사라졌습니다: {}", id)))?;

    info!("기존 Facebook 계정에 비밀번호 연결: id={}", id);
    Ok(AuthOutcome::Linked(UserProfile::from(&linked)))
}

#[async_trait]
impl AuthStrategy for LocalRegisterStrategy {
    type Credentials = SignupRequest;

    async fn authenticate(&self, credentials: SignupRequest) -> AppResult<AuthOutcome> {
        let email = normalize_email(&credentials.email);
        let requested_username = clean_optional_string(credentials.username);
        let full_name = clean_optional_string(credentials.full_name);
        let password = credentials.password;

        if let Some(existing) = self.users.find_one(UserCriteria::Email(email.clone())).await? {
            if !existing.is_linkable_by_password() {
                return Ok(AuthOutcome::AlreadyExists(UserProfile::from(&existing)));
            }
            let password_hash = self.hasher.hash(&password).await?;
            return register_against_existing(
                self.users.as_ref(), existing, password_hash, requested_username,
            ).await;
        }

        // 해시는 워커 밖에서 계산하고, 워커는 확인 후 생성만 수행합니다
        let password_hash = self.hasher.hash(&password).await?;
        let users = self.users.clone();

        let ticket = self.queue.submit(move || async move {
            // 큐에 들어온 사이 같은 이메일이 먼저 처리되었을 수 있습니다
            if let Some(existing) = users.find_one(UserCriteria::Email(email.clone())).await? {
                return register_against_existing(
                    users.as_ref(), existing, password_hash, requested_username,
                ).await;
            }

            let base = requested_username.unwrap_or_else(|| email_local_part(&email).to_string());
            let username = generate_unique_username(users.as_ref(), &base).await?;

            let created = users
                .create(User::new_local(email, username, full_name, password_hash))
                .await?;

            info!("로컬 사용자 생성: id={}", created.id_string().unwrap_or_default());
            Ok(AuthOutcome::Created(UserProfile::from(&created)))
        })?;

        ticket.wait().await
    }
}

/// Facebook 액세스 토큰 로그인/가입
pub struct FacebookTokenStrategy {
    users: Arc<dyn UserStore>,
    provider: Arc<dyn OAuthProfileProvider>,
}

impl FacebookTokenStrategy {
    pub fn new(users: Arc<dyn UserStore>, provider: Arc<dyn OAuthProfileProvider>) -> Self {
        Self { users, provider }
    }
}

#[async_trait]
impl AuthStrategy for FacebookTokenStrategy {
    type Credentials = FacebookTokenQuery;

    async fn authenticate(&self, credentials: FacebookTokenQuery) -> AppResult<AuthOutcome> {
        let profile = self.provider.fetch_profile(&credentials.access_token).await?;

        if let Some(user) = self.users.find_one(UserCriteria::FacebookId(profile.id.clone())).await? {
            debug!("Facebook 로그인: id={}", user.id_string().unwrap_or_default());
            return Ok(AuthOutcome::Authenticated(UserProfile::from(&user)));
        }

        let email = profile.email.as_deref().map(normalize_email);

        if let Some(email) = &email {
            if let Some(existing) = self.users.find_one(UserCriteria::Email(email.clone())).await? {
                if existing.facebook_id.is_some() {
                    info!(
                        "이메일이 다른 Facebook 계정에 이미 연결됨: id={}",
                        existing.id_string().unwrap_or_default()
                    );
                    return Ok(AuthOutcome::AlreadyExists(UserProfile::from(&existing)));
                }

                let id = primary_key(&existing)?;
                let patch = UserPatch {
                    facebook_id: Some(profile.id.clone()),
                    full_name: existing.full_name.is_none().then(|| profile.display_name()).flatten(),
                    ..Default::default()
                };

                let linked = self.users
                    .find_one_and_update(UserCriteria::Id(id), patch)
                    .await?
                    .ok_or_else(|| AppError::InternalError(format!("연결 대상 사용자가 사라졌습니다: {}", id)))?;

                info!("기존 계정에 Facebook 연결: id={}", id);
                return Ok(AuthOutcome::Linked(UserProfile::from(&linked)));
            }
        }

        let username = generate_unique_username(self.users.as_ref(), &profile.username_seed()).await?;
        let created = self.users
            .create(User::new_facebook(profile.id.clone(), email, username, profile.display_name()))
            .await?;

        info!("Facebook 사용자 생성: id={}", created.id_string().unwrap_or_default());
        Ok(AuthOutcome::Created(UserProfile::from(&created)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use futures_util::future::join_all;
    use crate::domain::models::oauth::FacebookProfile;
    use crate::repositories::users::InMemoryUserRepository;
    use crate::services::auth::facebook_auth_service::StubProfileProvider;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    fn signup(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: Some("Test User".to_string()),
            username: None,
        }
    }

    fn login(email: &str, password: &str) -> LocalLoginRequest {
        LocalLoginRequest { email: email.to_string(), password: password.to_string() }
    }

    fn facebook_profile(id: &str, email: Option<&str>) -> FacebookProfile {
        FacebookProfile {
            id: id.to_string(),
            email: email.map(str::to_string),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            name: Some("Jane Doe".into()),
        }
    }

    fn register_strategy(users: Arc<InMemoryUserRepository>) -> LocalRegisterStrategy {
        LocalRegisterStrategy::new(users, hasher(), RegistrationQueue::start(Duration::from_secs(10)))
    }

    #[actix_web::test]
    async fn test_signup_then_login() {
        let users = Arc::new(InMemoryUserRepository::new());
        let register = register_strategy(users.clone());
        let login_strategy = LocalLoginStrategy::new(users.clone(), hasher());

        let created = register.authenticate(signup("a@example.com", "1234")).await.unwrap();
        let AuthOutcome::Created(profile) = created else { panic!("expected Created, got {:?}", created) };
        assert_eq!(profile.full_name.as_deref(), Some("Test User"));

        let outcome = login_strategy.authenticate(login("a@example.com", "1234")).await.unwrap();
        assert_eq!(outcome, AuthOutcome::Authenticated(profile));
    }

    #[actix_web::test]
    async fn test_login_rejections() {
        let users = Arc::new(InMemoryUserRepository::new());
        register_strategy(users.clone())
            .authenticate(signup("a@example.com", "1234"))
            .await
            .unwrap();
        let strategy = LocalLoginStrategy::new(users.clone(), hasher());

        assert_eq!(
            strategy.authenticate(login("nobody@example.com", "1234")).await.unwrap(),
            AuthOutcome::Rejected(RejectReason::IncorrectEmail)
        );
        assert_eq!(
            strategy.authenticate(login("a@example.com", "wrong")).await.unwrap(),
            AuthOutcome::Rejected(RejectReason::InvalidPassword)
        );
    }

    #[actix_web::test]
    async fn test_login_on_facebook_only_account_hints_third_party() {
        let users = Arc::new(InMemoryUserRepository::new());
        users
            .create(User::new_facebook("fb-1".into(), Some("jane@example.com".into()), "jane".into(), None))
            .await
            .unwrap();
        let strategy = LocalLoginStrategy::new(users.clone(), hasher());

        assert_eq!(
            strategy.authenticate(login("jane@example.com", "whatever")).await.unwrap(),
            AuthOutcome::Rejected(RejectReason::ThirdPartyAccount)
        );
    }

    #[actix_web::test]
    async fn test_second_signup_reports_already_exists() {
        let users = Arc::new(InMemoryUserRepository::new());
        let register = register_strategy(users.clone());

        register.authenticate(signup("a@example.com", "1234")).await.unwrap();
        let second = register.authenticate(signup("A@Example.com", "5678")).await.unwrap();

        assert!(matches!(second, AuthOutcome::AlreadyExists(_)));
        assert_eq!(users.snapshot().len(), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_signups_create_exactly_one_identity() {
        let users = Arc::new(InMemoryUserRepository::new());
        let register = Arc::new(register_strategy(users.clone()));

        let attempts = (0..10).map(|_| {
            let register = register.clone();
            async move { register.authenticate(signup("race@example.com", "1234")).await }
        });
        let outcomes: Vec<_> = join_all(attempts).await.into_iter().map(|r| r.unwrap()).collect();

        let created = outcomes.iter().filter(|o| matches!(o, AuthOutcome::Created(_))).count();
        let existing = outcomes.iter().filter(|o| matches!(o, AuthOutcome::AlreadyExists(_))).count();
        assert_eq!(created, 1);
        assert_eq!(existing, 9);

        let stored: Vec<_> = users
            .snapshot()
            .into_iter()
            .filter(|u| u.email.as_deref() == Some("race@example.com"))
            .collect();
        assert_eq!(stored.len(), 1);
    }

    #[actix_web::test]
    async fn test_password_hashing_does_not_count_against_queue_timeout() {
        let users = Arc::new(InMemoryUserRepository::new());
        let register = LocalRegisterStrategy::new(
            users.clone(),
            PasswordHasher::new(10),
            RegistrationQueue::start(Duration::from_millis(20)),
        );

        let outcome = register.authenticate(signup("slow@example.com", "1234")).await.unwrap();

        assert!(matches!(outcome, AuthOutcome::Created(_)), "got {:?}", outcome);
    }

    #[actix_web::test]
    async fn test_username_derived_from_email_and_deduplicated() {
        let users = Arc::new(InMemoryUserRepository::new());
        let register = register_strategy(users.clone());

        register.authenticate(signup("jane@example.com", "1234")).await.unwrap();
        register.authenticate(signup("jane@other.org", "1234")).await.unwrap();

        let mut usernames: Vec<_> = users.snapshot().into_iter().map(|u| u.username).collect();
        usernames.sort();
        assert_eq!(usernames, vec!["jane".to_string(), "jane_1".to_string()]);
    }

    #[actix_web::test]
    async fn test_signup_links_password_to_facebook_account() {
        let users = Arc::new(InMemoryUserRepository::new());
        let fb_user = users
            .create(User::new_facebook("fb-1".into(), Some("jane@example.com".into()), "jane_doe".into(), None))
            .await
            .unwrap();
        let register = register_strategy(users.clone());

        let mut request = signup("jane@example.com", "1234");
        request.username = Some("janed".into());
        let outcome = register.authenticate(request).await.unwrap();

        let AuthOutcome::Linked(profile) = outcome else { panic!("expected Linked, got {:?}", outcome) };
        assert_eq!(profile.id, fb_user.id_string().unwrap());

        let stored = users.find_by_id(&profile.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "janed");
        assert_eq!(stored.facebook_id.as_deref(), Some("fb-1"));

        let login_outcome = LocalLoginStrategy::new(users.clone(), hasher())
            .authenticate(login("jane@example.com", "1234"))
            .await
            .unwrap();
        assert!(matches!(login_outcome, AuthOutcome::Authenticated(_)));
    }

    #[actix_web::test]
    async fn test_facebook_creates_then_logs_in() {
        let users = Arc::new(InMemoryUserRepository::new());
        let provider = Arc::new(StubProfileProvider::new(vec![
            ("token-1", facebook_profile("fb-1", Some("jane@example.com"))),
        ]));
        let strategy = FacebookTokenStrategy::new(users.clone(), provider);
        let query = || FacebookTokenQuery { access_token: "token-1".into() };

        let first = strategy.authenticate(query()).await.unwrap();
        let AuthOutcome::Created(created) = first else { panic!("expected Created, got {:?}", first) };
        assert_eq!(created.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(users.snapshot()[0].username, "jane_doe");

        let second = strategy.authenticate(query()).await.unwrap();
        assert_eq!(second, AuthOutcome::Authenticated(created));
    }

    #[actix_web::test]
    async fn test_facebook_links_existing_local_account_by_email() {
        let users = Arc::new(InMemoryUserRepository::new());
        let register = register_strategy(users.clone());
        let AuthOutcome::Created(local) = register
            .authenticate(signup("jane@example.com", "1234"))
            .await
            .unwrap() else { panic!("expected Created") };

        let provider = Arc::new(StubProfileProvider::new(vec![
            ("token-1", facebook_profile("fb-1", Some("jane@example.com"))),
        ]));
        let outcome = FacebookTokenStrategy::new(users.clone(), provider)
            .authenticate(FacebookTokenQuery { access_token: "token-1".into() })
            .await
            .unwrap();

        let AuthOutcome::Linked(linked) = outcome else { panic!("expected Linked, got {:?}", outcome) };
        assert_eq!(linked.id, local.id);

        let stored = users.find_by_id(&local.id).await.unwrap().unwrap();
        assert_eq!(stored.facebook_id.as_deref(), Some("fb-1"));
        assert!(stored.password_hash.is_some());
        assert_eq!(users.snapshot().len(), 1);
    }

    #[actix_web::test]
    async fn test_facebook_does_not_replace_another_facebook_link() {
        let users = Arc::new(InMemoryUserRepository::new());
        users
            .create(User::new_facebook(
                "fb-A".into(),
                Some("jane@example.com".into()),
                "jane".into(),
                Some("Jane Doe".into()),
            ))
            .await
            .unwrap();

        let provider = Arc::new(StubProfileProvider::new(vec![
            ("token-b", facebook_profile("fb-B", Some("jane@example.com"))),
        ]));
        let outcome = FacebookTokenStrategy::new(users.clone(), provider)
            .authenticate(FacebookTokenQuery { access_token: "token-b".into() })
            .await
            .unwrap();

        assert!(matches!(outcome, AuthOutcome::AlreadyExists(_)), "got {:?}", outcome);

        let stored = users.find_one(UserCriteria::FacebookId("fb-A".into())).await.unwrap();
        assert!(stored.is_some());
        assert!(users.find_one(UserCriteria::FacebookId("fb-B".into())).await.unwrap().is_none());
        assert_eq!(users.snapshot().len(), 1);
    }

    #[actix_web::test]
    async fn test_facebook_without_email_creates_account() {
        let users = Arc::new(InMemoryUserRepository::new());
        let provider = Arc::new(StubProfileProvider::new(vec![("token-1", facebook_profile("fb-9", None))]));

        let outcome = FacebookTokenStrategy::new(users.clone(), provider)
            .authenticate(FacebookTokenQuery { access_token: "token-1".into() })
            .await
            .unwrap();

        let AuthOutcome::Created(profile) = outcome else { panic!("expected Created, got {:?}", outcome) };
        assert!(profile.email.is_none());
    }

    #[actix_web::test]
    async fn test_facebook_rejected_token_is_auth_failed() {
        let users = Arc::new(InMemoryUserRepository::new());
        let provider = Arc::new(StubProfileProvider::new(vec![]));

        let err = FacebookTokenStrategy::new(users, provider)
            .authenticate(FacebookTokenQuery { access_token: "bogus".into() })
            .await
            .unwrap_err();

        assert_eq!(err.failure_code(), crate::core::errors::FailureCode::AuthFailed);
    }
}
