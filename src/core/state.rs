//! 애플리케이션 상태 (컴포지션 루트)
//!
//! `main`에서 한 번 조립되어 `web::Data<AppState>`로 모든 워커에 공유됩니다.
//! 미들웨어는 필요한 의존성을 생성자로 전달받습니다.

use std::sync::Arc;

use crate::repositories::users::UserStore;
use crate::services::auth::{
    FacebookTokenStrategy, LocalLoginStrategy, LocalRegisterStrategy, OAuthProfileProvider,
    PasswordHasher, TokenService,
};
use crate::services::errors::ErrorResolver;
use crate::services::registration::RegistrationQueue;

pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
    pub resolver: Arc<ErrorResolver>,
    pub local_login: LocalLoginStrategy,
    pub local_register: LocalRegisterStrategy,
    pub facebook: FacebookTokenStrategy,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn UserStore>,
        resolver: Arc<ErrorResolver>,
        hasher: PasswordHasher,
        queue: RegistrationQueue,
        oauth_provider: Arc<dyn OAuthProfileProvider>,
    ) -> Self {
        Self {
            local_login: LocalLoginStrategy::new(users.clone(), hasher),
            local_register: LocalRegisterStrategy::new(users.clone(), hasher, queue),
            facebook: FacebookTokenStrategy::new(users.clone(), oauth_provider),
            tokens,
            users,
            resolver,
        }
    }
}
