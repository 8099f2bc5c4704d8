//! # 에러 해석기
//!
//! 실패 코드를 에러 설명 저장소에서 찾아 HTTP 상태와 응답 본문을 결정합니다.
//!
//! | 상황 | 상태 | 본문 |
//! |------|------|------|
//! | 저장된 코드 | 저장된 상태 | `{code, description}` (+ 개발 모드에서 `debug`) |
//! | 저장되지 않은 코드 / 조회 실패 | 500 | `ERR_CODE_NOT_PERSISTED_TO_DATABASE` + `debug` |
//! | 저장되지 않은 `ERR_UNKNOWN` | 500 | `ERR_UNKNOWN` (`debug` 없음) |

use std::sync::Arc;
use log::{error, warn};

use crate::core::errors::{AppError, FailureCode};
use crate::domain::dto::errors::{ErrorBody, ErrorResponse};
use crate::repositories::errors::ErrorDescriptionStore;

const NOT_PERSISTED_DESCRIPTION: &str = "Error code not found in the database";
const UNKNOWN_DESCRIPTION: &str = "Unexpected internal error";

pub struct ErrorResolver {
    store: Arc<dyn ErrorDescriptionStore>,
    include_debug: bool,
}

impl ErrorResolver {
    /// `include_debug`는 개발 모드에서만 `true`로 설정합니다.
    pub fn new(store: Arc<dyn ErrorDescriptionStore>, include_debug: bool) -> Self {
        Self { store, include_debug }
    }

    pub async fn resolve(&self, err: &AppError) -> ErrorResponse {
        self.resolve_code(err.failure_code(), &err.to_string()).await
    }

    /// 코드와 원본 실패 텍스트로 응답을 결정합니다.
    pub async fn resolve_code(&self, code: FailureCode, failure_text: &str) -> ErrorResponse {
        let lookup = match self.store.find_by_code(code.as_str()).await {
            Ok(found) => found,
            Err(e) => {
                error!("에러 설명 조회 실패 ({}): {}", code, e);
                None
            }
        };

        match lookup {
            Some(description) => {
                let debug = (self.include_debug && code != FailureCode::Unknown)
                    .then(|| failure_text.to_string());

                ErrorResponse {
                    status: description.status,
                    body: ErrorBody {
                        code: description.code,
                        description: description.description,
                        debug,
                    },
                }
            }
            None if code == FailureCode::Unknown => {
                error!("처리되지 않은 내부 에러: {}", failure_text);
                ErrorResponse {
                    status: 500,
                    body: ErrorBody {
                        code: FailureCode::Unknown.as_str().to_string(),
                        description: UNKNOWN_DESCRIPTION.to_string(),
                        debug: None,
                    },
                }
            }
            None => {
                warn!("에러 코드가 데이터베이스에 없습니다: {}", code);
                ErrorResponse {
                    status: 500,
                    body: ErrorBody {
                        code: FailureCode::CodeNotPersisted.as_str().to_string(),
                        description: NOT_PERSISTED_DESCRIPTION.to_string(),
                        debug: Some(failure_text.to_string()),
                    },
                }
            }
        }
    }
}
