//! # 회원가입 직렬화 큐
//!
//! 로컬 회원가입의 "이메일 확인 후 생성" 작업을 하나의 워커에서 순서대로 실행합니다.
//! 같은 이메일로 동시에 들어온 가입 요청은 둘 중 하나만 계정을 생성하게 됩니다.
//!
//! ```text
//! HTTP worker ──submit──▶ [mpsc unbounded, FIFO] ──▶ registration worker (1개)
//!      ▲                                                   │
//!      └─────────── oneshot (RegistrationTicket) ◀─────────┘
//! ```

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::{error, info, warn};
use tokio::sync::{mpsc, oneshot};

use crate::core::errors::{AppError, AppResult};

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// 작업 제출 핸들
///
/// 복제해도 같은 워커를 공유합니다.
#[derive(Clone)]
pub struct RegistrationQueue {
    sender: mpsc::UnboundedSender<Job>,
    timeout: Duration,
}

impl RegistrationQueue {
    /// 현재 tokio 런타임에 워커 하나를 띄우고 핸들을 반환합니다.
    pub fn start(timeout: Duration) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        tokio::spawn(async move {
            info!("회원가입 직렬화 워커 시작");

            while let Some(job) = receiver.recv().await {
                if AssertUnwindSafe(job()).catch_unwind().await.is_err() {
                    error!("회원가입 작업 실행 중 panic 발생, 다음 작업을 계속 처리합니다");
                }
            }

            info!("회원가입 직렬화 워커 종료");
        });

        Self { sender, timeout }
    }

    /// 작업을 큐 끝에 추가합니다.
    ///
    /// 작업의 결과는 반환된 [`RegistrationTicket`]으로 전달됩니다.
    pub fn submit<F, Fut, T>(&self, job: F) -> AppResult<RegistrationTicket<T>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();

        let task: Job = Box::new(move || {
            async move {
                let result = job().await;
                if let Err(e) = &result {
                    warn!("회원가입 작업 실패: {}", e);
                }
                let _ = result_tx.send(result);
            }
            .boxed()
        });

        self.sender
            .send(task)
            .map_err(|_| AppError::InternalError("회원가입 큐가 닫혀 있습니다".to_string()))?;

        Ok(RegistrationTicket {
            receiver: result_rx,
            timeout: self.timeout,
        })
    }
}

/// 제출된 작업 하나의 완료 대기 핸들
pub struct RegistrationTicket<T> {
    receiver: oneshot::Receiver<AppResult<T>>,
    timeout: Duration,
}

impl<T> RegistrationTicket<T> {
    /// 작업 결과를 기다립니다.
    ///
    /// 시간 초과 또는 작업이 결과 없이 종료된 경우(panic) `InternalError`를 반환합니다.
    pub async fn wait(self) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, self.receiver).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(AppError::InternalError(
                "회원가입 작업이 결과 없이 종료되었습니다".to_string(),
            )),
            Err(_) => Err(AppError::InternalError(format!(
                "회원가입 작업이 {:?} 안에 완료되지 않았습니다",
                self.timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[actix_web::test]
    async fn test_jobs_run_in_submission_order() {
        let queue = RegistrationQueue::start(Duration::from_secs(5));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let tickets: Vec<_> = (0..5)
            .map(|i| {
                let seen = seen.clone();
                queue
                    .submit(move || async move {
                        tokio::time::sleep(Duration::from_millis(5 - i as u64)).await;
                        seen.lock().unwrap().push(i);
                        Ok(i)
                    })
                    .unwrap()
            })
            .collect();

        for (i, ticket) in tickets.into_iter().enumerate() {
            assert_eq!(ticket.wait().await.unwrap(), i);
        }
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[actix_web::test]
    async fn test_jobs_never_overlap() {
        let queue = RegistrationQueue::start(Duration::from_secs(5));
        let running = Arc::new(AtomicUsize::new(0));
        let max_running = Arc::new(AtomicUsize::new(0));

        let tickets: Vec<_> = (0..10)
            .map(|_| {
                let running = running.clone();
                let max_running = max_running.clone();
                queue
                    .submit(move || async move {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        max_running.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(2)).await;
                        running.fetch_sub(1, Ordering::SeqCst);
                        Ok(())
                    })
                    .unwrap()
            })
            .collect();

        for ticket in tickets {
            ticket.wait().await.unwrap();
        }
        assert_eq!(max_running.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_panicking_job_does_not_stop_worker() {
        let queue = RegistrationQueue::start(Duration::from_secs(5));

        let failed = queue
            .submit(|| async {
                if true {
                    panic!("boom");
                }
                Ok(())
            })
            .unwrap();
        let next = queue.submit(|| async { Ok("still running") }).unwrap();

        assert!(matches!(failed.wait().await, Err(AppError::InternalError(_))));
        assert_eq!(next.wait().await.unwrap(), "still running");
    }

    #[actix_web::test]
    async fn test_job_error_is_delivered_to_ticket() {
        let queue = RegistrationQueue::start(Duration::from_secs(5));

        let ticket = queue
            .submit(|| async { Err::<(), _>(AppError::auth_failed("nope")) })
            .unwrap();

        let err = ticket.wait().await.unwrap_err();
        assert_eq!(err.failure_code(), crate::core::errors::FailureCode::AuthFailed);
    }

    #[actix_web::test]
    async fn test_wait_times_out() {
        let queue = RegistrationQueue::start(Duration::from_millis(20));

        let ticket = queue
            .submit(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(())
            })
            .unwrap();

        assert!(matches!(ticket.wait().await, Err(AppError::InternalError(_))));
    }
}
