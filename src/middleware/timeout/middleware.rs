use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::middleware::{Middleware, MiddlewareError, Next, Request, Response};

use super::config::TimeoutConfig;

/// 요청별 타임아웃 미들웨어
///
/// 데드라인을 넘긴 요청은 `MiddlewareError::Timeout`으로 끝납니다.
/// 재시도는 없습니다. 이 에러를 504 응답으로 바꾸려면 에러 미들웨어를
/// 체인에서 이 미들웨어보다 바깥쪽에 두어야 합니다.
pub struct TimeoutMiddleware {
    config: TimeoutConfig,
    duration: Duration,
}

impl TimeoutMiddleware {
    /// 설정을 검증하고 미들웨어를 생성합니다.
    pub fn new(config: TimeoutConfig) -> Result<Self, MiddlewareError> {
        if !config.seconds.is_finite() || config.seconds <= 0.0 {
            return Err(MiddlewareError::Config(format!(
                "seconds는 양수여야 합니다: {}",
                config.seconds
            )));
        }
        let duration = Duration::from_secs_f64(config.seconds);
        Ok(Self { config, duration })
    }
}

#[async_trait]
impl Middleware for TimeoutMiddleware {
    fn name(&self) -> &str {
        "timeout"
    }

    #[instrument(skip_all, fields(middleware = self.name()))]
    async fn handle(&self, req: Request, next: Next) -> Result<Response, MiddlewareError> {
        let request_method = req.method().as_str().to_string();
        let request_path = req.uri().path().to_string();

        if let Some(ignore) = &self.config.ignore {
            if ignore.matches(&request_method, &request_path) {
                debug!(method = %request_method, path = %request_path, "타임아웃 제외 경로");
                return next.run(req).await;
            }
        }

        match tokio::time::timeout(self.duration, next.run(req)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(
                    method = %request_method,
                    path = %request_path,
                    seconds = self.config.seconds,
                    "요청 처리 시간 초과"
                );
                Err(MiddlewareError::Timeout {
                    seconds: self.config.seconds,
                })
            }
        }
    }
}
