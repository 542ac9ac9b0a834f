use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::middleware::{Middleware, MiddlewareError, Next, Request, Response};

use super::config::ErrorConfig;
use super::handler::{ErrorContext, ErrorHandler};

/// 에러 정규화 미들웨어
///
/// 다운스트림에서 올라온 에러를 잡아 경로별 에러 핸들러 또는 기본
/// 핸들러로 응답을 만듭니다. 모든 에러를 잡으려면 체인의 가장 바깥쪽에
/// 두어야 합니다 (CORS 미들웨어를 쓴다면 그 다음에).
pub struct ErrorMiddleware {
    config: ErrorConfig,
}

impl ErrorMiddleware {
    pub fn new(config: ErrorConfig) -> Self {
        Self { config }
    }

    /// 요청 경로에 매칭되는 에러 핸들러를 찾습니다.
    fn get_error_handler(&self, path: &str) -> Arc<dyn ErrorHandler> {
        for (pattern, handler) in &self.config.config {
            if pattern.matches(path) {
                return Arc::clone(handler);
            }
        }
        Arc::clone(&self.config.default_handler)
    }
}

#[async_trait]
impl Middleware for ErrorMiddleware {
    fn name(&self) -> &str {
        "error"
    }

    #[instrument(skip_all, fields(middleware = self.name()))]
    async fn handle(&self, req: Request, next: Next) -> Result<Response, MiddlewareError> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        match next.run(req).await {
            Ok(response) => Ok(response),
            Err(err) => {
                if let Some(filter) = &self.config.ignore {
                    if filter(&err) {
                        debug!(%method, %path, "무시 목록의 에러, 그대로 전파");
                        return Err(err);
                    }
                }

                let context = ErrorContext::new(&err, method, path);
                let handler = self.get_error_handler(&context.path);
                Ok(handler.handle(context).await)
            }
        }
    }
}
