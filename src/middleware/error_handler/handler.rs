use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::{Method, StatusCode};
use tracing::error;

use crate::middleware::response::json_response;
use crate::middleware::{MiddlewareError, Response};

/// 에러 핸들러에 전달되는 에러 정보
///
/// 실패한 요청의 메서드/경로와 함께 응답 구성에 필요한 상태 코드,
/// 메시지, JSON 페이로드를 담습니다.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub status: StatusCode,
    pub message: String,
    pub data: serde_json::Value,
    pub method: Method,
    pub path: String,
}

impl ErrorContext {
    pub fn new(err: &MiddlewareError, method: Method, path: String) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
            data: err.data(),
            method,
            path,
        }
    }
}

/// 처리되지 않은 에러를 응답으로 바꾸는 핸들러 트레이트
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn handle(&self, context: ErrorContext) -> Response;
}

/// 기본 에러 핸들러
///
/// 에러를 로그로 남기고 `{"detail": "..."}` JSON으로 응답합니다.
#[derive(Debug, Default)]
pub struct DefaultErrorHandler;

#[async_trait]
impl ErrorHandler for DefaultErrorHandler {
    async fn handle(&self, context: ErrorContext) -> Response {
        error!(
            method = %context.method,
            path = %context.path,
            status = %context.status,
            "요청 처리 실패: {}",
            context.message
        );
        json_response(context.status, &context.data)
    }
}

struct FnErrorHandler<F>(F);

#[async_trait]
impl<F, Fut> ErrorHandler for FnErrorHandler<F>
where
    F: Fn(ErrorContext) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    async fn handle(&self, context: ErrorContext) -> Response {
        (self.0)(context).await
    }
}

/// 비동기 클로저를 에러 핸들러로 감쌉니다.
pub fn error_handler_fn<F, Fut>(f: F) -> Arc<dyn ErrorHandler>
where
    F: Fn(ErrorContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(FnErrorHandler(f))
}
