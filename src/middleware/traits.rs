use std::future::Future;
use std::sync::Arc;

use super::{MiddlewareError, Request, Response};
use async_trait::async_trait;
use futures_util::future::BoxFuture;

/// 최종 요청 핸들러 트레이트
///
/// 미들웨어 체인의 끝에서 실제 응답을 만들어내는 주체입니다.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, req: Request) -> Result<Response, MiddlewareError>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, MiddlewareError>> + Send,
{
    async fn call(&self, req: Request) -> Result<Response, MiddlewareError> {
        (self.0)(req).await
    }
}

/// 비동기 클로저를 핸들러로 감쌉니다.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, MiddlewareError>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// 미들웨어 트레이트
///
/// 다운스트림 호출(`next`)을 감싸는 형태로 HTTP 요청 처리에 개입합니다.
/// 요청을 수정해 넘기거나, 다운스트림을 호출하지 않고 직접 응답하거나,
/// 다운스트림의 결과(응답/에러)를 가공할 수 있습니다.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// 미들웨어의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// HTTP 요청을 처리합니다.
    async fn handle(&self, req: Request, next: Next) -> Result<Response, MiddlewareError>;
}

/// 체인의 나머지 구간을 나타내는 연속(continuation)
///
/// 소유된 값이므로 `run`이 돌려주는 퓨처는 `'static`입니다. 실드
/// 미들웨어는 이 성질을 이용해 다운스트림 호출을 독립 태스크로
/// 옮길 수 있습니다.
#[derive(Clone)]
pub struct Next {
    middlewares: Arc<[Arc<dyn Middleware>]>,
    index: usize,
    handler: Arc<dyn Handler>,
}

impl Next {
    pub(crate) fn new(middlewares: Arc<[Arc<dyn Middleware>]>, handler: Arc<dyn Handler>) -> Self {
        Self {
            middlewares,
            index: 0,
            handler,
        }
    }

    /// 체인의 다음 미들웨어를 실행하고, 남은 미들웨어가 없으면 최종
    /// 핸들러를 호출합니다.
    pub fn run(self, req: Request) -> BoxFuture<'static, Result<Response, MiddlewareError>> {
        Box::pin(async move {
            match self.middlewares.get(self.index) {
                Some(middleware) => {
                    let middleware = Arc::clone(middleware);
                    let next = Next {
                        index: self.index + 1,
                        ..self
                    };
                    middleware.handle(req, next).await
                }
                None => self.handler.call(req).await,
            }
        })
    }
}
