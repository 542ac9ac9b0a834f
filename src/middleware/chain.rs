use std::sync::Arc;

use super::traits::{Handler, Middleware, Next};
use super::{MiddlewareError, Request, Response};

/// 등록 순서대로 요청을 감싸는 미들웨어 체인
#[derive(Default, Clone)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Arc::new(middleware));
    }

    pub fn add_arc(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// 요청을 체인에 통과시킨 뒤 최종 핸들러를 호출합니다.
    ///
    /// 먼저 등록된 미들웨어가 바깥쪽에서 감쌉니다.
    pub async fn execute(
        &self,
        request: Request,
        handler: Arc<dyn Handler>,
    ) -> Result<Response, MiddlewareError> {
        let middlewares: Arc<[Arc<dyn Middleware>]> = Arc::from(self.middlewares.as_slice());
        Next::new(middlewares, handler).run(request).await
    }
}
