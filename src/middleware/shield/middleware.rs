use std::collections::HashSet;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::{debug, instrument};

use crate::matcher::MatchConfig;
use crate::middleware::{Middleware, MiddlewareError, Next, Request, Response};

use super::config::ShieldConfig;

/// 요청 취소 차단 미들웨어
///
/// 선택된 요청의 핸들러 실행을 외부 취소로부터 보호합니다. 클라이언트가
/// 연결을 끊어도 비멱등 핸들러(결제, 쓰기 작업 등)는 끝까지 실행되어야
/// 할 때 사용합니다. 보호 범위는 해당 요청의 다운스트림 호출 하나이며,
/// 요청 간 조율은 없습니다.
pub struct ShieldMiddleware {
    methods: HashSet<String>,
    urls: Option<MatchConfig>,
    ignore: Option<MatchConfig>,
}

impl ShieldMiddleware {
    /// 설정을 검증하고 미들웨어를 생성합니다.
    ///
    /// `methods`/`urls` 중 하나는 반드시 있어야 하고 둘 다는 안 되며,
    /// `ignore`는 `urls`와 함께 쓸 수 없습니다.
    pub fn new(config: ShieldConfig) -> Result<Self, MiddlewareError> {
        let has_methods = config.methods.as_ref().is_some_and(|m| !m.is_empty());
        let has_urls = config.urls.as_ref().is_some_and(|u| !u.is_empty());

        if !has_methods && !has_urls {
            return Err(MiddlewareError::Config(
                "methods와 urls 중 하나는 지정해야 합니다".to_string(),
            ));
        }
        if has_methods && has_urls {
            return Err(MiddlewareError::Config(
                "methods와 urls는 함께 지정할 수 없습니다".to_string(),
            ));
        }
        if has_urls && config.ignore.is_some() {
            return Err(MiddlewareError::Config(
                "ignore는 urls와 함께 지정할 수 없습니다".to_string(),
            ));
        }

        let methods = config
            .methods
            .unwrap_or_default()
            .into_iter()
            .map(|method| method.to_ascii_lowercase())
            .collect();

        Ok(Self {
            methods,
            urls: config.urls,
            ignore: config.ignore,
        })
    }

    /// 다운스트림 호출을 독립 태스크에서 실행합니다.
    ///
    /// 이 미들웨어의 퓨처가 취소로 드롭되어도 스폰된 태스크는 완료까지
    /// 계속 실행됩니다 (`asyncio.shield`에 해당). 취소는 이 호출 구간
    /// 바깥에서만 효력을 가집니다.
    async fn shield(
        fut: BoxFuture<'static, Result<Response, MiddlewareError>>,
    ) -> Result<Response, MiddlewareError> {
        match tokio::spawn(fut).await {
            Ok(result) => result,
            Err(e) => Err(MiddlewareError::Processing(format!(
                "실드된 핸들러 태스크 실패: {e}"
            ))),
        }
    }
}

#[async_trait]
impl Middleware for ShieldMiddleware {
    fn name(&self) -> &str {
        "shield"
    }

    #[instrument(skip_all, fields(middleware = self.name()))]
    async fn handle(&self, req: Request, next: Next) -> Result<Response, MiddlewareError> {
        let request_method = req.method().as_str().to_ascii_lowercase();
        let request_path = req.uri().path().to_string();

        // 메서드 기준 실드
        if !self.methods.is_empty() {
            if !self.methods.contains(&request_method) {
                return next.run(req).await;
            }

            if let Some(ignore) = &self.ignore {
                if ignore.matches(&request_method, &request_path) {
                    debug!(method = %request_method, path = %request_path, "실드 제외 경로");
                    return next.run(req).await;
                }
            }

            debug!(method = %request_method, path = %request_path, "메서드 매칭으로 실드 활성화");
            return Self::shield(next.run(req)).await;
        }

        // URL 기준 실드
        if let Some(urls) = &self.urls {
            if urls.matches(&request_method, &request_path) {
                debug!(method = %request_method, path = %request_path, "경로 매칭으로 실드 활성화");
                return Self::shield(next.run(req)).await;
            }
        }

        next.run(req).await
    }
}
