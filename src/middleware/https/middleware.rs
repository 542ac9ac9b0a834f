use async_trait::async_trait;
use hyper::http::uri::{Authority, PathAndQuery, Scheme, Uri};
use hyper::header;
use tracing::{debug, instrument};

use crate::middleware::{Middleware, MiddlewareError, Next, Request, Response};

use super::config::HttpsConfig;

/// HTTPS 스킴 재작성 미들웨어
///
/// HTTPS를 종단하는 리버스 프록시 뒤에 배포된 애플리케이션에서,
/// 프록시가 붙인 헤더(`X-Forwarded-Proto: https` 등)를 보고 요청 URI의
/// 스킴을 `https`로 되돌립니다.
#[derive(Debug)]
pub struct HttpsMiddleware {
    config: HttpsConfig,
}

impl HttpsMiddleware {
    pub fn new(config: HttpsConfig) -> Self {
        Self { config }
    }

    fn is_forwarded_https(&self, req: &Request) -> bool {
        self.config.match_headers.iter().any(|(key, value)| {
            req.headers()
                .get(key.as_str())
                .and_then(|header| header.to_str().ok())
                .map(|header| header == value)
                .unwrap_or(false)
        })
    }

    /// 요청 URI의 스킴을 `https`로 바꿉니다.
    ///
    /// origin-form URI에는 authority가 없으므로 `Host` 헤더에서 보충합니다.
    /// 보충할 수 없으면 요청을 그대로 둡니다. 재작성 실패가 요청 처리를
    /// 중단시키지는 않습니다.
    fn rewrite_scheme(req: &mut Request) {
        let mut parts = req.uri().clone().into_parts();
        parts.scheme = Some(Scheme::HTTPS);

        if parts.authority.is_none() {
            let authority = req
                .headers()
                .get(header::HOST)
                .and_then(|host| host.to_str().ok())
                .and_then(|host| host.parse::<Authority>().ok());
            match authority {
                Some(authority) => parts.authority = Some(authority),
                None => {
                    debug!("Host 헤더가 없어 스킴을 재작성하지 않음");
                    return;
                }
            }
        }

        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }

        match Uri::from_parts(parts) {
            Ok(uri) => *req.uri_mut() = uri,
            Err(e) => debug!(error = %e, "URI 재조립 실패, 요청을 그대로 유지"),
        }
    }
}

#[async_trait]
impl Middleware for HttpsMiddleware {
    fn name(&self) -> &str {
        "https"
    }

    #[instrument(skip_all, fields(middleware = self.name()))]
    async fn handle(&self, mut req: Request, next: Next) -> Result<Response, MiddlewareError> {
        if self.is_forwarded_https(&req) {
            debug!(path = req.uri().path(), "요청 스킴을 https로 재작성");
            Self::rewrite_scheme(&mut req);
        }
        next.run(req).await
    }
}
