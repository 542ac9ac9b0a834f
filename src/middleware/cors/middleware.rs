use async_trait::async_trait;
use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::{Method, StatusCode};
use tracing::{debug, instrument};

use crate::middleware::response::{empty_response, error_response};
use crate::middleware::{Middleware, MiddlewareError, Next, Request, Response};

use super::config::CorsConfig;

/// CORS 미들웨어
///
/// preflight 처리까지 미들웨어 안에서 전부 수행합니다. OPTIONS 라우트를
/// 따로 등록하지 않아도 와일드카드 핸들러나 미등록 경로에 대해 CORS
/// 헤더를 응답할 수 있습니다.
#[derive(Debug)]
pub struct CorsMiddleware {
    config: CorsConfig,
}

impl CorsMiddleware {
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }

    fn insert_header(headers: &mut HeaderMap, name: header::HeaderName, value: &str) {
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(name, value);
        }
    }

    /// Origin 정책에 따라 응답에 CORS 헤더를 붙입니다.
    fn apply_cors_headers(&self, response: &mut Response, origin: &str, is_options: bool) {
        let config = &self.config;
        let headers = response.headers_mut();

        if config.allow_credentials {
            Self::insert_header(headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }

        // Origin이 정책을 통과하지 못하면 allow 헤더를 싣지 않음
        if !config.allow_all && !config.origins_match(origin) {
            debug!(%origin, "허용되지 않은 Origin, CORS 헤더 생략");
            return;
        }

        // credentials와 와일드카드는 함께 쓸 수 없으므로 Origin을 에코
        let cors_origin = if config.allow_all && !config.allow_credentials {
            "*"
        } else {
            origin
        };
        Self::insert_header(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, cors_origin);

        if !config.expose_headers.is_empty() {
            Self::insert_header(
                headers,
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                &config.expose_headers.join(", "),
            );
        }

        if is_options {
            Self::insert_header(
                headers,
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                &config.allow_headers.join(", "),
            );
            Self::insert_header(
                headers,
                header::ACCESS_CONTROL_ALLOW_METHODS,
                &config.allow_methods.join(", "),
            );
            if let Some(max_age) = config.max_age {
                Self::insert_header(
                    headers,
                    header::ACCESS_CONTROL_MAX_AGE,
                    &max_age.to_string(),
                );
            }
        }
    }
}

#[async_trait]
impl Middleware for CorsMiddleware {
    fn name(&self) -> &str {
        "cors"
    }

    #[instrument(skip_all, fields(middleware = self.name()))]
    async fn handle(&self, req: Request, next: Next) -> Result<Response, MiddlewareError> {
        let path = req.uri().path().to_string();
        let is_options = req.method() == Method::OPTIONS;
        let is_preflight =
            is_options && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);
        let origin = req
            .headers()
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        if !self.config.urls_match(&path) {
            debug!(%path, "CORS 처리 대상이 아닌 경로");
            return next.run(req).await;
        }

        let mut response = if is_preflight {
            // preflight에는 다운스트림을 호출하지 않고 빈 응답을 구성
            debug!(%path, "CORS preflight 요청 처리");
            empty_response(StatusCode::OK)
        } else {
            match next.run(req).await {
                Ok(response) => response,
                // HTTP 수준 에러도 CORS 헤더를 실어야 하므로 응답으로 변환
                Err(err @ MiddlewareError::Http { .. }) => error_response(&err),
                Err(err) => return Err(err),
            }
        };

        let Some(origin) = origin else {
            debug!(%path, "Origin 헤더가 없는 요청, CORS 헤더 생략");
            return Ok(response);
        };

        self.apply_cors_headers(&mut response, &origin, is_options);
        Ok(response)
    }
}
