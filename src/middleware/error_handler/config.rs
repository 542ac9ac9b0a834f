use std::sync::Arc;

use crate::matcher::PathPattern;
use crate::middleware::MiddlewareError;

use super::handler::{DefaultErrorHandler, ErrorHandler};

/// 에러를 미들웨어에서 처리하지 않고 그대로 되돌릴지 결정하는 술어
pub type IgnoreFilter = Arc<dyn Fn(&MiddlewareError) -> bool + Send + Sync>;

/// 에러 미들웨어 설정
///
/// `config`는 `(패턴, 핸들러)` 쌍의 순서 있는 목록입니다. 요청 경로에
/// 매칭되는 첫 번째 항목의 핸들러가 사용되고, 매칭이 없으면
/// `default_handler`가 사용됩니다.
#[derive(Clone)]
pub struct ErrorConfig {
    pub default_handler: Arc<dyn ErrorHandler>,
    pub config: Vec<(PathPattern, Arc<dyn ErrorHandler>)>,
    pub ignore: Option<IgnoreFilter>,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            default_handler: Arc::new(DefaultErrorHandler),
            config: Vec::new(),
            ignore: None,
        }
    }
}

impl ErrorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 에러 핸들러를 교체합니다.
    pub fn with_default_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.default_handler = handler;
        self
    }

    /// 지정한 경로 패턴에 전용 에러 핸들러를 등록합니다.
    ///
    /// 등록 순서가 우선순위입니다.
    pub fn on_path(mut self, pattern: impl Into<PathPattern>, handler: Arc<dyn ErrorHandler>) -> Self {
        self.config.push((pattern.into(), handler));
        self
    }

    /// 술어가 참을 돌려주는 에러는 처리하지 않고 호출자에게 되돌립니다.
    pub fn ignore<F>(mut self, filter: F) -> Self
    where
        F: Fn(&MiddlewareError) -> bool + Send + Sync + 'static,
    {
        self.ignore = Some(Arc::new(filter));
        self
    }
}
