mod config;
mod handler;
mod middleware;

pub use config::{ErrorConfig, IgnoreFilter};
pub use handler::{error_handler_fn, DefaultErrorHandler, ErrorContext, ErrorHandler};
pub use middleware::ErrorMiddleware;
