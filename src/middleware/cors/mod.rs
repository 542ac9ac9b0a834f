mod config;
mod middleware;

pub use config::{CorsConfig, DEFAULT_ALLOW_HEADERS, DEFAULT_ALLOW_METHODS};
pub use middleware::CorsMiddleware;
