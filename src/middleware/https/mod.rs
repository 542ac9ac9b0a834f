mod config;
mod middleware;

pub use config::HttpsConfig;
pub use middleware::HttpsMiddleware;
