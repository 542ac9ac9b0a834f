use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 전역 tracing 구독자를 초기화합니다.
///
/// 애플리케이션 시작 시 한 번만 호출해야 합니다. `RUST_LOG` 환경 변수로
/// 필터를 덮어쓸 수 있습니다.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive(
                    "http_middlewares=debug"
                        .parse()
                        .expect("고정된 directive 문자열"),
                ),
        )
        .with_target(true)
        .init();
}
