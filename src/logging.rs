use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn file_appender(config: &AppConfig) -> RollingFileAppender {
    match config.rotation.as_str() {
        "hourly" => rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => rolling::daily(&config.log_dir, &config.log_file),
        _ => rolling::never(&config.log_dir, &config.log_file),
    }
}

/// Default filter directive when RUST_LOG is not set. Disabling tracing
/// turns this crate's spans off while leaving dependency logs at the
/// configured level.
fn filter_directive(log_level: &str, enable_tracing: bool) -> String {
    if enable_tracing {
        log_level.to_string()
    } else {
        format!("{log_level},linsfair=off")
    }
}

/// Install the global subscriber: a non-blocking rolling file layer
/// (JSON or plain text per config) plus, in text mode, a colored stdout
/// layer. The returned guard must stay alive or buffered log lines are
/// lost on shutdown.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(config));

    let directive = filter_directive(&config.log_level, config.enable_tracing);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true) // Keep target in JSON for structured queries
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .with(fmt::layer().with_target(false).with_ansi(true))
            .init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_silences_crate_when_tracing_disabled() {
        assert_eq!(filter_directive("info", true), "info");
        assert_eq!(filter_directive("info", false), "info,linsfair=off");
        assert_eq!(filter_directive("debug", false), "debug,linsfair=off");
    }
}
