//! Logging Infrastructure
//!
//! - Console output: pretty in development, JSON elsewhere
//! - Optional daily-rolling files under `LOG_DIR`: `app/` for everything except
//!   the `security` target, `security/` for login, logout and permission events

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (console_json, console_pretty) = if json_format {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true);
        (Some(layer), None)
    } else {
        let layer = fmt::layer().with_target(true).with_line_number(true);
        (None, Some(layer))
    };

    let (app_layer, security_layer) = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            let app_log = rolling_file(dir, "app")?;
            let security_log = rolling_file(dir, "security")?;

            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(app_log)
                .with_filter(filter_fn(|meta| meta.target() != "security"));
            let security_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(security_log)
                .with_filter(filter_fn(|meta| meta.target() == "security"));
            (Some(app_layer), Some(security_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_json)
        .with(console_pretty)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}

fn rolling_file(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    let dir = dir.join(prefix);
    std::fs::create_dir_all(&dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}
