//! Tracing configuration for the onboarding driver
//!
//! Installs a `tracing-subscriber` registry with an env-filter and a single
//! stdout fmt layer.
//!
//! ## Behavior / 行为
//!
//! - **Development**: debug level for the workspace crates
//! - **Production**: info level
//! - **Environment filter**: `RUST_LOG` overrides the defaults

use std::io;

use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

/// Timestamp format shared by every log line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("ob_core={level}"),
        format!("ob_app={level}"),
        format!("ob_infra={level}"),
        format!("onboarding_lib={level}"),
    ]
}

/// Initialize the tracing subscriber
///
/// Format: `2026-01-15 10:30:45.123 INFO [file.rs:42] [target] message`
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered (call once, from `main`).
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    // Logs go to stderr so the driver's report on stdout stays clean.
    let writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let fmt_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(writer);

    registry().with(env_filter).with(fmt_layer).try_init()?;

    Ok(())
}
