//! Logger setup for native builds.

use std::sync::Once;

use crate::config::LogLevel;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// `RUST_LOG` wins over the configured level when it is set, using the
/// `env_logger` filter syntax (e.g. "reactive_color=trace"). Subsequent
/// calls are ignored.
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(level.to_level_filter());
        }

        builder.format_timestamp_millis();
        builder.write_style(env_logger::WriteStyle::Auto);

        // Tests may have installed a logger already
        if builder.try_init().is_err() {
            log::debug!("logger already initialized");
            return;
        }

        log::debug!("logging initialized at {:?}", level);
    });
}
