//! Global tracing subscriber setup shared by the binaries.

use tracing_subscriber::{fmt, EnvFilter};

use crate::{LogFormat, LogSettings};

/// Installs the subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match settings.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
