use ::tracing_subscriber::EnvFilter;

pub const LOG_TARGET: &str = "kira_plasmaqc";

/// Installs the stderr subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = ::tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        ::tracing::info!(target: $crate::tracing::LOG_TARGET, $($arg)*);
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        ::tracing::warn!(target: $crate::tracing::LOG_TARGET, $($arg)*);
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        ::tracing::error!(target: $crate::tracing::LOG_TARGET, $($arg)*);
    }};
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        ::tracing::debug!(target: $crate::tracing::LOG_TARGET, $($arg)*);
    }};
}
