//! Shared macros for the codebase
//!
//! Provides conditional tracing macros that are no-ops when trace feature is disabled

/// Conditional tracing macros - no-op when trace feature is disabled
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

// Forward to tracing when trace feature is enabled
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

#[cfg(feature = "trace")]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { ::tracing::info!($($arg)*) };
}

#[cfg(feature = "trace")]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { ::tracing::warn!($($arg)*) };
}
