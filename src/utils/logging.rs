//! Conditional logging macros gated on a module-level `ENABLE_LOGS` flag.
//!
//! Sensor ingestion runs at ~50 Hz per stream, so per-module gating keeps
//! chatty diagnostics out of release logs without sprinkling `cfg` checks
//! everywhere. Each module that uses these macros defines:
//!
//! ```rust
//! const ENABLE_LOGS: bool = true; // or false
//! ```
//!
//! and imports them from the crate root:
//!
//! ```rust,ignore
//! use crate::{log_error, log_info, log_warn};
//! ```

/// Macro for conditional info logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Macro for conditional warn logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Macro for conditional error logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
