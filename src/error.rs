use thiserror::Error;

/// Rejection of a sensor reading at the ingestion boundary.
///
/// A NaN or infinity entering a history window would poison every later
/// freefall/rotation scan, so malformed samples are refused before any
/// state mutation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SampleError {
    #[error("non-finite sensor sample ({x}, {y}, {z}) at t={timestamp_ms}ms")]
    InvalidSample {
        x: f64,
        y: f64,
        z: f64,
        timestamp_ms: u64,
    },
}

/// Monitor lifecycle and feed errors.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitoring already active")]
    AlreadyRunning,
    #[error("monitor is not running; sample channel closed")]
    ChannelClosed,
}
