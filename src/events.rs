use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which physical sensor produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleKind {
    /// Linear acceleration, raw m/s² per axis (gravity included).
    Acceleration,
    /// Angular rate, rad/s per axis.
    AngularRate,
}

/// A timestamped 3-axis reading as delivered by the platform sensor adapter.
///
/// `timestamp_ms` is monotonic milliseconds from whatever clock the adapter
/// uses; the classifier only ever compares differences, never absolute values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub kind: SampleKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub timestamp_ms: u64,
}

impl SensorSample {
    pub fn acceleration(x: f64, y: f64, z: f64, timestamp_ms: u64) -> Self {
        Self {
            kind: SampleKind::Acceleration,
            x,
            y,
            z,
            timestamp_ms,
        }
    }

    pub fn angular_rate(x: f64, y: f64, z: f64, timestamp_ms: u64) -> Self {
        Self {
            kind: SampleKind::AngularRate,
            x,
            y,
            z,
            timestamp_ms,
        }
    }

}

/// Classification attached to a confirmed crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashKind {
    /// Hard impact without sustained rotation: frontal or side collision.
    FrontalOrSide,
    /// High angular rate seen in the recent window: vehicle rollover or
    /// rider tumble.
    Rollover,
}

impl CrashKind {
    pub fn name(&self) -> &'static str {
        match self {
            CrashKind::FrontalOrSide => "FRONTAL/SIDE IMPACT",
            CrashKind::Rollover => "ROLLOVER/TUMBLE",
        }
    }
}

/// A confirmed crash, produced transiently by the classifier and handed to
/// the alert sink. Never stored by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashEvent {
    /// Peak G-force magnitude of the triggering sample (dimensionless,
    /// ≈1.0 at rest).
    pub g_force: f64,
    pub kind: CrashKind,
    /// Wall-clock stamp taken at confirmation time, for the host's alert UI.
    pub occurred_at: DateTime<Utc>,
}

/// The host's alert surface. Invoked at most once per cooldown window, never
/// concurrently with itself.
///
/// Implementations should be quick; the monitor hands delivery to a blocking
/// task so a slow sink cannot stall ingestion, but it still serializes
/// deliveries.
pub trait CrashSink: Send + Sync + 'static {
    fn on_crash_detected(&self, event: CrashEvent);
}
