//! Guardian crash-detection core.
//!
//! Classifies a continuous stream of motion-sensor samples into a debounced
//! "vehicle crash detected" decision while filtering out the two known
//! false-positive patterns: a dropped phone (freefall in the recent window)
//! and noise from ordinary driving (impact without a sharp jerk step).
//!
//! The crate is the engine behind a mobile app shell. The shell owns the
//! real sensor subscription and the alert UI; it feeds readings through a
//! [`monitor::SampleFeed`] and receives confirmed events on its
//! [`events::CrashSink`]. The only other externally observable behavior is
//! the audible alarm loop in [`alarm`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use guardian_core::{DetectionConfig, MonitorController};
//!
//! let mut monitor = MonitorController::new();
//! let feed = monitor.start(DetectionConfig::default(), Arc::new(MySink))?;
//!
//! // platform sensor callbacks:
//! feed.accel(x, y, z, now_ms)?;
//! feed.gyro(x, y, z, now_ms)?;
//! ```

pub mod alarm;
pub mod classifier;
pub mod error;
pub mod events;
pub mod monitor;
pub mod settings;
mod utils;

pub use alarm::AlarmHandle;
pub use classifier::{CrashClassifier, DetectionConfig, HistoryWindow};
pub use error::{MonitorError, SampleError};
pub use events::{CrashEvent, CrashKind, CrashSink, SampleKind, SensorSample};
pub use monitor::{MonitorController, SampleFeed};
pub use settings::SettingsStore;
