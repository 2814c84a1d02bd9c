use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::classifier::{CrashClassifier, DetectionConfig};
use crate::error::MonitorError;
use crate::events::{CrashSink, SensorSample};

use super::worker::monitor_loop;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Sample channel depth. ~5s of headroom at a 50 Hz accelerometer plus
/// gyroscope before the feed starts shedding.
const SAMPLE_CHANNEL_CAPACITY: usize = 512;

/// Handle the platform sensor adapter uses to push readings into the
/// monitor. Clonable; sends never block the sensor callback.
#[derive(Clone)]
pub struct SampleFeed {
    tx: mpsc::Sender<SensorSample>,
}

impl SampleFeed {
    /// Push an accelerometer reading (raw m/s² per axis).
    pub fn accel(&self, x: f64, y: f64, z: f64, timestamp_ms: u64) -> Result<(), MonitorError> {
        self.send(SensorSample::acceleration(x, y, z, timestamp_ms))
    }

    /// Push a gyroscope reading (rad/s per axis).
    pub fn gyro(&self, x: f64, y: f64, z: f64, timestamp_ms: u64) -> Result<(), MonitorError> {
        self.send(SensorSample::angular_rate(x, y, z, timestamp_ms))
    }

    fn send(&self, sample: SensorSample) -> Result<(), MonitorError> {
        match self.tx.try_send(sample) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                // Sensor streams are lossy by nature; shedding under
                // backpressure beats blocking the platform callback.
                log_warn!(
                    "sample channel full, dropping {:?} reading at t={}ms",
                    dropped.kind,
                    dropped.timestamp_ms
                );
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(MonitorError::ChannelClosed),
        }
    }
}

/// Owns the monitoring worker task. Create once, `start` when the host
/// begins monitoring, `stop` when it ends; classifier state does not
/// survive a stop/start cycle.
pub struct MonitorController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl MonitorController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    /// Spawn the worker and return the feed for the sensor adapter.
    ///
    /// The worker exclusively owns a fresh [`CrashClassifier`]; every
    /// mutation of detection state happens on that one task.
    pub fn start(
        &mut self,
        config: DetectionConfig,
        sink: Arc<dyn CrashSink>,
    ) -> Result<SampleFeed, MonitorError> {
        if self.handle.is_some() {
            return Err(MonitorError::AlreadyRunning);
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let (tx, rx) = mpsc::channel::<SensorSample>(SAMPLE_CHANNEL_CAPACITY);
        let classifier = CrashClassifier::new(config);

        log_info!("starting crash monitoring");
        let handle = tokio::spawn(monitor_loop(classifier, rx, sink, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(SampleFeed { tx })
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the worker and wait for it to wind down. Idempotent.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("monitor worker task failed to join")?;
            log_info!("crash monitoring stopped");
        }
        Ok(())
    }
}

impl Default for MonitorController {
    fn default() -> Self {
        Self::new()
    }
}
