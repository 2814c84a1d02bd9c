use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::classifier::CrashClassifier;
use crate::events::{CrashEvent, CrashSink, SampleKind, SensorSample};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Depth of the event hand-off channel. Events arrive at most once per
/// cooldown window, so this only needs slack for a stalled sink.
const EVENT_CHANNEL_CAPACITY: usize = 8;

/// Single consumer of the sample channel; exclusively owns the classifier.
///
/// Confirmed events go to a dedicated dispatch task over a second channel.
/// That task delivers one event at a time, so the sink is never invoked
/// concurrently with itself, while this loop never waits on delivery.
pub async fn monitor_loop(
    mut classifier: CrashClassifier,
    mut samples: mpsc::Receiver<SensorSample>,
    sink: Arc<dyn CrashSink>,
    cancel_token: CancellationToken,
) {
    let (event_tx, event_rx) = mpsc::channel::<CrashEvent>(EVENT_CHANNEL_CAPACITY);
    let dispatcher = tokio::spawn(dispatch_loop(event_rx, sink));

    loop {
        tokio::select! {
            maybe_sample = samples.recv() => {
                match maybe_sample {
                    Some(sample) => ingest(&mut classifier, sample, &event_tx),
                    None => {
                        log_info!("sample feed dropped, monitor loop exiting");
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("monitor loop shutting down");
                break;
            }
        }
    }

    // Close the event channel so the dispatcher drains and exits.
    drop(event_tx);
    if let Err(err) = dispatcher.await {
        log_error!("event dispatcher task failed to join: {err:?}");
    }
}

fn ingest(
    classifier: &mut CrashClassifier,
    sample: SensorSample,
    event_tx: &mpsc::Sender<CrashEvent>,
) {
    let SensorSample {
        kind,
        x,
        y,
        z,
        timestamp_ms,
    } = sample;

    match kind {
        SampleKind::Acceleration => match classifier.ingest_acceleration(x, y, z, timestamp_ms) {
            Ok(Some(event)) => {
                // Fire-and-forget: a full channel here means the sink has
                // been stuck for several cooldown windows already.
                if let Err(err) = event_tx.try_send(event) {
                    log_error!("failed to queue crash event for dispatch: {err}");
                }
            }
            Ok(None) => {}
            Err(err) => log_warn!("rejected accelerometer sample: {err}"),
        },
        SampleKind::AngularRate => {
            if let Err(err) = classifier.ingest_rotation(x, y, z, timestamp_ms) {
                log_warn!("rejected gyroscope sample: {err}");
            }
        }
    }
}

/// Serialized delivery to the host's alert surface. A panicking or failing
/// sink is logged and skipped; it never takes the monitor down.
async fn dispatch_loop(mut events: mpsc::Receiver<CrashEvent>, sink: Arc<dyn CrashSink>) {
    while let Some(event) = events.recv().await {
        let sink = Arc::clone(&sink);
        let delivery = tokio::task::spawn_blocking(move || sink.on_crash_detected(event));
        if let Err(err) = delivery.await {
            log_error!("crash sink dispatch failed: {err:?}");
        }
    }
}
