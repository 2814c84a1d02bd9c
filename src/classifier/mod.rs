//! The crash classifier.
//!
//! Consumes accelerometer and gyroscope readings, maintains rolling history
//! windows over both, and emits a debounced [`CrashEvent`] when an impact
//! passes the freefall filter. Platform-free and synchronous so it can be
//! driven with synthetic sequences in tests; the monitor module owns the
//! channel plumbing and sink dispatch around it.

pub mod config;
pub mod history;

pub use config::DetectionConfig;
pub use history::HistoryWindow;

use chrono::Utc;

use crate::error::SampleError;
use crate::events::{CrashEvent, CrashKind};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Standard gravity used to normalize accelerometer axes into G units.
const STANDARD_GRAVITY: f64 = 9.8;

/// Stateful crash detector over a single stream of sensor readings.
///
/// All mutable state lives here: the two history windows, the previous
/// G-force magnitude, and the debounce timestamp. Callers must serialize
/// `ingest_*` calls; the classifier assumes samples arrive in order.
pub struct CrashClassifier {
    config: DetectionConfig,
    g_force_history: HistoryWindow,
    rotation_history: HistoryWindow,
    /// Previous G-force magnitude. Starts at 1.0: resting gravity, so the
    /// first real sample does not register a spurious jerk.
    last_g_force: f64,
    /// Monotonic timestamp of the last emitted event; `None` until the
    /// first crash fires.
    last_alert_ms: Option<u64>,
}

impl CrashClassifier {
    pub fn new(config: DetectionConfig) -> Self {
        let history_size = config.history_size;
        Self {
            config,
            g_force_history: HistoryWindow::new(history_size),
            rotation_history: HistoryWindow::new(history_size),
            last_g_force: 1.0,
            last_alert_ms: None,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Feed one accelerometer reading (raw m/s² per axis, gravity included).
    ///
    /// Returns a confirmed crash when this sample both exceeds the impact
    /// threshold and arrived as a sharp step from the previous sample, and
    /// the confirmation filters let it through. Non-finite input is rejected
    /// without touching any state.
    pub fn ingest_acceleration(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        now_ms: u64,
    ) -> Result<Option<CrashEvent>, SampleError> {
        self.check_finite(x, y, z, now_ms)?;

        let gx = x / STANDARD_GRAVITY;
        let gy = y / STANDARD_GRAVITY;
        let gz = z / STANDARD_GRAVITY;
        let g_force = (gx * gx + gy * gy + gz * gz).sqrt();

        // Per-sample backward difference, deliberately not normalized by
        // elapsed time (see DetectionConfig::jerk_threshold).
        let jerk = (g_force - self.last_g_force).abs();

        self.g_force_history.push(g_force);
        self.last_g_force = g_force;

        if g_force > self.config.impact_threshold && jerk > self.config.jerk_threshold {
            return Ok(self.confirm_crash(g_force, jerk, now_ms));
        }
        Ok(None)
    }

    /// Feed one gyroscope reading (rad/s per axis).
    ///
    /// Rotation never triggers detection on its own; it is only consulted
    /// during confirmation to separate rollovers from frontal impacts.
    pub fn ingest_rotation(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        now_ms: u64,
    ) -> Result<(), SampleError> {
        self.check_finite(x, y, z, now_ms)?;

        let total_rotation = (x * x + y * y + z * z).sqrt();
        self.rotation_history.push(total_rotation);
        Ok(())
    }

    /// Debounce, filter, classify. Edge-triggered: there is no persistent
    /// "crashed" state, only the momentary event.
    fn confirm_crash(&mut self, g_force: f64, jerk: f64, now_ms: u64) -> Option<CrashEvent> {
        // Debounce gate: one alert per cooldown window.
        if let Some(last) = self.last_alert_ms {
            if now_ms.saturating_sub(last) <= self.config.cooldown_ms {
                return None;
            }
        }

        // Freefall filter: a drop shows a brief weightless phase that a
        // genuine vehicle crash never does. Any near-zero reading in the
        // window overrides the impact. The debounce timer is NOT updated
        // here, so a real crash right after a drop still gets through.
        let freefall_threshold = self.config.freefall_threshold;
        if self.g_force_history.any(|g| g < freefall_threshold) {
            log_info!(
                "ignored impact at t={}ms ({:.2} G, jerk {:.2}): phone drop detected",
                now_ms,
                g_force,
                jerk
            );
            return None;
        }

        // Rotation check classifies, never suppresses.
        let rotation_threshold = self.config.rotation_threshold;
        let kind = if self.rotation_history.any(|r| r > rotation_threshold) {
            CrashKind::Rollover
        } else {
            CrashKind::FrontalOrSide
        };

        self.last_alert_ms = Some(now_ms);
        let event = CrashEvent {
            g_force,
            kind,
            occurred_at: Utc::now(),
        };
        log_info!(
            "crash confirmed at t={}ms: {} ({:.2} G, jerk {:.2})",
            now_ms,
            kind.name(),
            g_force,
            jerk
        );
        Some(event)
    }

    fn check_finite(&self, x: f64, y: f64, z: f64, now_ms: u64) -> Result<(), SampleError> {
        if x.is_finite() && y.is_finite() && z.is_finite() {
            Ok(())
        } else {
            Err(SampleError::InvalidSample {
                x,
                y,
                z,
                timestamp_ms: now_ms,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = STANDARD_GRAVITY;

    /// Feed an accelerometer reading whose magnitude equals `g_force` G,
    /// aligned on the x axis.
    fn feed_g(c: &mut CrashClassifier, g_force: f64, now_ms: u64) -> Option<CrashEvent> {
        c.ingest_acceleration(g_force * G, 0.0, 0.0, now_ms).unwrap()
    }

    fn classifier() -> CrashClassifier {
        CrashClassifier::new(DetectionConfig::default())
    }

    #[test]
    fn resting_gravity_never_triggers() {
        let mut c = classifier();
        for i in 0..200 {
            assert!(feed_g(&mut c, 1.0, i * 20).is_none());
        }
    }

    #[test]
    fn sharp_impact_fires_frontal_event() {
        let mut c = classifier();
        assert!(feed_g(&mut c, 1.0, 0).is_none());
        assert!(feed_g(&mut c, 1.0, 20).is_none());

        // jerk = 2.5 > 1.5, g = 3.5 > 2.9
        let event = feed_g(&mut c, 3.5, 40).expect("impact should fire");
        assert_eq!(event.kind, CrashKind::FrontalOrSide);
        assert!((event.g_force - 3.5).abs() < 1e-9);
    }

    #[test]
    fn high_g_without_jerk_is_ignored() {
        let mut c = classifier();
        // Ramp up slowly so no single step exceeds the jerk threshold.
        let mut g = 1.0;
        let mut t = 0;
        while g < 4.0 {
            assert!(feed_g(&mut c, g, t).is_none(), "ramp must not trigger");
            g += 1.0; // 1.0 < jerk_threshold 1.5
            t += 20;
        }
    }

    #[test]
    fn freefall_in_window_suppresses_alert() {
        let mut c = classifier();
        feed_g(&mut c, 1.0, 0);
        feed_g(&mut c, 0.3, 20); // weightless phase: the phone is falling
        let event = feed_g(&mut c, 3.5, 40);
        assert!(event.is_none(), "phone drop must not alert");
    }

    #[test]
    fn freefall_suppression_does_not_consume_cooldown() {
        let mut c = classifier();
        feed_g(&mut c, 0.3, 0); // drop
        assert!(feed_g(&mut c, 3.5, 20).is_none()); // suppressed

        // Push the freefall reading out of the 60-sample window with quiet
        // samples, then hit again well inside what would have been the
        // cooldown window had the suppressed impact committed.
        let mut t = 40;
        for _ in 0..60 {
            feed_g(&mut c, 1.0, t);
            t += 20;
        }
        let event = feed_g(&mut c, 3.5, t);
        assert!(
            event.is_some(),
            "suppressed drop must not start the debounce timer"
        );
    }

    #[test]
    fn rotation_in_window_labels_rollover() {
        let mut c = classifier();
        c.ingest_rotation(6.0, 0.0, 0.0, 0).unwrap(); // 6.0 rad/s > 5.0
        feed_g(&mut c, 1.0, 10);
        let event = feed_g(&mut c, 3.5, 30).expect("impact should fire");
        assert_eq!(event.kind, CrashKind::Rollover);
    }

    #[test]
    fn mild_rotation_stays_frontal() {
        let mut c = classifier();
        c.ingest_rotation(1.0, 1.0, 1.0, 0).unwrap(); // |ω| ≈ 1.73 rad/s
        feed_g(&mut c, 1.0, 10);
        let event = feed_g(&mut c, 3.5, 30).expect("impact should fire");
        assert_eq!(event.kind, CrashKind::FrontalOrSide);
    }

    #[test]
    fn second_impact_inside_cooldown_is_debounced() {
        let mut c = classifier();
        feed_g(&mut c, 1.0, 0);
        assert!(feed_g(&mut c, 3.5, 20).is_some());

        feed_g(&mut c, 1.0, 500); // settle so the next spike has jerk again
        assert!(feed_g(&mut c, 3.5, 1000).is_none(), "inside cooldown");

        feed_g(&mut c, 1.0, 2000);
        // Exactly cooldown_ms elapsed still debounces; it takes strictly more.
        assert!(feed_g(&mut c, 3.5, 3020).is_none());

        feed_g(&mut c, 1.0, 3100);
        assert!(feed_g(&mut c, 3.5, 3221).is_some(), "cooldown expired");
    }

    #[test]
    fn non_finite_samples_rejected_without_state_change() {
        let mut c = classifier();
        feed_g(&mut c, 1.0, 0);

        let err = c.ingest_acceleration(f64::NAN, 0.0, 0.0, 20).unwrap_err();
        assert!(matches!(err, SampleError::InvalidSample { .. }));
        assert!(c.ingest_rotation(0.0, f64::INFINITY, 0.0, 20).is_err());

        // History untouched: no NaN to poison the freefall scan, and the
        // next genuine impact still fires.
        assert_eq!(c.g_force_history.len(), 1);
        assert_eq!(c.rotation_history.len(), 0);
        let event = feed_g(&mut c, 3.5, 40);
        assert!(event.is_some());
        assert_eq!(event.unwrap().kind, CrashKind::FrontalOrSide);
    }

    #[test]
    fn thresholds_are_honored_from_config() {
        let mut c = CrashClassifier::new(DetectionConfig {
            impact_threshold: 5.0,
            ..DetectionConfig::default()
        });
        feed_g(&mut c, 1.0, 0);
        assert!(feed_g(&mut c, 3.5, 20).is_none(), "below raised threshold");
        assert!(feed_g(&mut c, 5.5, 40).is_some());
    }

    #[test]
    fn noisy_driving_never_triggers() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        // Rough road at 50 Hz: jittery but nowhere near impact level.
        let mut rng = StdRng::seed_from_u64(7);
        let mut c = classifier();
        for i in 0..2000u64 {
            let g = 1.0 + rng.gen_range(-0.15..0.15);
            assert!(feed_g(&mut c, g, i * 20).is_none());
            c.ingest_rotation(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
                i * 20,
            )
            .unwrap();
        }
    }

    #[test]
    fn irregular_sample_intervals_are_fine() {
        // The classifier never assumes a fixed period; only order matters.
        let mut c = classifier();
        feed_g(&mut c, 1.0, 0);
        feed_g(&mut c, 1.0, 3); // burst
        feed_g(&mut c, 1.0, 900); // stall
        let event = feed_g(&mut c, 3.5, 903);
        assert!(event.is_some());
    }
}
