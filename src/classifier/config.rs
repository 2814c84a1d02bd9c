use serde::{Deserialize, Serialize};

/// Tunable thresholds for crash detection.
///
/// These are field-tuning knobs, not constants: the defaults below were
/// revised once already after road testing, so hosts load them through the
/// settings store rather than baking them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum G-force magnitude to consider an impact at all.
    pub impact_threshold: f64,

    /// Minimum single-step change in G-force between consecutive samples.
    /// Note this is a per-sample backward difference, not a time-normalized
    /// derivative, so its sensitivity tracks the sensor sampling rate.
    pub jerk_threshold: f64,

    /// Readings below this are treated as weightlessness: any such reading
    /// in the recent window reclassifies an impact as a dropped phone.
    pub freefall_threshold: f64,

    /// Angular rate (rad/s) above which the recent window indicates the
    /// vehicle was tumbling or rolling.
    pub rotation_threshold: f64,

    /// Capacity of both history windows, in samples (~1.2s at 50 Hz).
    pub history_size: usize,

    /// Minimum gap between two emitted crash events.
    pub cooldown_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            impact_threshold: 2.9,
            jerk_threshold: 1.5,
            freefall_threshold: 0.8,
            rotation_threshold: 5.0,
            history_size: 60,
            cooldown_ms: 3000,
        }
    }
}
