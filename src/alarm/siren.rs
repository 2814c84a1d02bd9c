use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

/// Two-tone siren generator, the crate's stand-in for a platform alarm
/// ringtone. Alternates between a low and a high tone twice a second,
/// looping until the sink is stopped.
pub struct SirenTone {
    low_freq: f32,
    high_freq: f32,
    sample_rate: u32,
    num_sample: usize,
}

impl SirenTone {
    pub fn new() -> Self {
        Self {
            low_freq: 650.0,
            high_freq: 950.0,
            sample_rate: 44100,
            num_sample: 0,
        }
    }
}

impl Default for SirenTone {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SirenTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.num_sample = self.num_sample.wrapping_add(1);

        let t = self.num_sample as f32 / self.sample_rate as f32;

        // Switch tone every half second
        let freq = if (t * 2.0) as u32 % 2 == 0 {
            self.low_freq
        } else {
            self.high_freq
        };

        let sample = (2.0 * PI * freq * t).sin();
        Some(sample * 0.25) // Lower amplitude to prevent clipping
    }
}

impl Source for SirenTone {
    fn current_frame_len(&self) -> Option<usize> {
        None // Infinite stream
    }

    fn channels(&self) -> u16 {
        1 // Mono
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None // Loops until stopped
    }
}
