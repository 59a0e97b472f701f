use crate::foundation::error::{DrillError, DrillResult};

/// Audio-time offset (milliseconds) of every beat, in beat order.
///
/// Times are monotonically non-decreasing. Beat `i` of the show is heard at `beat_time(i)`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedBeats {
    times: Vec<f64>,
}

impl TimedBeats {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from beat lengths: beat 0 is at 0 ms and beat `i` at the sum of the first `i`
    /// lengths.
    pub fn from_durations(durations_ms: &[f64]) -> DrillResult<Self> {
        let mut times = Vec::with_capacity(durations_ms.len() + 1);
        let mut t = 0.0;
        times.push(t);
        for (i, &d) in durations_ms.iter().enumerate() {
            if !d.is_finite() || d < 0.0 {
                return Err(DrillError::validation(format!(
                    "beat duration {i} must be finite and >= 0, got {d}"
                )));
            }
            t += d;
            times.push(t);
        }
        Ok(Self { times })
    }

    /// `count` beats evenly spaced at `bpm`, starting at 0 ms.
    pub fn from_tempo(bpm: f64, count: usize) -> DrillResult<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(DrillError::validation("tempo must be finite and > 0"));
        }
        let beat_ms = 60_000.0 / bpm;
        Ok(Self {
            times: (0..count).map(|i| i as f64 * beat_ms).collect(),
        })
    }

    /// Insert one beat time, keeping the table sorted.
    pub fn add_beat(&mut self, time_ms: f64) {
        self.add_beats(&[time_ms]);
    }

    /// Merge an already sorted list of beat times into the table.
    ///
    /// Equal times keep existing entries first.
    pub fn add_beats(&mut self, sorted_ms: &[f64]) {
        if sorted_ms.is_empty() {
            return;
        }
        let mut merged = Vec::with_capacity(self.times.len() + sorted_ms.len());
        let (mut i, mut j) = (0, 0);
        while i < self.times.len() && j < sorted_ms.len() {
            if self.times[i] <= sorted_ms[j] {
                merged.push(self.times[i]);
                i += 1;
            } else {
                merged.push(sorted_ms[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&self.times[i..]);
        merged.extend_from_slice(&sorted_ms[j..]);
        self.times = merged;
    }

    /// Time of beat `beat_index`.
    pub fn beat_time(&self, beat_index: usize) -> Option<f64> {
        self.times.get(beat_index).copied()
    }

    /// Last beat whose time is at or before `time_ms`.
    ///
    /// `None` when `time_ms` precedes the first beat.
    pub fn beat_at(&self, time_ms: f64) -> Option<usize> {
        self.times.partition_point(|&t| t <= time_ms).checked_sub(1)
    }

    /// Number of beats.
    pub fn count(&self) -> usize {
        self.times.len()
    }

    /// Whether the table has no beats.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last beat.
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// All beat times in order.
    pub fn times(&self) -> &[f64] {
        &self.times
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/beats.rs"]
mod tests;
