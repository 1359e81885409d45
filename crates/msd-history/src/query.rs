//! Query helpers for the graphing side.

use msd_core::Real;

use crate::buffer::HistoryBuffer;
use crate::types::Channel;

/// Time range and extrema of a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub time_range: (Real, Real),
    pub sample_count: usize,
    /// `(min, max)` displacement over the retained window
    pub displacement_range: (Real, Real),
    /// Largest `|velocity|` over the retained window
    pub peak_speed: Real,
}

/// Summarize the retained samples, `None` when the buffer is empty.
pub fn summarize(history: &HistoryBuffer) -> Option<HistorySummary> {
    let first = history.first()?;
    let latest = history.latest()?;

    let mut x_min = Real::INFINITY;
    let mut x_max = Real::NEG_INFINITY;
    let mut peak_speed: Real = 0.0;
    for s in history.iter() {
        x_min = x_min.min(s.displacement);
        x_max = x_max.max(s.displacement);
        peak_speed = peak_speed.max(s.velocity.abs());
    }

    Some(HistorySummary {
        time_range: (first.time, latest.time),
        sample_count: history.len(),
        displacement_range: (x_min, x_max),
        peak_speed,
    })
}

/// Extract `(time, value)` pairs for one channel.
pub fn series(history: &HistoryBuffer, channel: Channel) -> Vec<(Real, Real)> {
    history.iter().map(|s| (s.time, s.get(channel))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistorySample;

    #[test]
    fn summary_of_empty_is_none() {
        assert!(summarize(&HistoryBuffer::default()).is_none());
    }

    #[test]
    fn summary_extrema() {
        let mut buf = HistoryBuffer::default();
        buf.append(HistorySample::new(0.0, 0.1, 0.0, -1.5));
        buf.append(HistorySample::new(0.5, -0.08, 0.3, 1.2));
        buf.append(HistorySample::new(1.0, 0.05, -0.4, -0.7));

        let summary = summarize(&buf).unwrap();
        assert_eq!(summary.time_range, (0.0, 1.0));
        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.displacement_range, (-0.08, 0.1));
        assert_eq!(summary.peak_speed, 0.4);
    }

    #[test]
    fn series_per_channel() {
        let mut buf = HistoryBuffer::default();
        buf.append(HistorySample::new(0.0, 1.0, 2.0, 3.0));
        buf.append(HistorySample::new(0.1, 4.0, 5.0, 6.0));

        assert_eq!(
            series(&buf, Channel::Velocity),
            vec![(0.0, 2.0), (0.1, 5.0)]
        );
        assert_eq!(
            series(&buf, Channel::Acceleration),
            vec![(0.0, 3.0), (0.1, 6.0)]
        );
    }
}
