//! Time-ordered sample store with a rolling retention window.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use msd_core::Real;
use tracing::warn;

use crate::types::HistorySample;
use crate::{HistoryError, HistoryResult};

/// Retention window used when none is configured (seconds).
pub const DEFAULT_MAX_DURATION_S: Real = 120.0;

/// What [`HistoryBuffer::append`] did with a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Sample was newer than the latest one and was pushed.
    Appended,
    /// Sample had the same time as the latest one and replaced it.
    Coalesced,
    /// Sample was older than the latest one (or had a NaN time) and was dropped.
    Rejected,
}

/// Samples in strictly increasing time order, covering at most
/// `max_duration` seconds back from the newest one.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<HistorySample>,
    max_duration: Real,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self {
            samples: VecDeque::new(),
            max_duration: DEFAULT_MAX_DURATION_S,
        }
    }
}

impl HistoryBuffer {
    pub fn new(max_duration: Real) -> HistoryResult<Self> {
        if !(max_duration.is_finite() && max_duration > 0.0) {
            return Err(HistoryError::InvalidRetention {
                value: max_duration,
            });
        }
        Ok(Self {
            samples: VecDeque::new(),
            max_duration,
        })
    }

    pub fn max_duration(&self) -> Real {
        self.max_duration
    }

    /// Append a sample, then drop everything older than the window.
    ///
    /// Out-of-order samples are rejected; a sample with the same time as
    /// the latest one replaces it.
    pub fn append(&mut self, sample: HistorySample) -> AppendOutcome {
        if sample.time.is_nan() {
            warn!("rejected history sample with NaN time");
            return AppendOutcome::Rejected;
        }
        let latest = self.samples.back().map(|s| s.time);
        let outcome = match latest {
            Some(last) if sample.time < last => {
                warn!(
                    time = sample.time,
                    latest = last,
                    "rejected out-of-order history sample"
                );
                return AppendOutcome::Rejected;
            }
            Some(last) if sample.time == last => {
                if let Some(back) = self.samples.back_mut() {
                    *back = sample;
                }
                AppendOutcome::Coalesced
            }
            _ => {
                self.samples.push_back(sample);
                AppendOutcome::Appended
            }
        };
        self.trim();
        outcome
    }

    /// Drop samples with `time < latest.time - max_duration`.
    fn trim(&mut self) {
        let Some(latest) = self.samples.back() else {
            return;
        };
        let cutoff = latest.time - self.max_duration;
        while self.samples.front().is_some_and(|s| s.time < cutoff) {
            self.samples.pop_front();
        }
    }

    /// Sample closest in time to `t`. Ties go to the earlier sample.
    pub fn nearest(&self, t: Real) -> Option<&HistorySample> {
        if self.samples.is_empty() {
            return None;
        }
        let idx = self.samples.partition_point(|s| s.time < t);
        let after = self.samples.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.samples.get(i));
        match (before, after) {
            (Some(b), Some(a)) => {
                if (a.time - t).abs() < (t - b.time).abs() {
                    Some(a)
                } else {
                    Some(b)
                }
            }
            (Some(b), None) => Some(b),
            (None, a) => a,
        }
    }

    /// Remove samples newer than `t`.
    pub fn truncate_after(&mut self, t: Real) {
        let keep = self.samples.partition_point(|s| s.time <= t);
        self.samples.truncate(keep);
    }

    /// Clear all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Newest sample time, or 0 when empty.
    pub fn max_time(&self) -> Real {
        self.samples.back().map(|s| s.time).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&HistorySample> {
        self.samples.front()
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistorySample> + ExactSizeIterator {
        self.samples.iter()
    }

    /// Samples whose time lies in `range`.
    pub fn samples_in(&self, range: RangeInclusive<Real>) -> impl Iterator<Item = &HistorySample> {
        let start = self.samples.partition_point(|s| s.time < *range.start());
        let end = self.samples.partition_point(|s| s.time <= *range.end());
        self.samples.range(start..end.max(start))
    }
}
