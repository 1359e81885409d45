//! Retention window and nearest-sample lookup over long runs.

use msd_history::{AppendOutcome, HistoryBuffer, HistorySample};
use proptest::prelude::*;

fn sample(t: f64) -> HistorySample {
    HistorySample::new(t, t.sin(), t.cos(), -t.sin())
}

#[test]
fn default_window_is_two_minutes() {
    let mut buf = HistoryBuffer::default();
    assert_eq!(buf.max_duration(), 120.0);

    // 200 s at 60 Hz
    for i in 0..12_000 {
        buf.append(sample(i as f64 / 60.0));
    }
    let first = buf.first().unwrap().time;
    let latest = buf.latest().unwrap().time;
    assert!(latest - first <= 120.0 + 1e-9);
    assert!(latest - first > 119.9);
    assert!(buf.len() <= 120 * 60 + 1);
}

#[test]
fn nearest_after_trim_never_returns_dropped_sample() {
    let mut buf = HistoryBuffer::new(10.0).unwrap();
    for i in 0..1000 {
        buf.append(sample(i as f64 * 0.05));
    }
    let oldest = buf.first().unwrap().time;
    assert_eq!(buf.nearest(0.0).unwrap().time, oldest);
}

proptest! {
    #[test]
    fn oldest_within_window_of_newest(
        steps in prop::collection::vec(0.001_f64..2.0, 1..500),
        window in 0.5_f64..20.0,
    ) {
        let mut buf = HistoryBuffer::new(window).unwrap();
        let mut t = 0.0;
        for dt in steps {
            t += dt;
            prop_assert_eq!(buf.append(sample(t)), AppendOutcome::Appended);
            let first = buf.first().unwrap().time;
            let latest = buf.latest().unwrap().time;
            prop_assert!(latest - first <= window + 1e-9);
        }
    }

    #[test]
    fn times_stay_strictly_increasing(times in prop::collection::vec(0.0_f64..100.0, 1..300)) {
        let mut buf = HistoryBuffer::default();
        for t in times {
            buf.append(sample(t));
        }
        let ts: Vec<f64> = buf.iter().map(|s| s.time).collect();
        prop_assert!(ts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn nearest_is_minimal(
        steps in prop::collection::vec(0.001_f64..1.0, 1..200),
        query in -10.0_f64..250.0,
    ) {
        let mut buf = HistoryBuffer::default();
        let mut t = 0.0;
        for dt in steps {
            t += dt;
            buf.append(sample(t));
        }
        let best = buf.nearest(query).unwrap();
        let best_dist = (best.time - query).abs();
        for s in buf.iter() {
            prop_assert!(best_dist <= (s.time - query).abs());
        }
    }
}
