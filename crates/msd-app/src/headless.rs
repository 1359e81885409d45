//! Drivers that stand in for a UI scheduler.

use std::thread;
use std::time::{Duration, Instant};

use msd_core::Real;
use tracing::info;

use crate::clock::{ManualClock, SystemClock};
use crate::events::TickReport;
use crate::session::SimulationSession;

/// Tick a manually clocked session at its nominal interval until `duration_s`
/// of simulated time has passed. Starts the session if needed.
pub fn run_headless(
    session: &mut SimulationSession<ManualClock>,
    clock: &ManualClock,
    duration_s: Real,
) -> Vec<TickReport> {
    if !session.is_running() {
        session.start();
    }
    let interval = session.config().tick_interval_s;
    let t_stop = session.current_state().time + duration_s.max(0.0);
    let mut reports = Vec::new();
    while session.current_state().time + 0.5 * interval < t_stop {
        clock.advance_secs(interval);
        match session.tick() {
            Some(report) => reports.push(report),
            None => break,
        }
    }
    info!(ticks = reports.len(), t = session.current_state().time, "headless run finished");
    reports
}

/// Tick a wall-clocked session in real time for `duration`, sleeping one
/// tick interval between ticks.
pub fn run_realtime(
    session: &mut SimulationSession<SystemClock>,
    duration: Duration,
) -> Vec<TickReport> {
    if !session.is_running() {
        session.start();
    }
    let interval = Duration::from_secs_f64(session.config().tick_interval_s);
    let started = Instant::now();
    let mut reports = Vec::new();
    while started.elapsed() < duration {
        thread::sleep(interval);
        match session.tick() {
            Some(report) => reports.push(report),
            None => break,
        }
    }
    info!(ticks = reports.len(), t = session.current_state().time, "realtime run finished");
    reports
}
