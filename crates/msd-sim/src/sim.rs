//! Headless fixed-step runner and result recording.

use msd_core::Real;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::simulator::MassSpringSimulator;
use crate::state::SystemState;

/// Step size, stop time and recording stride of a batch run.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Step (s)
    pub dt: Real,
    /// Stop once the simulator clock reaches this time (s)
    pub t_end: Real,
    /// Hard cap on steps taken, whatever `t_end` says
    pub max_steps: usize,
    /// Keep one snapshot out of this many steps
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
        }
    }
}

/// Snapshots collected by [`run_sim`]. The first entry is the starting
/// state and the last is always the final one.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    pub states: Vec<SystemState>,
    /// Acceleration at each snapshot, same length as `states`
    pub accelerations: Vec<Real>,
    pub steps: usize,
}

impl SimRecord {
    fn push(&mut self, sim: &MassSpringSimulator) {
        self.states.push(*sim.state());
        self.accelerations.push(sim.acceleration());
    }

    pub fn last(&self) -> Option<&SystemState> {
        self.states.last()
    }
}

/// Integrate `sim` from its current state until `t_end` with a fixed step.
pub fn run_sim(sim: &mut MassSpringSimulator, opts: &SimOptions) -> SimResult<SimRecord> {
    if !(opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if !(opts.t_end >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let mut record = SimRecord::default();
    record.push(sim);

    // Half-step slack so accumulated rounding does not add a step.
    let t_stop = opts.t_end - 0.5 * opts.dt;
    let mut step = 0;
    while sim.state().time < t_stop && step < opts.max_steps {
        sim.step(opts.dt);
        step += 1;

        if step % opts.record_every == 0 {
            record.push(sim);
        }
    }

    // Final state even when the stride skipped it.
    if step % opts.record_every != 0 {
        record.push(sim);
    }
    record.steps = step;

    debug!(
        steps = step,
        t = sim.state().time,
        recorded = record.states.len(),
        "batch run finished"
    );
    Ok(record)
}
