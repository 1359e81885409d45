//! Dynamic state of the oscillator.

use msd_core::Real;
use serde::{Deserialize, Serialize};

/// Time, displacement from rest and velocity of the mass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    /// Simulation time (s)
    pub time: Real,
    /// Displacement from rest length (m)
    pub displacement: Real,
    /// Velocity (m/s)
    pub velocity: Real,
}

impl SystemState {
    pub fn new(time: Real, displacement: Real, velocity: Real) -> Self {
        Self {
            time,
            displacement,
            velocity,
        }
    }

    /// State at `t = 0` with the given initial conditions.
    pub fn initial(displacement: Real, velocity: Real) -> Self {
        Self::new(0.0, displacement, velocity)
    }

    /// `(x, v)` pair integrated by the step function.
    pub fn phase(&self) -> PhaseState {
        PhaseState {
            x: self.displacement,
            v: self.velocity,
        }
    }
}

/// Position/velocity pair, the integrated part of [`SystemState`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseState {
    pub x: Real,
    pub v: Real,
}

/// Initial conditions applied when an integrator is (re)built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    /// Initial displacement `y0` (m)
    pub y0: Real,
    /// Initial velocity `v0` (m/s)
    pub v0: Real,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self { y0: 0.1, v0: 0.0 }
    }
}

impl From<InitialConditions> for SystemState {
    fn from(ic: InitialConditions) -> Self {
        SystemState::initial(ic.y0, ic.v0)
    }
}
