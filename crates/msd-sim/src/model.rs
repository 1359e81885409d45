//! TransientModel trait and the mass-spring-damper right-hand side.

use msd_core::Real;

use crate::params::SystemParameters;
use crate::state::PhaseState;

/// Trait for first-order dynamic system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Vector-space arithmetic for integration: add states, scale by scalar
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: Real, x: &Self::State) -> Self::State;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: Real) -> Self::State;
}

/// `x' = v`, `v' = (F(t) - c*v - k*x) / m`.
///
/// Only constructed once the step function has checked `m > 0`.
pub(crate) struct MassSpringModel<'a> {
    params: &'a SystemParameters,
}

impl<'a> MassSpringModel<'a> {
    pub(crate) fn new(params: &'a SystemParameters) -> Self {
        Self { params }
    }
}

impl TransientModel for MassSpringModel<'_> {
    type State = PhaseState;

    fn rhs(&self, t: Real, s: &PhaseState) -> PhaseState {
        PhaseState {
            x: s.v,
            v: self.params.acceleration_unchecked(t, s.x, s.v),
        }
    }

    fn add(&self, a: &PhaseState, b: &PhaseState) -> PhaseState {
        PhaseState {
            x: a.x + b.x,
            v: a.v + b.v,
        }
    }

    fn scale(&self, a: &PhaseState, scale: Real) -> PhaseState {
        PhaseState {
            x: a.x * scale,
            v: a.v * scale,
        }
    }
}
