//! One-step advance of the oscillator, with impulse pre-application.

use msd_core::Real;

use crate::forcing::ForcingFunction;
use crate::integrator::IntegratorType;
use crate::model::MassSpringModel;
use crate::params::SystemParameters;
use crate::state::{PhaseState, SystemState};

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StepOutcome {
    pub state: SystemState,
    /// Impulse magnitude delivered at the start of this step, if any.
    pub impulse: Option<Real>,
}

/// Advance `state` by `dt` with classical RK4.
///
/// With `dt <= 0` or `mass <= 0` only time moves (by `max(0, dt)`).
/// An impulse whose trigger falls inside the step is added to the
/// starting velocity once, before any RK stage is evaluated.
pub fn step_state(state: &SystemState, params: &SystemParameters, dt: Real) -> SystemState {
    advance(state, params, dt, IntegratorType::RK4, true).state
}

pub(crate) fn advance(
    state: &SystemState,
    params: &SystemParameters,
    dt: Real,
    integrator: IntegratorType,
    allow_impulse: bool,
) -> StepOutcome {
    if !(dt > 0.0 && params.mass > 0.0) {
        return StepOutcome {
            state: SystemState {
                time: state.time + dt.max(0.0),
                ..*state
            },
            impulse: None,
        };
    }

    let t0 = state.time;
    let impulse = if allow_impulse {
        params.forcing.impulse_kick(t0, dt)
    } else {
        None
    };

    let mut start = state.phase();
    if let Some(j) = impulse {
        start.v += j / params.mass;
    }

    let model = MassSpringModel::new(params);
    let PhaseState { x, v } = integrator.step(&model, t0, &start, dt);

    StepOutcome {
        state: SystemState {
            time: t0 + dt,
            displacement: x,
            velocity: v,
        },
        impulse,
    }
}

/// Impulse already applied, and the end time of the step that applied it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DeliveredImpulse {
    forcing: ForcingFunction,
    step_end: Real,
}

/// Single-owner simulator: parameters plus the state they drive.
///
/// Keeps track of the impulse it has already delivered so that a trigger
/// lying within tolerance of a step boundary is not applied by both
/// neighbouring steps.
#[derive(Debug, Clone)]
pub struct MassSpringSimulator {
    pub params: SystemParameters,
    state: SystemState,
    integrator: IntegratorType,
    delivered_impulse: Option<DeliveredImpulse>,
}

impl Default for MassSpringSimulator {
    fn default() -> Self {
        Self::new(SystemParameters::default())
    }
}

impl MassSpringSimulator {
    pub fn new(params: SystemParameters) -> Self {
        Self {
            params,
            state: SystemState::default(),
            integrator: IntegratorType::RK4,
            delivered_impulse: None,
        }
    }

    pub fn with_state(params: SystemParameters, state: SystemState) -> Self {
        let mut sim = Self::new(params);
        sim.state = state;
        sim
    }

    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn integrator(&self) -> IntegratorType {
        self.integrator
    }

    /// Replace parameters without touching time or state.
    pub fn set_params(&mut self, params: SystemParameters) {
        self.params = params;
    }

    /// Advance by `dt`. Returns the impulse delivered during this step.
    pub fn step(&mut self, dt: Real) -> Option<Real> {
        let allow_impulse = self
            .delivered_impulse
            .is_none_or(|d| d.forcing != self.params.forcing);
        let outcome = advance(
            &self.state,
            &self.params,
            dt,
            self.integrator,
            allow_impulse,
        );
        if outcome.impulse.is_some() {
            self.delivered_impulse = Some(DeliveredImpulse {
                forcing: self.params.forcing,
                step_end: outcome.state.time,
            });
        }
        self.state = outcome.state;
        outcome.impulse
    }

    /// Reseed time and state. Forgets any delivered impulse.
    pub fn reset(&mut self, time: Real, displacement: Real, velocity: Real) {
        self.state = SystemState::new(time, displacement, velocity);
        self.delivered_impulse = None;
    }

    /// Move to a previously recorded state, keeping parameters.
    ///
    /// A delivered impulse stays delivered when `state` lies at or after the
    /// end of the step that applied it, and is re-armed when `state` lies
    /// before that step.
    pub fn reseed(&mut self, state: SystemState) {
        if self
            .delivered_impulse
            .is_some_and(|d| state.time < d.step_end)
        {
            self.delivered_impulse = None;
        }
        self.state = state;
    }

    /// Acceleration at the current state under the current parameters.
    pub fn acceleration(&self) -> Real {
        self.params.acceleration(
            self.state.time,
            self.state.displacement,
            self.state.velocity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_oscillator() -> SystemParameters {
        SystemParameters {
            mass: 1.0,
            damping: 0.0,
            stiffness: 1.0,
            rest_length: 0.0,
            forcing: ForcingFunction::None,
        }
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let s = SystemState::new(1.0, 0.3, -0.2);
        let next = step_state(&s, &unit_oscillator(), 0.0);
        assert_eq!(next, s);
    }

    #[test]
    fn negative_dt_does_not_rewind_time() {
        let s = SystemState::new(1.0, 0.3, -0.2);
        let next = step_state(&s, &unit_oscillator(), -0.5);
        assert_eq!(next, s);
    }

    #[test]
    fn nan_dt_is_a_no_op() {
        let s = SystemState::new(1.0, 0.3, -0.2);
        let next = step_state(&s, &unit_oscillator(), Real::NAN);
        assert_eq!(next, s);
    }

    #[test]
    fn zero_mass_only_advances_time() {
        let params = SystemParameters {
            mass: 0.0,
            ..unit_oscillator()
        };
        let s = SystemState::new(0.0, 0.1, 0.0);
        let next = step_state(&s, &params, 0.01);
        assert_eq!(next.time, 0.01);
        assert_eq!(next.displacement, 0.1);
        assert_eq!(next.velocity, 0.0);
    }

    #[test]
    fn equilibrium_stays_put() {
        let s = SystemState::new(0.0, 0.0, 0.0);
        let next = step_state(&s, &unit_oscillator(), 0.01);
        assert_eq!(next.displacement, 0.0);
        assert_eq!(next.velocity, 0.0);
    }

    #[test]
    fn constant_force_settles_at_static_deflection() {
        // x_ss = F / k
        let params = SystemParameters {
            mass: 1.0,
            damping: 4.0,
            stiffness: 4.0,
            rest_length: 0.0,
            forcing: ForcingFunction::constant(2.0),
        };
        let mut sim = MassSpringSimulator::new(params);
        for _ in 0..2000 {
            sim.step(0.01);
        }
        assert!((sim.state().displacement - 0.5).abs() < 1e-4);
    }

    #[test]
    fn impulse_is_applied_before_stages() {
        let params = SystemParameters {
            forcing: ForcingFunction::impulse(2.0, 0.005),
            ..unit_oscillator()
        };
        let s = SystemState::new(0.0, 0.0, 0.0);
        let out = advance(&s, &params, 0.01, IntegratorType::RK4, true);
        assert_eq!(out.impulse, Some(2.0));
        // Starting velocity 2.0, so x ~ 2.0 * dt after one short step.
        assert!((out.state.displacement - 0.02).abs() < 1e-4);
    }

    #[test]
    fn boundary_impulse_is_delivered_once_by_simulator() {
        // Trigger lands exactly on a step boundary: both neighbouring
        // windows contain it, the simulator must only apply it once.
        let params = SystemParameters {
            mass: 2.0,
            damping: 0.0,
            stiffness: 0.0,
            rest_length: 0.0,
            forcing: ForcingFunction::impulse(4.0, 0.5),
        };
        let mut sim = MassSpringSimulator::new(params);
        let mut kicks = 0;
        for _ in 0..100 {
            if sim.step(0.01).is_some() {
                kicks += 1;
            }
        }
        assert_eq!(kicks, 1);
        assert!((sim.state().velocity - 2.0).abs() < 1e-12);
    }

    #[test]
    fn reset_rearms_impulse() {
        let params = SystemParameters {
            forcing: ForcingFunction::impulse(1.0, 0.0),
            ..unit_oscillator()
        };
        let mut sim = MassSpringSimulator::new(params);
        assert_eq!(sim.step(0.01), Some(1.0));
        sim.reset(0.0, 0.0, 0.0);
        assert_eq!(sim.step(0.01), Some(1.0));
    }

    #[test]
    fn reseed_after_kick_keeps_it_delivered() {
        let params = SystemParameters {
            forcing: ForcingFunction::impulse(1.0, 0.05),
            ..unit_oscillator()
        };
        let mut sim = MassSpringSimulator::new(params);
        let mut kick_end = None;
        for _ in 0..10 {
            if sim.step(0.01).is_some() {
                kick_end = Some(sim.state().time);
            }
        }
        let kick_end = kick_end.unwrap();

        // Back to the state recorded right after the kick: the next step's
        // window still contains the trigger but must not kick again.
        sim.reseed(SystemState::new(kick_end, 0.0, 1.0));
        assert_eq!(sim.step(0.01), None);
    }

    #[test]
    fn reseed_before_kick_rearms_it() {
        let params = SystemParameters {
            forcing: ForcingFunction::impulse(1.0, 0.05),
            ..unit_oscillator()
        };
        let mut sim = MassSpringSimulator::new(params);
        for _ in 0..10 {
            sim.step(0.01);
        }
        sim.reseed(SystemState::new(0.02, 0.0, 0.0));
        let kicks = (0..10).filter(|_| sim.step(0.01).is_some()).count();
        assert_eq!(kicks, 1);
    }

    #[test]
    fn set_params_keeps_state() {
        let mut sim = MassSpringSimulator::with_state(
            unit_oscillator(),
            SystemState::new(0.0, 1.0, 0.0),
        );
        sim.step(0.1);
        let before = *sim.state();
        sim.set_params(SystemParameters {
            stiffness: 10.0,
            ..unit_oscillator()
        });
        assert_eq!(*sim.state(), before);
        assert_eq!(sim.params.stiffness, 10.0);
    }
}
