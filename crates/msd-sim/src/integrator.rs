//! Fixed-step time integrators.

use msd_core::Real;
use serde::{Deserialize, Serialize};

use crate::model::TransientModel;

/// One fixed step of an explicit scheme over a [`TransientModel`].
pub trait Integrator {
    fn step<M: TransientModel>(&self, model: &M, t: Real, x: &M::State, dt: Real) -> M::State;
}

/// Classical fourth-order Runge-Kutta.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(&self, model: &M, t: Real, x: &M::State, dt: Real) -> M::State {
        let half = 0.5 * dt;
        let offset = |k: &M::State, h: Real| model.add(x, &model.scale(k, h));

        let k1 = model.rhs(t, x);
        let k2 = model.rhs(t + half, &offset(&k1, half));
        let k3 = model.rhs(t + half, &offset(&k2, half));
        let k4 = model.rhs(t + dt, &offset(&k3, dt));

        // Endpoint slopes weigh 1/6, midpoint slopes 2/6.
        let ends = model.add(&k1, &k4);
        let mids = model.add(&k2, &k3);
        let slope = model.add(&ends, &model.scale(&mids, 2.0));
        offset(&slope, dt / 6.0)
    }
}

/// Explicit Euler: one slope evaluation per step. Kept as a baseline to
/// compare RK4 against; it gains energy on an undamped oscillator.
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(&self, model: &M, t: Real, x: &M::State, dt: Real) -> M::State {
        let xdot = model.rhs(t, x);
        model.add(x, &model.scale(&xdot, dt))
    }
}

/// Integrator selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    #[default]
    RK4,
    ForwardEuler,
}

impl IntegratorType {
    pub fn step<M: TransientModel>(self, model: &M, t: Real, x: &M::State, dt: Real) -> M::State {
        match self {
            IntegratorType::RK4 => RK4.step(model, t, x, dt),
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, x, dt),
        }
    }
}
