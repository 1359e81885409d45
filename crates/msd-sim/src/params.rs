//! Physical parameters of the mass-spring-damper.

use msd_core::{MASS_FLOOR, Real, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::forcing::ForcingFunction;

/// Mass, damping, stiffness, rest length and external forcing.
///
/// Treated as a value: edits replace the whole struct on the live
/// simulator rather than mutating it between integration stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParameters {
    /// Mass `m` (kg)
    pub mass: Real,
    /// Damping coefficient `c` (N*s/m)
    pub damping: Real,
    /// Spring stiffness `k` (N/m)
    pub stiffness: Real,
    /// Unstretched spring length `L0` (m)
    pub rest_length: Real,
    /// External force
    #[serde(default)]
    pub forcing: ForcingFunction,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 0.2,
            stiffness: 15.0,
            rest_length: 0.5,
            forcing: ForcingFunction::None,
        }
    }
}

impl SystemParameters {
    /// Build validated parameters.
    pub fn new(
        mass: Real,
        damping: Real,
        stiffness: Real,
        rest_length: Real,
        forcing: ForcingFunction,
    ) -> SimResult<Self> {
        let params = Self {
            mass,
            damping,
            stiffness,
            rest_length,
            forcing,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.mass, "mass")?;
        ensure_non_negative(self.damping, "damping")?;
        ensure_non_negative(self.stiffness, "stiffness")?;
        ensure_non_negative(self.rest_length, "rest length")?;
        self.forcing.validate()
    }

    pub fn with_forcing(self, forcing: ForcingFunction) -> Self {
        Self { forcing, ..self }
    }

    /// `a = (F(t) - c*v - k*x) / m`. Caller guarantees `m > 0`.
    pub(crate) fn acceleration_unchecked(&self, t: Real, x: Real, v: Real) -> Real {
        (self.forcing.value(t) - self.damping * v - self.stiffness * x) / self.mass
    }

    /// Acceleration derived from the current parameters, with the mass
    /// floored at [`MASS_FLOOR`] so the result stays finite.
    pub fn acceleration(&self, t: Real, x: Real, v: Real) -> Real {
        let m = self.mass.max(MASS_FLOOR);
        (self.forcing.value(t) - self.damping * v - self.stiffness * x) / m
    }

    /// Undamped natural angular frequency `sqrt(k/m)` (rad/s).
    pub fn natural_frequency(&self) -> Real {
        (self.stiffness.max(0.0) / self.mass.max(MASS_FLOOR)).sqrt()
    }
}
