//! Session configuration schema.

use msd_core::{Range, Real};
use msd_sim::{InitialConditions, IntegratorType, SystemParameters};
use serde::{Deserialize, Serialize};

/// Everything a session needs besides live user edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub version: u32,
    /// Nominal scheduler period (s); also the floor for a tick's step.
    pub tick_interval_s: Real,
    /// Upper clamp for a tick's step (s).
    pub max_step_s: Real,
    /// History retention window (s).
    pub history_max_duration_s: Real,
    /// Parameters restored by `reset()`.
    pub default_parameters: SystemParameters,
    /// Initial conditions restored by `reset()`.
    pub initial_conditions: InitialConditions,
    /// Lower bound on the rendered spring height (m).
    pub min_display_height: Real,
    /// Slider ranges applied to edited parameters, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<ParameterLimits>,
    pub integrator: IntegratorType,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            version: crate::LATEST_VERSION,
            tick_interval_s: 1.0 / 60.0,
            max_step_s: 0.05,
            history_max_duration_s: 120.0,
            default_parameters: SystemParameters::default(),
            initial_conditions: InitialConditions::default(),
            min_display_height: 0.05,
            limits: None,
            integrator: IntegratorType::RK4,
        }
    }
}

/// Allowed ranges for user-edited mass, damping and stiffness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParameterLimits {
    pub mass: Range,
    pub damping: Range,
    pub stiffness: Range,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            mass: Range::new(0.1, 5.0),
            damping: Range::new(0.0, 5.0),
            stiffness: Range::new(10.0, 500.0),
        }
    }
}

impl ParameterLimits {
    /// Clamp mass, damping and stiffness into range; other fields pass through.
    pub fn apply(&self, params: SystemParameters) -> SystemParameters {
        SystemParameters {
            mass: self.mass.clamp(params.mass),
            damping: self.damping.clamp(params.damping),
            stiffness: self.stiffness.clamp(params.stiffness),
            ..params
        }
    }
}
