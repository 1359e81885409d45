//! Damping-ratio presets.
//!
//! Presets are recomputed on demand from `(mass, stiffness)` so callers
//! always get damping consistent with the values they pass in.

use msd_core::{MASS_FLOOR, Real, Tolerances, nearly_equal};
use serde::{Deserialize, Serialize};

use crate::forcing::ForcingFunction;
use crate::params::SystemParameters;

/// Mass used when a preset is requested without one.
pub const DEFAULT_PRESET_MASS: Real = 0.1;
/// Stiffness used when a preset is requested without one.
pub const DEFAULT_PRESET_STIFFNESS: Real = 10.0;
/// Rest length fixed by every preset.
pub const PRESET_REST_LENGTH: Real = 0.5;
/// Initial displacement fixed by every preset.
pub const PRESET_Y0: Real = 0.1;
/// Initial velocity fixed by every preset.
pub const PRESET_V0: Real = 0.0;

/// Critical damping coefficient `2*sqrt(m*k)`.
pub fn critical_damping(mass: Real, stiffness: Real) -> Real {
    2.0 * (mass * stiffness).sqrt()
}

/// Damping category relative to critical damping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampingCategory {
    Overdamped,
    CriticallyDamped,
    Underdamped,
    Undamped,
}

impl DampingCategory {
    pub const ALL: [DampingCategory; 4] = [
        DampingCategory::Overdamped,
        DampingCategory::CriticallyDamped,
        DampingCategory::Underdamped,
        DampingCategory::Undamped,
    ];

    /// Multiple of critical damping for this category.
    pub fn ratio(self) -> Real {
        match self {
            DampingCategory::Overdamped => 1.5,
            DampingCategory::CriticallyDamped => 1.0,
            DampingCategory::Underdamped => 0.2,
            DampingCategory::Undamped => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DampingCategory::Overdamped => "Over",
            DampingCategory::CriticallyDamped => "Crit",
            DampingCategory::Underdamped => "Under",
            DampingCategory::Undamped => "Undamped",
        }
    }

    /// Damping coefficient for `(mass, stiffness)`.
    pub fn damping(self, mass: Real, stiffness: Real) -> Real {
        match self {
            DampingCategory::Undamped => 0.0,
            _ => self.ratio() * critical_damping(mass, stiffness),
        }
    }
}

/// Named parameter set plus initial conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub category: DampingCategory,
    pub params: SystemParameters,
    pub y0: Real,
    pub v0: Real,
}

/// Stateless catalog of damping presets.
pub struct PresetCatalog;

impl PresetCatalog {
    pub fn preset(category: DampingCategory, mass: Real, stiffness: Real) -> Preset {
        Preset {
            name: category.name(),
            category,
            params: SystemParameters {
                mass,
                damping: category.damping(mass, stiffness),
                stiffness,
                rest_length: PRESET_REST_LENGTH,
                forcing: ForcingFunction::None,
            },
            y0: PRESET_Y0,
            v0: PRESET_V0,
        }
    }

    /// Preset at the default `(mass, stiffness)`.
    pub fn default_preset(category: DampingCategory) -> Preset {
        Self::preset(category, DEFAULT_PRESET_MASS, DEFAULT_PRESET_STIFFNESS)
    }

    pub fn overdamped(mass: Real, stiffness: Real) -> Preset {
        Self::preset(DampingCategory::Overdamped, mass, stiffness)
    }

    pub fn critically_damped(mass: Real, stiffness: Real) -> Preset {
        Self::preset(DampingCategory::CriticallyDamped, mass, stiffness)
    }

    pub fn underdamped(mass: Real, stiffness: Real) -> Preset {
        Self::preset(DampingCategory::Underdamped, mass, stiffness)
    }

    pub fn undamped(mass: Real, stiffness: Real) -> Preset {
        Self::preset(DampingCategory::Undamped, mass, stiffness)
    }

    /// Every default preset, in picker order.
    pub fn all() -> [Preset; 4] {
        DampingCategory::ALL.map(Self::default_preset)
    }

    /// Category whose default preset has the same mass, damping and
    /// stiffness as `params`.
    pub fn identify(params: &SystemParameters) -> Option<DampingCategory> {
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-6,
        };
        Self::all().into_iter().find_map(|p| {
            let same = nearly_equal(p.params.mass, params.mass, tol)
                && nearly_equal(p.params.damping, params.damping, tol)
                && nearly_equal(p.params.stiffness, params.stiffness, tol);
            same.then_some(p.category)
        })
    }

    /// `c / c_crit`, or `None` when critical damping is zero.
    pub fn damping_ratio(mass: Real, damping: Real, stiffness: Real) -> Option<Real> {
        let c_crit = critical_damping(mass.max(MASS_FLOOR), stiffness.max(0.0));
        if c_crit > 0.0 {
            Some(damping / c_crit)
        } else {
            None
        }
    }
}
