//! External forcing applied to the mass.
//!
//! A [`ForcingFunction`] is a pure function of time. Impulses never show up
//! in [`ForcingFunction::value`]; they are delivered as a one-off velocity
//! kick by whichever integration step straddles the trigger time.

use std::f64::consts::TAU;

use msd_core::{Real, ensure_finite, ensure_non_negative};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Shape of a harmonic drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Sine,
    Cosine,
}

/// Discriminant of [`ForcingFunction`], used by pickers that switch the
/// forcing type before its parameters are filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcingKind {
    #[default]
    None,
    Harmonic,
    Step,
    Impulse,
    Constant,
}

/// External force as a function of time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForcingFunction {
    /// No external force.
    #[default]
    None,
    /// `amplitude * sin(2*pi*f*t + phase)` (or cosine).
    Harmonic {
        amplitude: Real,
        frequency_hz: Real,
        #[serde(default)]
        phase: Real,
        #[serde(default)]
        waveform: Waveform,
    },
    /// Constant force.
    Constant { value: Real },
    /// Zero before `trigger_time`, `magnitude` at and after it.
    Step { magnitude: Real, trigger_time: Real },
    /// Instantaneous momentum change of `magnitude` at `trigger_time`.
    Impulse { magnitude: Real, trigger_time: Real },
}

impl ForcingFunction {
    pub fn harmonic(amplitude: Real, frequency_hz: Real, phase: Real, waveform: Waveform) -> Self {
        Self::Harmonic {
            amplitude,
            frequency_hz,
            phase,
            waveform,
        }
    }

    pub fn constant(value: Real) -> Self {
        Self::Constant { value }
    }

    pub fn step(magnitude: Real, trigger_time: Real) -> Self {
        Self::Step {
            magnitude,
            trigger_time,
        }
    }

    pub fn impulse(magnitude: Real, trigger_time: Real) -> Self {
        Self::Impulse {
            magnitude,
            trigger_time,
        }
    }

    pub fn kind(&self) -> ForcingKind {
        match self {
            Self::None => ForcingKind::None,
            Self::Harmonic { .. } => ForcingKind::Harmonic,
            Self::Constant { .. } => ForcingKind::Constant,
            Self::Step { .. } => ForcingKind::Step,
            Self::Impulse { .. } => ForcingKind::Impulse,
        }
    }

    /// Continuous force at time `t`. Always 0 for impulses.
    pub fn value(&self, t: Real) -> Real {
        match *self {
            Self::None => 0.0,
            Self::Harmonic {
                amplitude,
                frequency_hz,
                phase,
                waveform,
            } => {
                let theta = TAU * frequency_hz * t + phase;
                match waveform {
                    Waveform::Sine => amplitude * theta.sin(),
                    Waveform::Cosine => amplitude * theta.cos(),
                }
            }
            Self::Constant { value } => value,
            Self::Step {
                magnitude,
                trigger_time,
            } => {
                if t >= trigger_time {
                    magnitude
                } else {
                    0.0
                }
            }
            Self::Impulse { .. } => 0.0,
        }
    }

    /// Impulse magnitude if the trigger falls inside `[start, start + dt]`,
    /// widened on both sides by `max(1e-4, dt / 4)`.
    pub fn impulse_kick(&self, start: Real, dt: Real) -> Option<Real> {
        let Self::Impulse {
            magnitude,
            trigger_time,
        } = *self
        else {
            return None;
        };
        let end = start + dt;
        let tolerance = impulse_tolerance(dt);
        if trigger_time + tolerance >= start && trigger_time - tolerance <= end {
            Some(magnitude)
        } else {
            None
        }
    }

    /// Check that every parameter is finite and times are non-negative.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Self::None => {}
            Self::Harmonic {
                amplitude,
                frequency_hz,
                phase,
                ..
            } => {
                ensure_finite(amplitude, "harmonic amplitude")?;
                ensure_non_negative(frequency_hz, "harmonic frequency")?;
                ensure_finite(phase, "harmonic phase")?;
            }
            Self::Constant { value } => {
                ensure_finite(value, "constant force")?;
            }
            Self::Step {
                magnitude,
                trigger_time,
            } => {
                ensure_finite(magnitude, "step magnitude")?;
                ensure_non_negative(trigger_time, "step time")?;
            }
            Self::Impulse {
                magnitude,
                trigger_time,
            } => {
                ensure_finite(magnitude, "impulse magnitude")?;
                ensure_non_negative(trigger_time, "impulse time")?;
            }
        }
        Ok(())
    }
}

/// Half-width added around a step interval when looking for an impulse.
pub fn impulse_tolerance(dt: Real) -> Real {
    (0.25 * dt).max(1e-4)
}
