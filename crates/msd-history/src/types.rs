//! History sample types.

use std::fmt;
use std::str::FromStr;

use msd_core::Real;
use serde::{Deserialize, Serialize};

use crate::HistoryError;

/// One recorded point of the trajectory.
///
/// Acceleration is derived from the parameters in force when the sample
/// was taken, not integrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub time: Real,
    pub displacement: Real,
    pub velocity: Real,
    pub acceleration: Real,
}

impl HistorySample {
    pub fn new(time: Real, displacement: Real, velocity: Real, acceleration: Real) -> Self {
        Self {
            time,
            displacement,
            velocity,
            acceleration,
        }
    }

    pub fn get(&self, channel: Channel) -> Real {
        match channel {
            Channel::Displacement => self.displacement,
            Channel::Velocity => self.velocity,
            Channel::Acceleration => self.acceleration,
        }
    }
}

/// Plottable quantity of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Displacement,
    Velocity,
    Acceleration,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Displacement => "displacement",
            Channel::Velocity => "velocity",
            Channel::Acceleration => "acceleration",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "displacement" => Ok(Channel::Displacement),
            "v" | "velocity" => Ok(Channel::Velocity),
            "a" | "acceleration" => Ok(Channel::Acceleration),
            _ => Err(HistoryError::UnknownChannel {
                name: s.to_string(),
            }),
        }
    }
}
