//! Mass-spring-damper simulation core.
//!
//! Provides:
//! - External forcing functions, including instantaneous impulses
//! - System parameters and state
//! - Fixed-step RK4 integrator with impulse pre-application
//! - Damping-ratio preset catalog
//! - Headless fixed-step batch runner

pub mod error;
pub mod forcing;
pub mod integrator;
pub mod model;
pub mod params;
pub mod presets;
pub mod sim;
pub mod simulator;
pub mod state;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use forcing::{ForcingFunction, ForcingKind, Waveform, impulse_tolerance};
pub use integrator::{ForwardEuler, Integrator, IntegratorType, RK4};
pub use model::TransientModel;
pub use params::SystemParameters;
pub use presets::{DampingCategory, Preset, PresetCatalog, critical_damping};
pub use sim::{SimOptions, SimRecord, run_sim};
pub use simulator::{MassSpringSimulator, step_state};
pub use state::{InitialConditions, PhaseState, SystemState};
