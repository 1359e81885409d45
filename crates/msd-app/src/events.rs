use msd_core::Real;
use msd_sim::SystemState;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No integrator; parameters editable, state previewed from initial conditions.
    #[default]
    Idle,
    /// Integrator live and advanced by every tick.
    Running,
    /// Integrator frozen; history available for playback and scrubbing.
    Paused,
}

/// What one tick did, handed to the observer and returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: SystemState,
    pub acceleration: Real,
    /// Rendered spring height
    pub height: Real,
    /// Step actually taken (s)
    pub dt: Real,
    /// Wall-clock delta exceeded the step ceiling
    pub clamped: bool,
    /// Impulse delivered during this tick
    pub impulse: Option<Real>,
}

pub type TickObserver = Box<dyn FnMut(&TickReport)>;
