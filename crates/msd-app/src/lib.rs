//! msd-app: application session layer shared by front-ends.
//!
//! Wraps the simulator, the sample history and the session configuration
//! behind one tick-driven [`SimulationSession`]. A front-end owns the
//! scheduler and calls `tick()`; the session handles step clamping,
//! history recording, playback and scrubbing.

pub mod clock;
pub mod error;
pub mod events;
pub mod headless;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AppError, AppResult};
pub use events::{SessionPhase, TickObserver, TickReport};
pub use headless::{run_headless, run_realtime};
pub use session::{REWIND_STEP_S, SimulationSession};
