//! Interactive simulation session.
//!
//! The session owns at most one live simulator and one history buffer.
//! It never schedules anything itself: an external scheduler calls
//! [`SimulationSession::tick`] at the configured interval, and a tick that
//! arrives while the session is not running does nothing.

use std::str::FromStr;
use std::time::Duration;

use msd_config::SessionConfig;
use msd_core::{MASS_FLOOR, Real};
use msd_history::{Channel, HistoryBuffer, HistorySample};
use msd_sim::{
    DampingCategory, ForcingFunction, InitialConditions, MassSpringSimulator, Preset,
    PresetCatalog, SystemParameters, SystemState,
};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::AppResult;
use crate::events::{SessionPhase, TickObserver, TickReport};

/// Step the rewind shortcut jumps back by (s).
pub const REWIND_STEP_S: Real = 10.0;

pub struct SimulationSession<C: Clock = SystemClock> {
    config: SessionConfig,
    clock: C,
    params: SystemParameters,
    initial: InitialConditions,
    simulator: Option<MassSpringSimulator>,
    history: HistoryBuffer,
    phase: SessionPhase,
    last_tick: Option<Duration>,
    playback_time: Real,
    scrubbing: bool,
    current: SystemState,
    observer: Option<TickObserver>,
}

impl SimulationSession<SystemClock> {
    pub fn new(config: SessionConfig) -> AppResult<Self> {
        Self::with_clock(config, SystemClock::default())
    }
}

impl<C: Clock> SimulationSession<C> {
    pub fn with_clock(config: SessionConfig, clock: C) -> AppResult<Self> {
        msd_config::validate_config(&config)?;
        let history = HistoryBuffer::new(config.history_max_duration_s)?;
        let params = config.default_parameters;
        let initial = config.initial_conditions;
        Ok(Self {
            config,
            clock,
            params,
            initial,
            simulator: None,
            history,
            phase: SessionPhase::Idle,
            last_tick: None,
            playback_time: 0.0,
            scrubbing: false,
            current: SystemState::from(initial),
            observer: None,
        })
    }

    // ---- observation -------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn parameters(&self) -> &SystemParameters {
        &self.params
    }

    pub fn initial_conditions(&self) -> InitialConditions {
        self.initial
    }

    /// Latest externally observed state.
    pub fn current_state(&self) -> SystemState {
        self.current
    }

    /// State of the live simulator, `None` when idle.
    pub fn simulator_state(&self) -> Option<SystemState> {
        self.simulator.as_ref().map(|sim| *sim.state())
    }

    /// Spring height for the renderer: `max(min, rest_length + displacement)`.
    pub fn height(&self) -> Real {
        self.height_for(self.current.displacement)
    }

    fn height_for(&self, displacement: Real) -> Real {
        (self.params.rest_length + displacement).max(self.config.min_display_height)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// `(time, value)` pairs for a channel named `x`/`displacement`,
    /// `v`/`velocity` or `a`/`acceleration`.
    pub fn series(&self, channel: &str) -> AppResult<Vec<(Real, Real)>> {
        let channel = Channel::from_str(channel)?;
        Ok(msd_history::series(&self.history, channel))
    }

    pub fn playback_time(&self) -> Real {
        self.playback_time
    }

    pub fn max_playback_time(&self) -> Real {
        self.history.max_time()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// While set, ticks leave the playback cursor alone.
    pub fn set_scrubbing(&mut self, scrubbing: bool) {
        self.scrubbing = scrubbing;
    }

    /// Register the per-tick callback, replacing any previous one.
    pub fn on_tick(&mut self, observer: impl FnMut(&TickReport) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // ---- lifecycle ---------------------------------------------------

    fn fresh_simulator(&self, state: SystemState) -> MassSpringSimulator {
        MassSpringSimulator::with_state(self.params, state).with_integrator(self.config.integrator)
    }

    /// Clear history and run from the initial conditions. No-op if running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.history.reset();
        self.playback_time = 0.0;
        self.scrubbing = false;
        let sim = self.fresh_simulator(SystemState::from(self.initial));
        self.current = *sim.state();
        self.simulator = Some(sim);
        self.last_tick = Some(self.clock.now());
        self.phase = SessionPhase::Running;
        info!(
            mass = self.params.mass,
            damping = self.params.damping,
            stiffness = self.params.stiffness,
            y0 = self.initial.y0,
            v0 = self.initial.v0,
            "simulation started"
        );
    }

    /// Continue from the current simulator state without clearing history.
    ///
    /// Samples newer than the simulator time (left over from a scrub back
    /// in time) are discarded so the history stays time-ordered.
    pub fn resume(&mut self) {
        if self.is_running() {
            return;
        }
        let Some(sim) = &self.simulator else {
            self.start();
            return;
        };
        let t = sim.state().time;
        self.history.truncate_after(t);
        self.scrubbing = false;
        self.playback_time = t;
        self.last_tick = Some(self.clock.now());
        self.phase = SessionPhase::Running;
        info!(t, "simulation resumed");
    }

    /// Stop ticking. State and history are kept.
    pub fn stop(&mut self) {
        self.last_tick = None;
        if self.is_running() {
            self.phase = SessionPhase::Paused;
            info!(t = self.current.time, "simulation stopped");
        }
    }

    /// Stop ticking and restore defaults, dropping simulator and history.
    pub fn reset(&mut self) {
        self.last_tick = None;
        self.phase = SessionPhase::Idle;
        self.params = self.config.default_parameters;
        self.initial = self.config.initial_conditions;
        self.simulator = None;
        self.history.reset();
        self.playback_time = 0.0;
        self.scrubbing = false;
        self.current = SystemState::from(self.initial);
        info!("simulation reset");
    }

    /// Advance one scheduler tick.
    ///
    /// The step is the wall-clock delta since the previous tick, floored at
    /// the tick interval and capped at the configured maximum. Returns
    /// `None` when the session is not running.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }
        let now = self.clock.now();
        let previous = self.last_tick.replace(now).unwrap_or(now);
        let elapsed = now.saturating_sub(previous).as_secs_f64();

        let clamped = elapsed > self.config.max_step_s;
        let dt = elapsed
            .max(self.config.tick_interval_s)
            .min(self.config.max_step_s);
        if clamped {
            debug!(elapsed, dt, "tick delta clamped");
        }

        let params = self.params;
        let Some(sim) = self.simulator.as_mut() else {
            self.stop();
            return None;
        };
        let impulse = sim.step(dt);
        let state = *sim.state();
        let acceleration = params.acceleration(state.time, state.displacement, state.velocity);

        self.history.append(HistorySample::new(
            state.time,
            state.displacement,
            state.velocity,
            acceleration,
        ));
        self.current = state;
        if !self.scrubbing {
            self.playback_time = state.time;
        }
        if let Some(j) = impulse {
            debug!(t = state.time, impulse = j, "impulse delivered");
        }

        let report = TickReport {
            state,
            acceleration,
            height: self.height_for(state.displacement),
            dt,
            clamped,
            impulse,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer(&report);
        }
        Some(report)
    }

    // ---- parameter edits ---------------------------------------------

    /// Replace parameters on the live simulator (if any).
    ///
    /// With `reset_state`, the simulator is also reseeded at `t = 0` from
    /// the initial conditions and the history restarts with it. Takes
    /// effect from the next tick.
    pub fn apply_parameters(&mut self, params: SystemParameters, reset_state: bool) {
        let params = match &self.config.limits {
            Some(limits) => limits.apply(params),
            None => params,
        };
        self.params = params;

        let initial = self.initial;
        let now = self.clock.now();
        if let Some(sim) = self.simulator.as_mut() {
            sim.set_params(params);
            if reset_state {
                sim.reset(0.0, initial.y0, initial.v0);
                self.history.reset();
                self.playback_time = 0.0;
                if self.phase == SessionPhase::Running {
                    self.last_tick = Some(now);
                }
            }
            self.current = *sim.state();
        } else {
            self.current = SystemState::from(initial);
        }
        debug!(
            mass = params.mass,
            damping = params.damping,
            stiffness = params.stiffness,
            forcing = ?params.forcing.kind(),
            reset_state,
            "parameters applied"
        );
    }

    /// Swap the forcing function only.
    pub fn apply_forcing(&mut self, forcing: ForcingFunction) {
        self.apply_parameters(self.params.with_forcing(forcing), false);
    }

    /// Set damping to the category's multiple of critical damping for the
    /// current mass and stiffness. State is kept.
    pub fn set_damping_category(&mut self, category: DampingCategory) -> Real {
        let m = self.params.mass.max(MASS_FLOOR);
        let k = self.params.stiffness.max(0.0);
        let damping = category.damping(m, k);
        self.apply_parameters(
            SystemParameters {
                damping,
                ..self.params
            },
            false,
        );
        self.params.damping
    }

    /// Apply mass, damping, stiffness, rest length and initial conditions
    /// from a preset, then reseed the simulator.
    pub fn apply_preset(&mut self, preset: &Preset) {
        info!(preset = preset.name, "applying preset");
        self.initial = InitialConditions {
            y0: preset.y0,
            v0: preset.v0,
        };
        let params = SystemParameters {
            forcing: self.params.forcing,
            ..preset.params
        };
        self.apply_parameters(params, true);
    }

    /// Apply the catalog preset for `category` at its default mass and stiffness.
    pub fn select_preset(&mut self, category: DampingCategory) {
        let preset = PresetCatalog::default_preset(category);
        self.apply_preset(&preset);
    }

    /// Preset category the current parameters correspond to, if any.
    pub fn matching_preset(&self) -> Option<DampingCategory> {
        PresetCatalog::identify(&self.params)
    }

    pub fn set_initial_conditions(&mut self, initial: InitialConditions) {
        self.initial = initial;
        self.preview_initial_conditions();
    }

    /// When not running, show the initial conditions as the current state.
    pub fn preview_initial_conditions(&mut self) {
        if self.is_running() {
            return;
        }
        self.current = SystemState::from(self.initial);
    }

    // ---- playback ----------------------------------------------------

    /// Pause and jump to the recorded sample nearest `to`.
    ///
    /// The target is clamped to `[0, max_playback_time]`. The simulator is
    /// reseeded from the sample rather than re-integrated, and an impulse it
    /// already delivered before that sample stays delivered. Returns the
    /// sample used, or `None` when there is no history.
    pub fn scrub(&mut self, to: Real) -> Option<HistorySample> {
        if self.is_running() {
            self.stop();
        }
        let target = if to.is_nan() { 0.0 } else { to };
        self.playback_time = target.clamp(0.0, self.history.max_time().max(0.0));

        let sample = *self.history.nearest(self.playback_time)?;
        let state = SystemState::new(sample.time, sample.displacement, sample.velocity);
        if let Some(sim) = self.simulator.as_mut() {
            sim.reseed(state);
        } else {
            self.simulator = Some(self.fresh_simulator(state));
        }
        self.current = state;
        debug!(
            requested = to,
            cursor = self.playback_time,
            sample_time = sample.time,
            "scrubbed"
        );
        Some(sample)
    }

    /// Scrub to `playback_time - seconds`.
    ///
    /// Measured from the playback cursor, not the simulator time; after a
    /// scrub between two samples the two differ by up to half a tick.
    pub fn rewind(&mut self, seconds: Real) -> Option<HistorySample> {
        self.scrub(self.playback_time - seconds)
    }

    pub fn rewind_10s(&mut self) -> Option<HistorySample> {
        self.rewind(REWIND_STEP_S)
    }
}
