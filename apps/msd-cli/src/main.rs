use clap::{Parser, Subcommand, ValueEnum};
use msd_app::{AppError, AppResult, ManualClock, SimulationSession, run_headless, run_realtime};
use msd_config::SessionConfig;
use msd_core::Real;
use msd_history::HistorySample;
use msd_sim::{
    DampingCategory, ForcingFunction, IntegratorType, MassSpringSimulator, PresetCatalog,
    SimOptions, SystemState, Waveform, run_sim,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "msd-cli")]
#[command(about = "Mass-spring-damper simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a tick-driven session and export its history
    Run {
        #[command(flatten)]
        setup: SetupArgs,
        /// Simulated duration in seconds
        #[arg(long, default_value_t = 10.0)]
        duration: f64,
        /// Tick against the wall clock instead of a manual clock
        #[arg(long)]
        realtime: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Integrate with a fixed step, outside any session
    Batch {
        #[command(flatten)]
        setup: SetupArgs,
        /// Time step in seconds
        #[arg(long, default_value_t = 0.001)]
        dt: f64,
        /// End time in seconds
        #[arg(long)]
        t_end: f64,
        /// Record every N-th step
        #[arg(long, default_value_t = 1)]
        record_every: usize,
        /// Integration scheme (defaults to the config's)
        #[arg(long, value_enum)]
        integrator: Option<IntegratorArg>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List damping presets
    Presets {
        /// Mass for the listed presets (kg)
        #[arg(long)]
        mass: Option<f64>,
        /// Stiffness for the listed presets (N/m)
        #[arg(long)]
        stiffness: Option<f64>,
    },
    /// Validate a session config file
    Validate {
        /// Path to a YAML or JSON config
        config_path: PathBuf,
    },
    /// Print the default session config as YAML
    DefaultConfig,
}

#[derive(clap::Args)]
struct SetupArgs {
    /// Session config (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start from a damping preset
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,
    /// External forcing
    #[arg(long, value_enum, default_value_t = ForcingArg::None)]
    forcing: ForcingArg,
    /// Forcing amplitude or magnitude (N, or N*s for impulses)
    #[arg(long, default_value_t = 1.0)]
    magnitude: f64,
    /// Harmonic forcing frequency (Hz)
    #[arg(long, default_value_t = 1.0)]
    frequency: f64,
    /// Step or impulse trigger time (s)
    #[arg(long, default_value_t = 1.0)]
    trigger: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Over,
    Crit,
    Under,
    Undamped,
}

impl From<PresetArg> for DampingCategory {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Over => DampingCategory::Overdamped,
            PresetArg::Crit => DampingCategory::CriticallyDamped,
            PresetArg::Under => DampingCategory::Underdamped,
            PresetArg::Undamped => DampingCategory::Undamped,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ForcingArg {
    None,
    Sine,
    Cosine,
    Constant,
    Step,
    Impulse,
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Rk4,
    Euler,
}

impl From<IntegratorArg> for IntegratorType {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Rk4 => IntegratorType::RK4,
            IntegratorArg::Euler => IntegratorType::ForwardEuler,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Jsonl,
}

impl SetupArgs {
    fn load_config(&self) -> AppResult<SessionConfig> {
        match &self.config {
            Some(path) => Ok(msd_config::load(path)?),
            None => Ok(SessionConfig::default()),
        }
    }

    fn forcing(&self) -> ForcingFunction {
        match self.forcing {
            ForcingArg::None => ForcingFunction::None,
            ForcingArg::Sine => {
                ForcingFunction::harmonic(self.magnitude, self.frequency, 0.0, Waveform::Sine)
            }
            ForcingArg::Cosine => {
                ForcingFunction::harmonic(self.magnitude, self.frequency, 0.0, Waveform::Cosine)
            }
            ForcingArg::Constant => ForcingFunction::constant(self.magnitude),
            ForcingArg::Step => ForcingFunction::step(self.magnitude, self.trigger),
            ForcingArg::Impulse => ForcingFunction::impulse(self.magnitude, self.trigger),
        }
    }

    /// Apply preset and forcing to a fresh session.
    fn configure<C: msd_app::Clock>(&self, session: &mut SimulationSession<C>) -> AppResult<()> {
        if let Some(preset) = self.preset {
            session.select_preset(preset.into());
        }
        let forcing = self.forcing();
        forcing.validate()?;
        session.apply_forcing(forcing);
        Ok(())
    }
}

#[derive(Serialize)]
struct BatchRow {
    time: Real,
    displacement: Real,
    velocity: Real,
    acceleration: Real,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            setup,
            duration,
            realtime,
            format,
            output,
        } => cmd_run(&setup, duration, realtime, format, output.as_deref()),
        Commands::Batch {
            setup,
            dt,
            t_end,
            record_every,
            integrator,
            format,
            output,
        } => cmd_batch(
            &setup,
            dt,
            t_end,
            record_every,
            integrator,
            format,
            output.as_deref(),
        ),
        Commands::Presets { mass, stiffness } => cmd_presets(mass, stiffness),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::DefaultConfig => cmd_default_config(),
    }
}

fn cmd_run(
    setup: &SetupArgs,
    duration: f64,
    realtime: bool,
    format: OutputFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(AppError::InvalidInput(format!(
            "duration must be finite and non-negative, got {duration}"
        )));
    }
    let config = setup.load_config()?;
    info!(duration, realtime, "running session");
    let wall = Instant::now();

    let history: Vec<HistorySample> = if realtime {
        let mut session = SimulationSession::new(config)?;
        setup.configure(&mut session)?;
        run_realtime(&mut session, Duration::from_secs_f64(duration));
        session.stop();
        report_session(&session);
        session.history().iter().copied().collect()
    } else {
        let clock = ManualClock::new();
        let mut session = SimulationSession::with_clock(config, clock.clone())?;
        setup.configure(&mut session)?;
        run_headless(&mut session, &clock, duration);
        session.stop();
        report_session(&session);
        session.history().iter().copied().collect()
    };

    eprintln!("  Wall time: {:.3}s", wall.elapsed().as_secs_f64());

    let rows: Vec<BatchRow> = history
        .iter()
        .map(|h| BatchRow {
            time: h.time,
            displacement: h.displacement,
            velocity: h.velocity,
            acceleration: h.acceleration,
        })
        .collect();
    write_rows(&rows, format, output)
}

fn report_session<C: msd_app::Clock>(session: &SimulationSession<C>) {
    let params = session.parameters();
    eprintln!("✓ Session finished at t = {:.3} s", session.current_state().time);
    eprintln!(
        "  m = {:.4} kg, c = {:.4} N*s/m, k = {:.4} N/m",
        params.mass, params.damping, params.stiffness
    );
    eprintln!(
        "  omega_n = {:.4} rad/s, zeta = {}",
        params.natural_frequency(),
        PresetCatalog::damping_ratio(params.mass, params.damping, params.stiffness)
            .map(|z| format!("{z:.3}"))
            .unwrap_or_else(|| "-".into())
    );
    if let Some(category) = session.matching_preset() {
        eprintln!("  Preset: {}", category.name());
    }
    if let Some(summary) = msd_history::summarize(session.history()) {
        eprintln!("  Samples: {}", summary.sample_count);
        eprintln!(
            "  Displacement range: [{:.4}, {:.4}] m",
            summary.displacement_range.0, summary.displacement_range.1
        );
        eprintln!("  Peak speed: {:.4} m/s", summary.peak_speed);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_batch(
    setup: &SetupArgs,
    dt: f64,
    t_end: f64,
    record_every: usize,
    integrator: Option<IntegratorArg>,
    format: OutputFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = setup.load_config()?;

    let (params, y0, v0) = match setup.preset {
        Some(arg) => {
            let preset = PresetCatalog::default_preset(arg.into());
            (preset.params, preset.y0, preset.v0)
        }
        None => (
            config.default_parameters,
            config.initial_conditions.y0,
            config.initial_conditions.v0,
        ),
    };
    let forcing = setup.forcing();
    forcing.validate()?;
    let params = params.with_forcing(forcing);
    params.validate()?;

    let integrator = integrator.map(IntegratorType::from).unwrap_or(config.integrator);
    let mut sim = MassSpringSimulator::with_state(params, SystemState::initial(y0, v0))
        .with_integrator(integrator);

    let opts = SimOptions {
        dt,
        t_end,
        record_every,
        ..SimOptions::default()
    };
    info!(dt, t_end, ?integrator, "running batch");
    let wall = Instant::now();
    let record = run_sim(&mut sim, &opts)?;

    eprintln!(
        "✓ Integrated {} steps to t = {:.3} s ({:?})",
        record.steps,
        sim.state().time,
        integrator
    );
    eprintln!("  Wall time: {:.3}s", wall.elapsed().as_secs_f64());

    let rows: Vec<BatchRow> = record
        .states
        .iter()
        .zip(&record.accelerations)
        .map(|(s, &a)| BatchRow {
            time: s.time,
            displacement: s.displacement,
            velocity: s.velocity,
            acceleration: a,
        })
        .collect();
    write_rows(&rows, format, output)
}

fn cmd_presets(mass: Option<f64>, stiffness: Option<f64>) -> AppResult<()> {
    let mass = mass.unwrap_or(msd_sim::presets::DEFAULT_PRESET_MASS);
    let stiffness = stiffness.unwrap_or(msd_sim::presets::DEFAULT_PRESET_STIFFNESS);
    if !(mass > 0.0 && stiffness >= 0.0) {
        return Err(AppError::InvalidInput(format!(
            "need mass > 0 and stiffness >= 0, got m = {mass}, k = {stiffness}"
        )));
    }

    println!("Presets for m = {} kg, k = {} N/m:", mass, stiffness);
    for category in DampingCategory::ALL {
        let preset = PresetCatalog::preset(category, mass, stiffness);
        let zeta = PresetCatalog::damping_ratio(mass, preset.params.damping, stiffness);
        println!(
            "  {:<9} c = {:>8.4} N*s/m  zeta = {}  y0 = {} m  v0 = {} m/s",
            preset.name,
            preset.params.damping,
            zeta.map(|z| format!("{z:.2}")).unwrap_or_else(|| "-".into()),
            preset.y0,
            preset.v0
        );
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = msd_config::load(config_path)?;
    println!("✓ Config is valid");
    println!(
        "  tick = {:.4} s, max step = {:.4} s, history = {} s",
        config.tick_interval_s, config.max_step_s, config.history_max_duration_s
    );
    if config.limits.is_some() {
        println!("  Parameter limits: enabled");
    }
    Ok(())
}

fn cmd_default_config() -> AppResult<()> {
    let yaml = msd_config::to_yaml_string(&SessionConfig::default())?;
    print!("{}", yaml);
    Ok(())
}

fn write_rows(rows: &[BatchRow], format: OutputFormat, output: Option<&Path>) -> AppResult<()> {
    let mut text = String::new();
    match format {
        OutputFormat::Csv => {
            text.push_str("time_s,displacement_m,velocity_m_s,acceleration_m_s2\n");
            for r in rows {
                text.push_str(&format!(
                    "{},{},{},{}\n",
                    r.time, r.displacement, r.velocity, r.acceleration
                ));
            }
        }
        OutputFormat::Jsonl => {
            for r in rows {
                let line = serde_json::to_string(r)
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
                text.push_str(&line);
                text.push('\n');
            }
        }
    }

    if let Some(path) = output {
        std::fs::write(path, text).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        eprintln!("✓ Exported {} samples to {}", rows.len(), path.display());
    } else {
        print!("{}", text);
    }
    Ok(())
}
