//! End-to-end behaviour of the RK4 step function on the oscillator.

use msd_sim::{
    DampingCategory, ForcingFunction, IntegratorType, MassSpringSimulator, PresetCatalog,
    SimOptions, SystemParameters, SystemState, Waveform, run_sim, step_state,
};
use proptest::prelude::*;

fn unforced(mass: f64, damping: f64, stiffness: f64) -> SystemParameters {
    SystemParameters {
        mass,
        damping,
        stiffness,
        rest_length: 0.0,
        forcing: ForcingFunction::None,
    }
}

#[test]
fn rk4_matches_analytic_simple_harmonic_motion() {
    // m = 1, c = 0, k = 1 -> omega = 1 rad/s, period T = 2*pi
    let params = unforced(1.0, 0.0, 1.0);
    let mut sim = MassSpringSimulator::with_state(params, SystemState::new(0.0, 1.0, 0.0));

    let dt = 0.001;
    let steps = (std::f64::consts::TAU / dt) as usize;
    for _ in 0..steps {
        sim.step(dt);
    }

    // x(T) = cos(2*pi) = 1, v(T) = -sin(2*pi) = 0
    let x_err = (sim.state().displacement - 1.0).abs();
    let v_err = sim.state().velocity.abs();
    assert!(x_err < 1e-3, "Displacement error too large: {x_err}");
    assert!(v_err < 1e-2, "Velocity error too large: {v_err}");
}

#[test]
fn rk4_tracks_cosine_along_the_whole_period() {
    let params = unforced(1.0, 0.0, 1.0);
    let mut s = SystemState::new(0.0, 1.0, 0.0);
    for _ in 0..1000 {
        s = step_state(&s, &params, 0.005);
        assert!((s.displacement - s.time.cos()).abs() < 1e-6);
        assert!((s.velocity + s.time.sin()).abs() < 1e-6);
    }
}

#[test]
fn forward_euler_gains_energy_where_rk4_does_not() {
    let params = unforced(1.0, 0.0, 1.0);
    let start = SystemState::new(0.0, 1.0, 0.0);
    let mut rk = MassSpringSimulator::with_state(params, start);
    let mut eu = MassSpringSimulator::with_state(params, start)
        .with_integrator(IntegratorType::ForwardEuler);
    for _ in 0..1000 {
        rk.step(0.01);
        eu.step(0.01);
    }
    let energy = |s: &SystemState| 0.5 * s.displacement.powi(2) + 0.5 * s.velocity.powi(2);
    assert!((energy(rk.state()) - 0.5).abs() < 1e-6);
    assert!(energy(eu.state()) > 0.5 + 1e-2);
}

#[test]
fn underdamped_amplitude_decays_monotonically() {
    let params = SystemParameters {
        mass: 1.0,
        damping: 0.2,
        stiffness: 15.0,
        rest_length: 0.5,
        forcing: ForcingFunction::None,
    };
    let mut sim = MassSpringSimulator::with_state(params, SystemState::new(0.0, 0.1, 0.0));

    let mut xs = vec![sim.state().displacement];
    for _ in 0..180 {
        sim.step(1.0 / 60.0);
        xs.push(sim.state().displacement);
    }

    let peaks: Vec<f64> = xs
        .windows(3)
        .filter(|w| w[1].abs() > w[0].abs() && w[1].abs() >= w[2].abs())
        .map(|w| w[1].abs())
        .collect();

    assert!(peaks.len() >= 3, "expected several peaks, got {peaks:?}");
    assert!(peaks[0] < 0.1);
    for pair in peaks.windows(2) {
        assert!(pair[1] < pair[0], "peaks not decaying: {peaks:?}");
    }
}

#[test]
fn impulse_changes_velocity_at_one_step_only() {
    let (m, j, dt) = (2.0, 3.0, 0.01);
    let params = SystemParameters {
        forcing: ForcingFunction::impulse(j, 0.505),
        ..unforced(m, 0.0, 0.0)
    };
    let free = unforced(m, 0.0, 0.0);

    let mut s = SystemState::new(0.0, 0.0, 0.0);
    let mut kicked_steps = Vec::new();
    for i in 0..100 {
        let with = step_state(&s, &params, dt);
        let without = step_state(&s, &free, dt);
        let dv = with.velocity - without.velocity;
        if dv.abs() > 1e-12 {
            assert!((dv - j / m).abs() < 1e-12);
            kicked_steps.push(i);
        }
        s = with;
    }
    assert_eq!(kicked_steps, vec![50]);
    assert!((s.velocity - j / m).abs() < 1e-12);
}

#[test]
fn step_forcing_starts_motion_at_trigger() {
    let params = SystemParameters {
        forcing: ForcingFunction::step(1.0, 0.5),
        ..unforced(1.0, 0.5, 4.0)
    };
    let mut sim = MassSpringSimulator::with_state(params, SystemState::default());
    for _ in 0..49 {
        sim.step(0.01);
    }
    assert_eq!(sim.state().displacement, 0.0);
    for _ in 0..4000 {
        sim.step(0.01);
    }
    assert!((sim.state().displacement - 0.25).abs() < 1e-3);
}

#[test]
fn resonant_harmonic_drive_grows_amplitude() {
    // Drive an undamped unit oscillator at its natural frequency.
    let params = SystemParameters {
        forcing: ForcingFunction::harmonic(0.1, 1.0 / std::f64::consts::TAU, 0.0, Waveform::Sine),
        ..unforced(1.0, 0.0, 1.0)
    };
    let mut sim = MassSpringSimulator::new(params);
    let mut early = 0.0_f64;
    let mut late = 0.0_f64;
    for i in 0..6000 {
        sim.step(0.01);
        let x = sim.state().displacement.abs();
        if i < 1000 {
            early = early.max(x);
        } else if i >= 5000 {
            late = late.max(x);
        }
    }
    assert!(late > 3.0 * early);
}

#[test]
fn overdamped_preset_never_crosses_equilibrium() {
    let preset = PresetCatalog::default_preset(DampingCategory::Overdamped);
    let mut sim = MassSpringSimulator::with_state(
        preset.params,
        SystemState::new(0.0, preset.y0, preset.v0),
    );
    let record = run_sim(
        &mut sim,
        &SimOptions {
            dt: 0.01,
            t_end: 10.0,
            max_steps: 10_000,
            record_every: 1,
        },
    )
    .unwrap();
    assert!(record.states.iter().all(|s| s.displacement >= 0.0));
    assert!(record.last().unwrap().displacement < 1e-3);
}

#[test]
fn undamped_preset_keeps_its_amplitude() {
    let preset = PresetCatalog::default_preset(DampingCategory::Undamped);
    let mut sim = MassSpringSimulator::with_state(
        preset.params,
        SystemState::new(0.0, preset.y0, preset.v0),
    );
    let record = run_sim(
        &mut sim,
        &SimOptions {
            dt: 0.01,
            t_end: 10.0,
            max_steps: 10_000,
            record_every: 1,
        },
    )
    .unwrap();
    let max = record
        .states
        .iter()
        .skip(record.states.len() / 2)
        .map(|s| s.displacement.abs())
        .fold(0.0, f64::max);
    assert!((max - preset.y0).abs() < 1e-3);
}

proptest! {
    #[test]
    fn time_is_strictly_increasing(
        dts in prop::collection::vec(1e-4_f64..0.1, 1..200),
        mass in 0.1_f64..5.0,
        damping in 0.0_f64..5.0,
        stiffness in 0.0_f64..500.0,
    ) {
        let params = unforced(mass, damping, stiffness);
        let mut s = SystemState::new(0.0, 0.1, 0.0);
        for dt in dts {
            let next = step_state(&s, &params, dt);
            prop_assert!(next.time > s.time);
            s = next;
        }
    }

    #[test]
    fn degenerate_steps_never_produce_nan(
        dt in -1.0_f64..0.1,
        mass in -1.0_f64..0.0,
        x in -10.0_f64..10.0,
        v in -10.0_f64..10.0,
    ) {
        let params = unforced(mass, 1.0, 1.0);
        let s = SystemState::new(1.0, x, v);
        let next = step_state(&s, &params, dt);
        prop_assert_eq!(next.displacement, x);
        prop_assert_eq!(next.velocity, v);
        prop_assert!(next.time >= s.time);
    }
}
