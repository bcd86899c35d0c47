use std::f64::consts::PI;
use approx::{ assert_abs_diff_eq, assert_relative_eq };
use fdsim::{
    config::SchrodingerConfig,
    error::ConfigError,
    schrodinger::{ advance_schrodinger, SchrodingerSimulation },
    stability::{ StabilityPolicy, SCHRODINGER_CFL_LIMIT },
};

fn reference() -> SchrodingerSimulation {
    SchrodingerSimulation::new(&SchrodingerConfig::default()).unwrap()
}

#[test]
fn reference_time_step() {
    let sim = reference();
    let dx = PI / 100.0;
    assert_relative_eq!(sim.dt(), dx * dx * 2.0 * 0.01, max_relative = 1e-12);
    assert_relative_eq!(sim.courant(), 0.01, max_relative = 1e-12);
}

#[test]
fn probability_is_nearly_conserved() {
    let mut sim = reference();
    let p0 = sim.total_probability();
    assert!(p0 > 0.0);
    sim.run(1000);
    let p1 = sim.total_probability();
    assert!(((p1 - p0) / p0).abs() < 0.1, "{p0} -> {p1}");
}

#[test]
fn boundary_policy_holds_every_step() {
    let mut sim = reference();
    let n = sim.mesh().nx();
    for _ in 0..300 {
        let i_neighbor = sim.phi_i()[1];
        let state = sim.advance();
        assert_eq!(state.phi_r[0], 0.0);
        assert_eq!(state.phi_r[n - 1], 0.0);
        assert_eq!(state.phi_i[0], i_neighbor);
        assert_eq!(state.phi_i[n - 1], 0.0);
    }
}

#[test]
fn density_tracks_fields() {
    let mut sim = reference();
    sim.run(50);
    let state = sim.state();
    for k in 0..sim.mesh().nx() {
        assert_abs_diff_eq!(
            state.density[k],
            state.phi_r[k].powi(2) + state.phi_i[k].powi(2)
        );
    }
}

#[test]
fn kernel_reproduces_trajectory() {
    let mut sim = reference();
    let dx = sim.mesh().dx();
    let dt = sim.dt();
    let mut r = sim.phi_r().to_owned();
    let mut i = sim.phi_i().to_owned();
    for _ in 0..20 {
        let (rn, inew, _) = advance_schrodinger(&r, &i, dx, dt, 1.0, 1.0).unwrap();
        r = rn;
        i = inew;
    }
    sim.run(20);
    assert_eq!(sim.phi_r(), r.view());
    assert_eq!(sim.phi_i(), i.view());
}

#[test]
fn runs_are_deterministic() {
    let mut a = reference();
    let mut b = reference();
    a.run(400);
    b.run(400);
    assert_eq!(a.phi_r(), b.phi_r());
    assert_eq!(a.phi_i(), b.phi_i());
    assert_eq!(a.density(), b.density());
}

#[test]
fn unstable_buffer_is_rejected_by_default() {
    let config = SchrodingerConfig { buffer: 0.6, ..SchrodingerConfig::default() };
    match SchrodingerSimulation::new(&config) {
        Err(ConfigError::Unstable { limit, .. }) => {
            assert_eq!(limit, SCHRODINGER_CFL_LIMIT);
        },
        other => panic!("expected instability error, got {other:?}"),
    }
}

#[test]
fn unstable_run_diverges() {
    let config = SchrodingerConfig {
        buffer: 1.0,
        stability: StabilityPolicy::Ignore,
        ..SchrodingerConfig::default()
    };
    let mut sim = SchrodingerSimulation::new(&config).unwrap();
    sim.run(500);
    assert!(sim.density().iter().any(|p| !p.is_finite() || *p > 1e6));
}

#[test]
fn malformed_configs_fail_fast() {
    let bad = [
        SchrodingerConfig { nx: 1, ..SchrodingerConfig::default() },
        SchrodingerConfig { lx: -PI, ..SchrodingerConfig::default() },
        SchrodingerConfig { h: 0.0, ..SchrodingerConfig::default() },
        SchrodingerConfig { m: -1.0, ..SchrodingerConfig::default() },
        SchrodingerConfig { buffer: -0.01, ..SchrodingerConfig::default() },
        SchrodingerConfig { sigma: 0.0, ..SchrodingerConfig::default() },
        SchrodingerConfig { h: f64::INFINITY, ..SchrodingerConfig::default() },
        SchrodingerConfig { h: f64::NAN, ..SchrodingerConfig::default() },
        SchrodingerConfig { m: f64::INFINITY, ..SchrodingerConfig::default() },
        SchrodingerConfig { m: f64::NAN, ..SchrodingerConfig::default() },
        SchrodingerConfig { sigma: f64::INFINITY, ..SchrodingerConfig::default() },
    ];
    for config in bad.iter() {
        assert!(SchrodingerSimulation::new(config).is_err(), "{config:?}");
    }
}

#[test]
fn non_finite_constants_from_toml_are_config_errors() {
    let config
        = SchrodingerConfig::from_toml_str("h = inf\nstability = \"warn\"")
        .unwrap();
    assert!(matches!(
        SchrodingerSimulation::new(&config),
        Err(ConfigError::BadHbar(_))
    ));
    let config = SchrodingerConfig::from_toml_str("m = nan").unwrap();
    assert!(matches!(
        SchrodingerSimulation::new(&config),
        Err(ConfigError::BadMass(_))
    ));
    let config
        = SchrodingerConfig::from_toml_str("h = inf\nstability = \"ignore\"")
        .unwrap();
    assert!(matches!(
        SchrodingerSimulation::new(&config),
        Err(ConfigError::BadHbar(_))
    ));
}

#[test]
fn diverged_run_reports_non_finite_peak() {
    let config = SchrodingerConfig {
        buffer: 1.0,
        stability: StabilityPolicy::Ignore,
        ..SchrodingerConfig::default()
    };
    let mut sim = SchrodingerSimulation::new(&config).unwrap();
    let mut steps = 0;
    while sim.total_probability().is_finite() && steps < 5000 {
        sim.advance();
        steps += 1;
    }
    assert!(!sim.total_probability().is_finite());
    assert!(!sim.max_density().is_finite() || sim.max_density() > 1e10);
}

#[test]
fn momentum_peaks_at_packet_wavenumber() {
    let sim = reference();
    let (k, density) = sim.momentum_density();
    let (kmax, _) = k.iter().zip(density.iter())
        .fold((0.0, f64::NEG_INFINITY), |(kb, pb), (&kk, &pk)| {
            if pk > pb { (kk, pk) } else { (kb, pb) }
        });
    assert_abs_diff_eq!(f64::abs(kmax), 10.0, epsilon = 1e-9);
    assert_relative_eq!(density.sum(), sim.total_probability(), max_relative = 1e-9);
}

#[test]
fn wavefunction_matches_parts() {
    let sim = reference();
    let psi = sim.wavefunction();
    for k in 0..sim.mesh().nx() {
        assert_eq!(psi[k].re, sim.phi_r()[k]);
        assert_eq!(psi[k].im, sim.phi_i()[k]);
    }
    assert_abs_diff_eq!(
        sim.norm(),
        fdsim::utils::trapz(&sim.density(), sim.mesh().dx())
    );
}
