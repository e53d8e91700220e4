// Host-side tests for stroke-to-particle generation.

use glam::Vec2;
use nebula_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

fn line(n: usize, spacing: f32) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(i as f32 * spacing, 0.0, i as f64))
        .collect()
}

#[test]
fn five_colinear_points_give_one_thousand_particles_on_the_segment() {
    let mut rng = StdRng::seed_from_u64(7);
    let out = generate(&line(5, 10.0), &GeneratorParams::default(), &mut rng);
    assert_eq!(out.particles.len(), 1000);
    for p in &out.particles {
        assert_eq!(p.origin.y, 0.0);
        assert!(p.origin.x >= -1e-3 && p.origin.x <= 40.0 + 1e-3, "x = {}", p.origin.x);
    }
    assert!(out.centroid.distance(Vec2::new(20.0, 0.0)) < 1e-5);
}

#[test]
fn anchors_are_evenly_spaced_regardless_of_sampling() {
    // Uneven sampling along the same straight line
    let points: Vec<Point> = [0.0, 1.0, 2.5, 30.0, 31.0, 40.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| Point::new(x, 3.0, i as f64))
        .collect();
    let mut rng = StdRng::seed_from_u64(1);
    let out = generate(&points, &GeneratorParams::default(), &mut rng);
    assert_eq!(out.particles.len(), 1000);
    let step = 40.0 / 999.0;
    for (i, p) in out.particles.iter().enumerate() {
        assert!((p.origin.x - i as f32 * step).abs() < 1e-3);
        assert_eq!(p.index, i);
    }
    assert!(out.particles[0].origin.x.abs() < 1e-5);
    assert!((out.particles[999].origin.x - 40.0).abs() < 1e-3);
}

#[test]
fn particle_count_follows_density_and_cap() {
    assert_eq!(particle_count(40.0, 25.0, Some(5000)), 1000);
    assert_eq!(particle_count(10.03, 25.0, None), 250);
    assert_eq!(particle_count(1000.0, 25.0, Some(5000)), 5000);
    assert_eq!(particle_count(1000.0, 25.0, None), 25000);
    assert_eq!(particle_count(0.0, 25.0, None), 0);
    assert_eq!(particle_count(f32::NAN, 25.0, None), 0);
}

#[test]
fn long_stroke_is_capped() {
    let mut rng = StdRng::seed_from_u64(3);
    let out = generate(&line(11, 100.0), &GeneratorParams::default(), &mut rng);
    assert_eq!(out.particles.len(), MAX_PARTICLES_PER_STROKE);

    let uncapped = GeneratorParams {
        max_particles: None,
        ..GeneratorParams::default()
    };
    let out = generate(&line(3, 100.0), &uncapped, &mut rng);
    assert_eq!(out.particles.len(), 5000);
    let out = generate(&line(5, 100.0), &uncapped, &mut rng);
    assert_eq!(out.particles.len(), 10000);
}

#[test]
fn single_particle_sits_at_the_start() {
    let points = vec![Point::new(2.0, 2.0, 0.0), Point::new(2.05, 2.0, 1.0)];
    let mut rng = StdRng::seed_from_u64(11);
    let out = generate(&points, &GeneratorParams::default(), &mut rng);
    assert_eq!(out.particles.len(), 1);
    assert_eq!(out.particles[0].origin, Vec2::new(2.0, 2.0));
}

#[test]
fn degenerate_strokes_produce_nothing() {
    let mut rng = StdRng::seed_from_u64(5);
    let params = GeneratorParams::default();

    let one = generate(&[Point::new(1.0, 1.0, 0.0)], &params, &mut rng);
    assert!(one.particles.is_empty());
    assert_eq!(one.centroid, Vec2::ZERO);

    assert!(generate(&[], &params, &mut rng).particles.is_empty());

    let same: Vec<Point> = (0..6).map(|i| Point::new(4.0, 4.0, i as f64)).collect();
    assert!(generate(&same, &params, &mut rng).particles.is_empty());
}

#[test]
fn layer_mix_converges_to_30_50_20() {
    let mut rng = StdRng::seed_from_u64(2024);
    let params = GeneratorParams {
        max_particles: None,
        ..GeneratorParams::default()
    };
    let out = generate(&line(9, 250.0), &params, &mut rng);
    let n = out.particles.len() as f32;
    assert_eq!(out.particles.len(), 50000);

    let share = |layer: Layer| out.particles.iter().filter(|p| p.layer == layer).count() as f32 / n;
    assert!((share(Layer::Core) - 0.3).abs() < 0.02, "core {}", share(Layer::Core));
    assert!((share(Layer::Dust) - 0.5).abs() < 0.02, "dust {}", share(Layer::Dust));
    assert!((share(Layer::Nebula) - 0.2).abs() < 0.02, "nebula {}", share(Layer::Nebula));

    let bright = out
        .particles
        .iter()
        .filter(|p| p.brightness_multiplier == 2.0)
        .count() as f32
        / n;
    assert!((bright - 0.2).abs() < 0.02, "bright {bright}");
}

#[test]
fn attributes_stay_inside_layer_distributions() {
    let mut rng = StdRng::seed_from_u64(99);
    let out = generate(&line(5, 50.0), &GeneratorParams::default(), &mut rng);
    assert_eq!(out.particles.len(), 5000);
    for p in &out.particles {
        let lp = p.layer.params();
        assert!(p.offset.length() <= lp.spread_radius + 1e-3);
        assert!(p.opacity >= lp.opacity_min - 1e-6 && p.opacity <= lp.opacity_max + 1e-6);
        assert!(p.size >= 0.5 * lp.size_multiplier - 1e-6);
        assert!(p.size <= 2.5 * lp.size_multiplier + 1e-6);
        assert!(p.phase >= 0.0 && p.phase <= TAU);
        assert!(p.freq >= 0.5 && p.freq <= 2.0);
        assert!(p.brightness_multiplier == 1.0 || p.brightness_multiplier == 2.0);
    }
}

#[test]
fn layer_table_matches_reference_values() {
    let core = Layer::Core.params();
    assert_eq!(core.spread_radius, 5.0);
    assert_eq!(core.size_multiplier, 0.15);
    let dust = Layer::Dust.params();
    assert_eq!(dust.spread_radius, 45.0);
    assert_eq!((dust.opacity_min, dust.opacity_max), (0.3, 0.7));
    let nebula = Layer::Nebula.params();
    assert!((nebula.spread_radius - 67.5).abs() < 1e-5);
    assert_eq!((nebula.opacity_min, nebula.opacity_max), (0.05, 0.2));
    assert_eq!(nebula.size_multiplier, 0.35);
}

#[test]
fn layer_thresholds_are_strict() {
    assert_eq!(Layer::from_uniform(0.0), Layer::Nebula);
    assert_eq!(Layer::from_uniform(0.2), Layer::Dust);
    assert_eq!(Layer::from_uniform(0.5), Layer::Dust);
    assert_eq!(Layer::from_uniform(0.7), Layer::Dust);
    assert_eq!(Layer::from_uniform(0.71), Layer::Core);
}

#[test]
fn same_seed_same_particles() {
    let points = line(6, 7.0);
    let params = GeneratorParams::default();
    let a = generate(&points, &params, &mut StdRng::seed_from_u64(42));
    let b = generate(&points, &params, &mut StdRng::seed_from_u64(42));
    assert_eq!(a.particles, b.particles);
    let c = generate(&points, &params, &mut StdRng::seed_from_u64(43));
    assert_ne!(a.particles, c.particles);
}

#[test]
fn zero_core_width_pins_core_particles_to_the_curve() {
    let params = GeneratorParams {
        core_width: 0.0,
        ..GeneratorParams::default()
    };
    let out = generate(&line(5, 10.0), &params, &mut StdRng::seed_from_u64(8));
    for p in out.particles.iter().filter(|p| p.layer == Layer::Core) {
        assert_eq!(p.offset.length(), 0.0);
    }
}
