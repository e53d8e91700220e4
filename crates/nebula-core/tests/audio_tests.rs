// Host-side tests for volume smoothing and the level hand-off cell.

use nebula_core::*;
use std::thread;

#[test]
fn smoothing_approaches_one_geometrically() {
    let mut s = VolumeSmoother::default();
    assert_eq!(s.value(), 0.0);
    for n in 1..=60 {
        let v = s.update(1.0);
        let expected = 1.0 - 0.85f64.powi(n);
        assert!((v as f64 - expected).abs() < 1e-5, "tick {n}: {v} vs {expected}");
    }
}

#[test]
fn smoothing_decays_when_input_drops_to_zero() {
    let mut s = VolumeSmoother::default();
    for _ in 0..20 {
        s.update(1.0);
    }
    let start = s.value() as f64;
    for n in 1..=40 {
        let v = s.update(0.0);
        let expected = start * 0.85f64.powi(n);
        assert!((v as f64 - expected).abs() < 1e-5);
    }
    s.reset();
    assert_eq!(s.value(), 0.0);
}

#[test]
fn level_cell_clamps_and_resets() {
    let cell = LevelCell::new();
    assert_eq!(cell.load(), 0.0);
    cell.store(0.42);
    assert_eq!(cell.load(), 0.42);
    cell.store(3.0);
    assert_eq!(cell.load(), 1.0);
    cell.store(-1.0);
    assert_eq!(cell.load(), 0.0);
    cell.store(f32::NAN);
    assert_eq!(cell.load(), 0.0);
    cell.store(0.7);
    cell.reset();
    assert_eq!(cell.load(), 0.0);
}

#[test]
fn level_cell_hands_off_across_threads() {
    let cell = LevelCell::new();
    let writer = cell.clone();
    thread::spawn(move || {
        for i in 0..=10 {
            writer.store(i as f32 / 10.0);
        }
    })
    .join()
    .unwrap();
    assert_eq!(cell.load(), 1.0);
}

#[test]
fn byte_spectrum_average_is_normalized() {
    assert_eq!(average_byte_magnitude(&[]), 0.0);
    assert_eq!(average_byte_magnitude(&[0; 128]), 0.0);
    assert_eq!(average_byte_magnitude(&[255; 128]), 1.0);
    let mixed = [0u8, 255, 0, 255];
    assert!((average_byte_magnitude(&mixed) - 0.5).abs() < 1e-6);
}

#[test]
fn mean_abs_amplitude_is_rectified_and_clamped() {
    assert_eq!(mean_abs_amplitude(&[]), 0.0);
    assert!((mean_abs_amplitude(&[0.5, -0.5, 0.25, -0.25]) - 0.375).abs() < 1e-6);
    assert_eq!(mean_abs_amplitude(&[4.0, -4.0]), 1.0);
}

#[test]
fn audio_status_constructors() {
    assert_eq!(AudioStatus::default(), AudioStatus::stopped());
    assert!(AudioStatus::started().active);
    let failed = AudioStatus::failed("denied");
    assert!(!failed.active);
    assert_eq!(failed.error.as_deref(), Some("denied"));
}
