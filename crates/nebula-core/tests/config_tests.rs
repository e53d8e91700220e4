// Host-side tests for configuration defaults and validation.

use nebula_core::*;

#[test]
fn defaults_match_reference_constants() {
    let c = SketchConfig::default();
    assert_eq!(c.particle_density, 25.0);
    assert_eq!(c.max_particles_per_stroke, Some(5000));
    assert_eq!(c.min_point_distance, 2.0);
    assert_eq!(c.min_stroke_points, 4);
    assert_eq!(c.core_width, 5.0);
    assert_eq!(c.nebula_width, 45.0);
    assert_eq!(c.volume_smoothing, 0.15);
    assert_eq!(c.motion.flow_speed, 0.08);
    assert_eq!(c.motion.ripple_freq, 0.015);
    assert_eq!(c.motion.ripple_speed, 5.0);
    assert_eq!(c.motion.max_ripple_amp, 40.0);
    assert!(c.glow);
    assert!(c.validate().is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    assert!(CORE_THRESHOLD > NEBULA_THRESHOLD);
    assert!(NEBULA_WIDTH > CORE_WIDTH);
    assert!(BRUSH_MAX_WIDTH > BRUSH_MIN_WIDTH);
    assert!(VOLUME_SMOOTHING > 0.0 && VOLUME_SMOOTHING <= 1.0);
    assert!(DEFAULT_MAX_LIVE_PARTICLES >= MAX_PARTICLES_PER_STROKE);
    assert!(BACKGROUND_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn validation_names_the_offending_field() {
    let cases: Vec<(SketchConfig, &str)> = vec![
        (
            SketchConfig {
                particle_density: 0.0,
                ..SketchConfig::default()
            },
            "particle_density",
        ),
        (
            SketchConfig {
                volume_smoothing: 0.0,
                ..SketchConfig::default()
            },
            "volume_smoothing",
        ),
        (
            SketchConfig {
                volume_smoothing: f32::NAN,
                ..SketchConfig::default()
            },
            "volume_smoothing",
        ),
        (
            SketchConfig {
                nebula_width: f32::INFINITY,
                ..SketchConfig::default()
            },
            "nebula_width",
        ),
        (
            SketchConfig {
                min_stroke_points: 1,
                ..SketchConfig::default()
            },
            "min_stroke_points",
        ),
        (
            SketchConfig {
                background: [0.0, 2.0, 0.0],
                ..SketchConfig::default()
            },
            "background",
        ),
    ];
    for (config, expected) in cases {
        match config.validate() {
            Err(SketchError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected {expected} to be rejected, got {other:?}"),
        }
    }
}

#[test]
fn error_messages_are_readable() {
    let err = SketchError::InvalidConfig {
        field: "particle_density",
        value: -1.0,
        reason: "must be positive",
    };
    assert_eq!(
        err.to_string(),
        "invalid configuration: particle_density = -1 (must be positive)"
    );
    let audio = SketchError::AudioUnavailable("permission denied".into());
    assert_eq!(audio.to_string(), "audio capture unavailable: permission denied");
}
