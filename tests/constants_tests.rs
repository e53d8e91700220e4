// Host-side tests for constants and the pure overlay/painter helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod overlay {
    include!("../src/overlay.rs");
}
mod render {
    include!("../src/render.rs");
}

use constants::*;
use nebula_core::{AudioStatus, BlendMode, BACKGROUND_COLOR};

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_fft_size_is_power_of_two() {
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert_eq!(ANALYSER_FFT_SIZE, 256);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [CANVAS_ID, AUDIO_TOGGLE_ID, AUDIO_STATUS_ID, LEVEL_METER_ID];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn meter_width_is_linear_then_capped() {
    assert_eq!(overlay::meter_width_px(0.0), 0.0);
    assert!((overlay::meter_width_px(0.1) - 50.0).abs() < 1e-4);
    assert_eq!(overlay::meter_width_px(0.2), 100.0);
    assert_eq!(overlay::meter_width_px(1.0), 100.0);
    assert_eq!(overlay::meter_width_px(-0.5), 0.0);
}

#[test]
fn toggle_label_follows_audio_state() {
    assert_eq!(overlay::toggle_label(&AudioStatus::started()), AUDIO_ON_LABEL);
    assert_eq!(overlay::toggle_label(&AudioStatus::stopped()), AUDIO_OFF_LABEL);
    let failed = AudioStatus::failed(MIC_REQUIRED_MESSAGE);
    assert_eq!(overlay::toggle_label(&failed), AUDIO_OFF_LABEL);
    assert_eq!(failed.error.as_deref(), Some(MIC_REQUIRED_MESSAGE));
}

#[test]
fn css_colors_for_brush_and_background() {
    assert_eq!(
        render::css_rgba([1.0, 1.0, 1.0, 0.8]),
        "rgba(255, 255, 255, 0.8)"
    );
    let [r, g, b] = BACKGROUND_COLOR;
    assert_eq!(render::css_rgba([r, g, b, 1.0]), "rgba(5, 5, 5, 1)");
}

#[test]
fn css_color_clamps_out_of_range_channels() {
    assert_eq!(render::css_rgba([2.0, -1.0, 0.5, 1.5]), "rgba(255, 0, 128, 1)");
}

#[test]
fn blend_modes_map_to_composite_operations() {
    assert_eq!(render::composite_op(BlendMode::Normal), "source-over");
    assert_eq!(render::composite_op(BlendMode::Additive), "lighter");
}
