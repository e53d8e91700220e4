use crate::constants::{
    AUDIO_OFF_LABEL, AUDIO_ON_LABEL, AUDIO_STATUS_ID, AUDIO_TOGGLE_ID, LEVEL_METER_GAIN,
    LEVEL_METER_ID, LEVEL_METER_MAX_PX,
};
use nebula_core::AudioStatus;
use web_sys as web;

/// Width of the level meter bar for a raw volume.
#[inline]
pub fn meter_width_px(volume: f32) -> f32 {
    (volume.max(0.0) * LEVEL_METER_GAIN).min(LEVEL_METER_MAX_PX)
}

pub fn toggle_label(status: &AudioStatus) -> &'static str {
    if status.active {
        AUDIO_ON_LABEL
    } else {
        AUDIO_OFF_LABEL
    }
}

/// Reflect the microphone state in the toggle button and status line.
pub fn show_audio_status(document: &web::Document, status: &AudioStatus) {
    if let Some(el) = document.get_element_by_id(AUDIO_TOGGLE_ID) {
        el.set_text_content(Some(toggle_label(status)));
    }
    if let Some(el) = document.get_element_by_id(AUDIO_STATUS_ID) {
        el.set_text_content(status.error.as_deref());
    }
    if let Some(el) = document.get_element_by_id(LEVEL_METER_ID) {
        let style = if status.active { "" } else { "display:none" };
        _ = el.set_attribute("style", style);
    }
}

pub fn set_meter(meter: &web::HtmlElement, volume: f32) {
    _ = meter
        .style()
        .set_property("width", &format!("{:.1}px", meter_width_px(volume)));
}
