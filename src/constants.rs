// Page element ids and web-only tuning.

pub const CANVAS_ID: &str = "app-canvas";
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const AUDIO_STATUS_ID: &str = "audio-status";
pub const LEVEL_METER_ID: &str = "level-meter";

pub const ANALYSER_FFT_SIZE: u32 = 256; // 128 frequency bins
pub const MIC_REQUIRED_MESSAGE: &str = "Microphone access is required for audio reactivity.";

pub const LEVEL_METER_GAIN: f32 = 500.0; // px per unit of raw volume
pub const LEVEL_METER_MAX_PX: f32 = 100.0;

pub const AUDIO_ON_LABEL: &str = "Disable Audio";
pub const AUDIO_OFF_LABEL: &str = "Enable Audio";
