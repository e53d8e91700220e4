// ---------------- Native microphone input (cpal) ----------------

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use nebula_core::{mean_abs_amplitude, AudioStatus, LevelCell, SketchError};

/// Default input device feeding loudness readings into a [`LevelCell`].
pub struct MicInput {
    level: LevelCell,
    stream: Option<cpal::Stream>,
    status: AudioStatus,
}

impl Default for MicInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MicInput {
    pub fn new() -> Self {
        Self {
            level: LevelCell::new(),
            stream: None,
            status: AudioStatus::stopped(),
        }
    }

    /// Latest raw reading; 0 while stopped.
    pub fn level(&self) -> f32 {
        self.level.load()
    }

    pub fn status(&self) -> &AudioStatus {
        &self.status
    }

    pub fn toggle(&mut self) {
        if self.status.active {
            self.stop();
            return;
        }
        if let Err(e) = self.start() {
            log::warn!("{e}");
        }
    }

    pub fn start(&mut self) -> Result<(), SketchError> {
        if self.stream.is_some() {
            return Ok(());
        }
        match open_input_stream(self.level.clone()) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.status = AudioStatus::started();
                log::info!("[audio] microphone active");
                Ok(())
            }
            Err(e) => {
                self.status = AudioStatus::failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop the stream and pin the level at zero so the sketch decays.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                log::debug!("[audio] pause on stop failed: {e}");
            }
        }
        self.level.reset();
        self.status = AudioStatus::stopped();
        log::info!("[audio] microphone stopped");
    }
}

fn unavailable(e: impl std::fmt::Display) -> SketchError {
    SketchError::AudioUnavailable(e.to_string())
}

fn open_input_stream(level: LevelCell) -> Result<cpal::Stream, SketchError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| unavailable("no input device"))?;
    let supported = device.default_input_config().map_err(unavailable)?;
    let config = supported.config();
    log::info!(
        "[audio] input '{}' {}ch @ {}Hz {:?}",
        device.name().unwrap_or_else(|_| "unknown".into()),
        config.channels,
        config.sample_rate.0,
        supported.sample_format()
    );

    let err_fn = |err| log::error!("audio input stream error: {err}");

    let stream = match supported.sample_format() {
        cpal::SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                level.store(mean_abs_amplitude(data));
            },
            err_fn,
            None,
        ),
        cpal::SampleFormat::I16 => {
            let mut scratch: Vec<f32> = Vec::new();
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    scratch.clear();
                    scratch.extend(data.iter().map(|&s| s as f32 / i16::MAX as f32));
                    level.store(mean_abs_amplitude(&scratch));
                },
                err_fn,
                None,
            )
        }
        cpal::SampleFormat::U16 => {
            let mut scratch: Vec<f32> = Vec::new();
            device.build_input_stream(
                &config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    scratch.clear();
                    scratch.extend(
                        data.iter()
                            .map(|&s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0),
                    );
                    level.store(mean_abs_amplitude(&scratch));
                },
                err_fn,
                None,
            )
        }
        other => return Err(unavailable(format!("unsupported sample format {other:?}"))),
    }
    .map_err(unavailable)?;

    stream.play().map_err(unavailable)?;
    Ok(stream)
}
