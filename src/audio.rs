use crate::constants::{ANALYSER_FFT_SIZE, MIC_REQUIRED_MESSAGE};
use nebula_core::{average_byte_magnitude, AudioStatus, LevelCell};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Live WebAudio graph: microphone stream -> analyser.
struct MicGraph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    stream: web::MediaStream,
}

/// Microphone level source polled once per animation frame.
pub struct MicAnalyser {
    graph: Option<MicGraph>,
    bins: Vec<u8>,
    level: LevelCell,
    status: AudioStatus,
    pending: bool,
}

impl Default for MicAnalyser {
    fn default() -> Self {
        Self::new()
    }
}

impl MicAnalyser {
    pub fn new() -> Self {
        Self {
            graph: None,
            bins: Vec::new(),
            level: LevelCell::new(),
            status: AudioStatus::stopped(),
            pending: false,
        }
    }

    pub fn status(&self) -> &AudioStatus {
        &self.status
    }

    /// A permission prompt is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn begin_start(&mut self) {
        self.pending = true;
    }

    /// Read the analyser into the level cell and return the raw level.
    pub fn poll(&mut self) -> f32 {
        if let Some(g) = &self.graph {
            g.analyser.get_byte_frequency_data(&mut self.bins);
            self.level.store(average_byte_magnitude(&self.bins));
        }
        self.level.load()
    }

    fn attach(&mut self, graph: MicGraph) {
        self.bins = vec![0; graph.analyser.frequency_bin_count() as usize];
        self.graph = Some(graph);
        self.status = AudioStatus::started();
        self.pending = false;
    }

    fn fail(&mut self, message: &str) {
        self.graph = None;
        self.level.reset();
        self.status = AudioStatus::failed(message);
        self.pending = false;
    }

    pub fn stop(&mut self) {
        if let Some(g) = self.graph.take() {
            stop_tracks(&g.stream);
            _ = g.analyser.disconnect();
            _ = g.ctx.close();
        }
        self.bins.clear();
        self.level.reset();
        self.status = AudioStatus::stopped();
        self.pending = false;
        log::info!("[audio] microphone stopped");
    }

    /// Request the microphone and attach an analyser. Failures leave the
    /// level pinned at 0 and record a user-visible message.
    pub async fn start(mic: std::rc::Rc<std::cell::RefCell<MicAnalyser>>) {
        match open_graph().await {
            Ok(graph) => {
                let mut m = mic.borrow_mut();
                if m.pending {
                    m.attach(graph);
                    log::info!("[audio] microphone started");
                } else {
                    // stopped while the prompt was open
                    stop_tracks(&graph.stream);
                    _ = graph.ctx.close();
                }
            }
            Err(e) => {
                log::warn!("[audio] microphone unavailable: {:?}", e);
                mic.borrow_mut().fail(MIC_REQUIRED_MESSAGE);
            }
        }
    }
}

async fn open_graph() -> Result<MicGraph, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream: web::MediaStream = JsFuture::from(promise).await?.dyn_into()?;

    let ctx = web::AudioContext::new()?;
    let analyser = ctx.create_analyser()?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    let source = ctx.create_media_stream_source(&stream)?;
    source.connect_with_audio_node(&analyser)?;
    if let Ok(p) = ctx.resume() {
        _ = JsFuture::from(p).await;
    }
    Ok(MicGraph {
        ctx,
        analyser,
        stream,
    })
}

fn stop_tracks(stream: &web::MediaStream) {
    for t in stream.get_tracks().iter() {
        if let Ok(track) = t.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}
