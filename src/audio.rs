//! Sound cues
//!
//! Procedurally generated sound effects - no external files needed!
//!
//! The game talks to an `AudioService` capability. In the browser that is
//! `WebAudio`, which renders each cue once into an `AudioBuffer` and falls
//! back to live oscillators when a buffer is not available. Every failure is
//! swallowed: sound is best-effort and must never stall a frame.

use std::f32::consts::TAU;

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Run started
    Swoosh,
    /// Flap
    Wing,
    /// Pipe passed
    Point,
    /// Pipe struck
    Hit,
    /// Run over
    Die,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Swoosh, Cue::Wing, Cue::Point, Cue::Hit, Cue::Die];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Swoosh => "swoosh",
            Cue::Wing => "wing",
            Cue::Point => "point",
            Cue::Hit => "hit",
            Cue::Die => "die",
        }
    }

    /// Volume the game requests this cue at, before user settings
    pub fn base_volume(&self) -> f32 {
        match self {
            Cue::Swoosh | Cue::Wing => 0.5,
            Cue::Point | Cue::Hit | Cue::Die => 0.6,
        }
    }

    /// Synth recipe for this cue
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            Cue::Swoosh => SWOOSH,
            Cue::Wing => WING,
            Cue::Point => POINT,
            Cue::Hit => HIT,
            Cue::Die => DIE,
        }
    }
}

/// Rising whoosh
const SWOOSH: &[Tone] = &[
    Tone::new(Waveform::Sawtooth, 200.0, 900.0, 0.0, 0.22, 0.25),
    Tone::new(Waveform::Triangle, 400.0, 1600.0, 0.02, 0.18, 0.2),
];
/// Short flutter
const WING: &[Tone] = &[Tone::new(Waveform::Square, 520.0, 260.0, 0.0, 0.07, 0.25)];
/// Two-note ding
const POINT: &[Tone] = &[
    Tone::new(Waveform::Triangle, 880.0, 880.0, 0.0, 0.08, 0.45),
    Tone::new(Waveform::Triangle, 1320.0, 1320.0, 0.08, 0.14, 0.45),
];
/// Thump
const HIT: &[Tone] = &[
    Tone::new(Waveform::Square, 180.0, 60.0, 0.0, 0.12, 0.4),
    Tone::new(Waveform::Sine, 90.0, 45.0, 0.0, 0.15, 0.6),
];
/// Falling saw, 400 Hz down to 80 Hz
const DIE: &[Tone] = &[Tone::new(Waveform::Sawtooth, 400.0, 80.0, 0.0, 0.45, 0.35)];

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Sample at a phase in cycles ([0, 1) wraps)
    pub fn sample(&self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * TAU).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// One oscillator voice: exponential pitch sweep with an exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Start offset (s)
    pub delay: f32,
    /// Length (s)
    pub duration: f32,
    /// Peak gain
    pub gain: f32,
}

impl Tone {
    pub const fn new(
        waveform: Waveform,
        freq_start: f32,
        freq_end: f32,
        delay: f32,
        duration: f32,
        gain: f32,
    ) -> Self {
        Self {
            waveform,
            freq_start,
            freq_end,
            delay,
            duration,
            gain,
        }
    }

    /// Level the envelope decays to at the end of the tone
    pub const RELEASE_LEVEL: f32 = 0.01;

    fn frequency_at(&self, t: f32) -> f32 {
        self.freq_start * (self.freq_end / self.freq_start).powf(t / self.duration)
    }

    fn envelope_at(&self, t: f32) -> f32 {
        self.gain * Self::RELEASE_LEVEL.powf(t / self.duration)
    }
}

/// Render a cue to mono samples in [-1, 1]
pub fn render_cue(cue: Cue, sample_rate: f32) -> Vec<f32> {
    let tones = cue.tones();
    let length = tones
        .iter()
        .map(|t| t.delay + t.duration)
        .fold(0.0f32, f32::max);
    let frames = (length * sample_rate).ceil() as usize;
    let mut samples = vec![0.0f32; frames];

    for tone in tones {
        let start = (tone.delay * sample_rate) as usize;
        let count = (tone.duration * sample_rate) as usize;
        let mut phase = 0.0f32;
        for (i, out) in samples.iter_mut().skip(start).take(count).enumerate() {
            let t = i as f32 / sample_rate;
            *out += tone.waveform.sample(phase) * tone.envelope_at(t);
            phase = (phase + tone.frequency_at(t) / sample_rate).fract();
        }
    }

    for s in &mut samples {
        *s = s.clamp(-1.0, 1.0);
    }
    samples
}

/// Fire-and-forget sound playback
pub trait AudioService {
    /// Play a cue at `volume` (0.0 - 1.0). Never blocks, never fails loudly.
    fn play(&mut self, cue: Cue, volume: f32);

    /// Prime playback after a user gesture (browsers block audio until then)
    fn unlock(&mut self) {}

    /// Warm caches for cues about to be used
    fn prefetch(&mut self, _cues: &[Cue]) {}
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioService for SilentAudio {
    fn play(&mut self, _cue: Cue, _volume: f32) {}
}

/// Records requested cues instead of playing them
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<(Cue, f32)>,
    pub unlocks: u32,
    pub prefetched: Vec<Cue>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues in the order they were requested
    pub fn cues(&self) -> Vec<Cue> {
        self.played.iter().map(|(cue, _)| *cue).collect()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|(c, _)| *c == cue).count()
    }
}

impl AudioService for RecordingAudio {
    fn play(&mut self, cue: Cue, volume: f32) {
        self.played.push((cue, volume));
    }

    fn unlock(&mut self) {
        self.unlocks += 1;
    }

    fn prefetch(&mut self, cues: &[Cue]) {
        for cue in cues {
            if !self.prefetched.contains(cue) {
                self.prefetched.push(*cue);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use web_sys::{AudioBuffer, AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioService, Cue, Tone, Waveform, render_cue};

    impl Waveform {
        fn oscillator_type(&self) -> OscillatorType {
            match self {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Web Audio backed cue player
    ///
    /// The `AudioContext` is created lazily on first use; until then (or if
    /// creation fails) every call is a no-op.
    #[derive(Default)]
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        ctx_failed: bool,
        buffers: HashMap<Cue, AudioBuffer>,
    }

    impl WebAudio {
        pub fn new() -> Self {
            Self::default()
        }

        fn context(&mut self) -> Option<&AudioContext> {
            if self.ctx.is_none() && !self.ctx_failed {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(e) => {
                        // May fail outside a secure context
                        log::warn!("Failed to create AudioContext - audio disabled: {:?}", e);
                        self.ctx_failed = true;
                    }
                }
            }
            self.ctx.as_ref()
        }

        fn resume_if_suspended(ctx: &AudioContext) {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }

        /// Render a cue into a buffer owned by the context
        fn render_buffer(ctx: &AudioContext, cue: Cue) -> Option<AudioBuffer> {
            let sample_rate = ctx.sample_rate();
            let mut samples = render_cue(cue, sample_rate);
            if samples.is_empty() {
                return None;
            }
            let buffer = ctx
                .create_buffer(1, samples.len() as u32, sample_rate)
                .ok()?;
            buffer.copy_to_channel(&mut samples, 0).ok()?;
            Some(buffer)
        }

        fn play_buffer(ctx: &AudioContext, buffer: &AudioBuffer, volume: f32) -> Option<()> {
            let source = ctx.create_buffer_source().ok()?;
            let gain = ctx.create_gain().ok()?;
            source.set_buffer(Some(buffer));
            gain.gain().set_value(volume);
            source.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            source.start().ok()
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Fallback path: schedule the recipe on live oscillators
        fn play_oscillators(ctx: &AudioContext, cue: Cue, volume: f32) {
            for tone in cue.tones() {
                Self::play_tone(ctx, tone, volume);
            }
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, volume: f32) {
            let Some((osc, gain)) =
                Self::create_osc(ctx, tone.freq_start, tone.waveform.oscillator_type())
            else {
                return;
            };
            let t = ctx.current_time() + tone.delay as f64;
            let end = t + tone.duration as f64;

            gain.gain().set_value_at_time(volume * tone.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(Tone::RELEASE_LEVEL * volume.max(0.01), end)
                .ok();
            osc.frequency().set_value_at_time(tone.freq_start, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.freq_end, end)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.02).ok();
        }
    }

    impl AudioService for WebAudio {
        fn play(&mut self, cue: Cue, volume: f32) {
            if volume <= 0.0 {
                return;
            }
            let Some(ctx) = self.context().cloned() else {
                return;
            };
            Self::resume_if_suspended(&ctx);

            let played = self
                .buffers
                .get(&cue)
                .and_then(|buffer| Self::play_buffer(&ctx, buffer, volume));
            if played.is_none() {
                Self::play_oscillators(&ctx, cue, volume);
            }
        }

        fn unlock(&mut self) {
            if let Some(ctx) = self.context() {
                Self::resume_if_suspended(ctx);
            }
        }

        fn prefetch(&mut self, cues: &[Cue]) {
            let Some(ctx) = self.context().cloned() else {
                return;
            };
            for &cue in cues {
                if self.buffers.contains_key(&cue) {
                    continue;
                }
                match Self::render_buffer(&ctx, cue) {
                    Some(buffer) => {
                        self.buffers.insert(cue, buffer);
                    }
                    None => log::warn!("Could not render cue '{}', using oscillators", cue.as_str()),
                }
            }
        }
    }
}
