//! Tone synthesis using the Web Audio API.
//!
//! One lazily created `AudioContext` serves the whole page. Browsers start it
//! suspended until a user gesture, so it is resumed before every note.

use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::config::MusicConfig;

/// Fixed note table for the emoji keyboard (Hz).
pub const NOTES: &[(&str, f32)] = &[
    ("C4", 261.63),
    ("D4", 293.66),
    ("E4", 329.63),
    ("F4", 349.23),
    ("G4", 392.00),
    ("A4", 440.00),
    ("B4", 493.88),
    ("C5", 523.25),
];

pub fn note_frequency(note: &str) -> Option<f32> {
    NOTES.iter().find(|(n, _)| *n == note).map(|(_, f)| *f)
}

/// Gain keyframes relative to note start: silence, linear attack, exponential release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub attack_s: f64,
    pub release_s: f64,
    pub peak: f32,
    pub floor: f32,
}

impl Envelope {
    pub fn from_config(cfg: &MusicConfig) -> Self {
        Self {
            attack_s: cfg.attack_s,
            release_s: cfg.release_s.max(cfg.attack_s),
            peak: cfg.peak_gain,
            // exponential ramps cannot target zero
            floor: cfg.floor_gain.max(f32::MIN_POSITIVE),
        }
    }

    /// When the oscillator must stop, relative to note start.
    pub fn stop_at(&self) -> f64 {
        self.release_s
    }
}

pub struct Synth {
    ctx: Option<AudioContext>,
    envelope: Envelope,
    failed: bool,
}

impl Synth {
    pub fn new(cfg: &MusicConfig) -> Self {
        Self { ctx: None, envelope: Envelope::from_config(cfg), failed: false }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.failed {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.failed = true;
                }
            }
        }
        self.ctx.as_ref()
    }

    pub fn play_note(&mut self, note: &str) {
        match note_frequency(note) {
            Some(freq) => self.play_tone(freq),
            None => log::debug!("unknown note '{note}' ignored"),
        }
    }

    pub fn play_tone(&mut self, freq: f32) {
        let env = self.envelope;
        let Some(ctx) = self.context() else { return };

        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
            log::warn!("could not create audio nodes");
            return;
        };
        let t = ctx.current_time();

        osc.set_type(OscillatorType::Triangle);
        osc.frequency().set_value_at_time(freq, t).ok();

        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(env.peak, t + env.attack_s)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(env.floor, t + env.release_s)
            .ok();

        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            log::warn!("could not wire oscillator to output");
            return;
        }

        osc.start().ok();
        osc.stop_with_when(t + env.stop_at()).ok();
    }
}
