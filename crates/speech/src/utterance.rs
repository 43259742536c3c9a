use serde::{Deserialize, Serialize};

use crate::SpeechError;

pub const RATE_RANGE: (f32, f32) = (0.1, 10.0);
pub const PITCH_RANGE: (f32, f32) = (0.0, 2.0);
pub const VOLUME_RANGE: (f32, f32) = (0.0, 1.0);

/// Text plus the knobs a synthesizer accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub lang: Option<String>,
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Result<Self, SpeechError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        Ok(Self {
            text,
            lang: None,
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        })
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn rate(mut self, rate: f32) -> Result<Self, SpeechError> {
        self.rate = check("rate", rate, RATE_RANGE)?;
        Ok(self)
    }

    pub fn pitch(mut self, pitch: f32) -> Result<Self, SpeechError> {
        self.pitch = check("pitch", pitch, PITCH_RANGE)?;
        Ok(self)
    }

    pub fn volume(mut self, volume: f32) -> Result<Self, SpeechError> {
        self.volume = check("volume", volume, VOLUME_RANGE)?;
        Ok(self)
    }
}

fn check(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<f32, SpeechError> {
    if !(min..=max).contains(&value) {
        return Err(SpeechError::OutOfRange {
            name,
            min,
            max,
            value,
        });
    }

    Ok(value)
}
