use std::sync::Mutex;

use crate::{SpeechError, SpeechOutput, Utterance, Voice};

/// Speech output that writes utterances to the log instead of a speaker.
///
/// Useful on headless hosts; it tracks the current utterance so `stop`
/// behaves like a real synthesizer.
#[derive(Debug, Default)]
pub struct LogSpeech {
    voices: Vec<Voice>,
    current: Mutex<Option<Utterance>>,
}

impl LogSpeech {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            current: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Option<Utterance> {
        self.lock().clone()
    }

    pub fn is_speaking(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Utterance>> {
        // The guarded value is a plain snapshot, a poisoned lock still holds a usable one
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SpeechOutput for LogSpeech {
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        if let Some(voice) = &utterance.voice
            && !self.voices.iter().any(|v| &v.name == voice)
        {
            return Err(SpeechError::UnknownVoice(voice.clone()));
        }

        let mut current = self.lock();
        if let Some(previous) = current.take() {
            tracing::debug!(text = %previous.text, "Cancelled utterance");
        }

        tracing::info!(
            text = %utterance.text,
            lang = utterance.lang.as_deref().unwrap_or("default"),
            voice = utterance.voice.as_deref().unwrap_or("default"),
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            "Speaking"
        );
        *current = Some(utterance.clone());

        Ok(())
    }

    fn stop(&self) {
        if let Some(previous) = self.lock().take() {
            tracing::info!(text = %previous.text, "Stopped speaking");
        }
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}
