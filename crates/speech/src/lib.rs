//! Speech output as an explicit capability.
//!
//! Consumers receive a `SpeechOutput` instead of reaching for a global
//! synthesizer, so tests and headless runs can swap in their own.

mod logging;
mod utterance;

pub use logging::*;
pub use utterance::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SpeechError {
    #[error("Nothing to say")]
    EmptyText,

    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
    #[serde(default)]
    pub default: bool,
}

pub trait SpeechOutput {
    /// Starts saying `utterance`, cancelling whatever is being said.
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Silences the current utterance. A no-op when idle.
    fn stop(&self);

    fn voices(&self) -> Vec<Voice>;
}
