use std::io::Write;

use anyhow::Result;
use reltime_speech::{SpeechOutput, Utterance};
use time::OffsetDateTime;

use crate::relative_time::RelativeTimeFormatter;

/// Options of `reltime format`
#[derive(Debug, Default)]
pub struct FormatOptions {
    pub timestamps: Vec<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

/// Formatter for the command line: explicit flags win over the config file,
/// and unlike per-request hints an unknown value is an error.
pub fn formatter(config: &crate::config::Config, options: &FormatOptions) -> Result<RelativeTimeFormatter> {
    let locale = options.locale.as_deref().unwrap_or(&config.display.locale);
    let timezone = options.timezone.as_deref().unwrap_or(&config.display.timezone);

    Ok(RelativeTimeFormatter::new(locale, timezone)?)
}

/// Writes one label per timestamp, or a single label when none were given.
pub fn run(
    formatter: &RelativeTimeFormatter,
    timestamps: &[String],
    now: OffsetDateTime,
    speech: Option<&dyn SpeechOutput>,
    out: &mut impl Write,
) -> Result<()> {
    let inputs: Vec<Option<&str>> = if timestamps.is_empty() {
        vec![None]
    } else {
        timestamps.iter().map(|t| Some(t.as_str())).collect()
    };

    for input in inputs {
        let label = formatter.format_at(input, now);
        writeln!(out, "{label}")?;

        if let Some(speech) = speech {
            speech.speak(&Utterance::new(label)?.lang(formatter.locale()))?;
        }
    }

    Ok(())
}
