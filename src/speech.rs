// Speech output on top of the platform TTS engine
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use tts::Tts;

use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech engine: {0}")]
    Engine(#[from] tts::Error),

    #[error("no installed voice matches {0:?}")]
    VoiceNotFound(String),
}

/// Seam between the narration pipeline and the platform engine.
pub trait Voice {
    /// Append one utterance to the playback queue without interrupting
    /// anything already queued.
    fn enqueue(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Block until everything queued so far has been played.
    fn flush(&mut self) -> Result<(), SpeechError>;

    /// Utterances queued since the last flush.
    fn queued(&self) -> usize;
}

/// The real system voice, backed by the `tts` crate.
pub struct SystemVoice {
    tts: Tts,
    queued: usize,
    queued_chars: usize,
}

impl SystemVoice {
    pub fn new(voice: Option<&str>, rate_percent: Option<f32>) -> Result<Self, SpeechError> {
        let mut tts = Tts::default()?;
        let features = tts.supported_features();

        if let Some(pattern) = voice {
            if features.voice {
                let wanted = pattern.to_lowercase();
                let voices = tts.voices()?;
                let chosen = voices
                    .iter()
                    .find(|v| v.name().to_lowercase().contains(&wanted))
                    .ok_or_else(|| SpeechError::VoiceNotFound(pattern.to_string()))?;
                debug!(voice = %chosen.name(), "selected voice");
                tts.set_voice(chosen)?;
            } else {
                warn!("this speech engine cannot switch voices; ignoring --voice");
            }
        }

        if let Some(percent) = rate_percent {
            if features.rate {
                let percent = percent.clamp(0.0, 100.0);
                let span = tts.max_rate() - tts.min_rate();
                tts.set_rate(tts.min_rate() + span * percent / 100.0)?;
            } else {
                warn!("this speech engine cannot change rate; ignoring --rate");
            }
        }

        Ok(Self {
            tts,
            queued: 0,
            queued_chars: 0,
        })
    }
}

impl Voice for SystemVoice {
    fn enqueue(&mut self, text: &str) -> Result<(), SpeechError> {
        self.tts.speak(text, false)?;
        self.queued += 1;
        self.queued_chars += text.chars().count();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SpeechError> {
        if self.queued == 0 {
            return Ok(());
        }

        if self.tts.supported_features().is_speaking {
            // Give the engine a moment to start before the first poll.
            thread::sleep(config::SPEAK_POLL_INTERVAL);
            while self.tts.is_speaking()? {
                thread::sleep(config::SPEAK_POLL_INTERVAL);
            }
        } else {
            // Engine cannot report playback state; wait out an estimate.
            let seconds = self.queued_chars as f32 / config::ESTIMATED_CHARS_PER_SECOND;
            thread::sleep(Duration::from_secs_f32(seconds));
        }

        self.queued = 0;
        self.queued_chars = 0;
        Ok(())
    }

    fn queued(&self) -> usize {
        self.queued
    }
}

/// Discards every utterance; backs --dry-run.
#[derive(Debug, Default)]
pub struct NullVoice;

impl Voice for NullVoice {
    fn enqueue(&mut self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn queued(&self) -> usize {
        0
    }
}

/// Print the voices the engine offers, one per line.
pub fn list_voices() -> Result<(), SpeechError> {
    let tts = Tts::default()?;
    if !tts.supported_features().voice {
        println!("This speech engine does not expose a voice list.");
        return Ok(());
    }
    for voice in tts.voices()? {
        println!("{}  [{}]", voice.name(), voice.id());
    }
    Ok(())
}
