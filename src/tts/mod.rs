//! Text-to-Speech output
//!
//! Reads the displayed time aloud through the platform voice
//! (Windows SAPI, macOS AVSpeechSynthesizer, Linux Speech Dispatcher).
//! A missing or broken voice facility is never an error: speech quietly
//! becomes a no-op and a warning is logged once.

use crate::config::TtsConfig;
use crate::core::clock::ClockTime;
use anyhow::Result;
use tts::Tts;

/// Phrase spoken for a time, e.g. "4時5分"
pub fn phrase(time: ClockTime) -> String {
    format!("{}時{}分", time.hour(), time.minute())
}

/// Text-to-speech wrapper
///
/// The engine is created lazily on the first utterance. When disabled in
/// config, or after initialization failed, every call is a no-op.
pub struct Speaker {
    engine: Option<Tts>,

    /// Is TTS enabled in config?
    enabled: bool,

    /// Initialization failed once; stay silent from now on
    unavailable: bool,

    /// BCP 47 tag of the preferred voice language
    language: String,

    /// Preferred voice name (None = first voice matching `language`)
    voice: Option<String>,

    rate: f32,
    volume: f32,
}

impl Speaker {
    pub fn new(config: &TtsConfig) -> Self {
        Self {
            engine: None,
            enabled: config.enabled,
            unavailable: false,
            language: config.language.clone(),
            voice: config.voice.clone(),
            rate: config.rate,
            volume: config.volume,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.unavailable
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Read a time aloud
    pub fn speak_time(&mut self, time: ClockTime) {
        self.speak(&phrase(time));
    }

    /// Speak text, interrupting anything still playing
    pub fn speak(&mut self, text: &str) {
        if !self.is_enabled() {
            return;
        }
        if let Err(e) = self.try_speak(text) {
            tracing::warn!("TTS unavailable, speech disabled: {}", e);
            self.unavailable = true;
            self.engine = None;
        }
    }

    fn try_speak(&mut self, text: &str) -> Result<()> {
        self.ensure_initialized()?;
        if let Some(ref mut engine) = self.engine {
            tracing::debug!("Speaking: {}", text);
            engine.speak(text, true)?;
        }
        Ok(())
    }

    fn ensure_initialized(&mut self) -> Result<()> {
        if self.engine.is_some() {
            return Ok(());
        }

        tracing::info!("Initializing TTS engine...");
        let mut tts = Tts::default()?;

        let rate = self.rate.clamp(tts.min_rate(), tts.max_rate());
        let volume = tts.min_volume()
            + self.volume.clamp(0.0, 1.0) * (tts.max_volume() - tts.min_volume());
        let _ = tts.set_rate(rate);
        let _ = tts.set_volume(volume);
        tracing::info!("TTS configured: rate={}, volume={}", rate, volume);

        self.select_voice(&mut tts)?;
        self.engine = Some(tts);
        Ok(())
    }

    /// Pick the configured voice, else the first one speaking `language`.
    /// Backends without voice selection keep their default.
    fn select_voice(&self, tts: &mut Tts) -> Result<()> {
        if !tts.supported_features().voice {
            tracing::debug!("TTS backend cannot select voices, using default");
            return Ok(());
        }

        let voices = tts.voices()?;
        let chosen = voices
            .iter()
            .find(|v| self.voice.as_deref() == Some(v.name().as_str()))
            .or_else(|| {
                voices
                    .iter()
                    .find(|v| v.language().as_str().eq_ignore_ascii_case(&self.language))
            });

        match chosen {
            Some(voice) => {
                tracing::info!("TTS voice: {} ({})", voice.name(), voice.language().as_str());
                tts.set_voice(voice)?;
            }
            None => tracing::warn!("No TTS voice for {}, using default", self.language),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_format() {
        assert_eq!(phrase(ClockTime::new(4, 5)), "4時5分");
        assert_eq!(phrase(ClockTime::new(12, 30)), "12時30分");
    }

    #[test]
    fn test_disabled_speaker_is_silent_noop() {
        let config = TtsConfig {
            enabled: false,
            ..TtsConfig::default()
        };
        let mut speaker = Speaker::new(&config);
        assert!(!speaker.is_enabled());
        speaker.speak_time(ClockTime::new(3, 0));
        assert!(!speaker.is_initialized());
    }
}
