//! TwiML Document Builder
//!
//! Builds the `<Response>` document Twilio interprets during the call.
//! Construction is pure; nothing here touches the network.

use std::fmt::Write;

/// Text spoken in every announcement, German throughout.
const GREETING: &str = "Hallo! Dies ist ein Test-Anruf von Twilio.";
const FAREWELL: &str = "Das war eine Audio-Demonstration. Auf Wiedersehen!";

/// Twilio's public sample clip.
const SAMPLE_AUDIO_URL: &str = "http://demo.twilio.com/docs/classic.mp3";

const TTS_LANGUAGE: &str = "de-DE";
const TTS_VOICE: &str = "Polly.Hans";

/// A single TwiML verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Say {
        text: String,
        language: String,
        voice: String,
    },
    Play {
        url: String,
    },
}

/// An ordered TwiML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `<Say>` verb.
    pub fn say(mut self, text: &str, language: &str, voice: &str) -> Self {
        self.verbs.push(Verb::Say {
            text: text.to_string(),
            language: language.to_string(),
            voice: voice.to_string(),
        });
        self
    }

    /// Append a `<Play>` verb.
    pub fn play(mut self, url: &str) -> Self {
        self.verbs.push(Verb::Play {
            url: url.to_string(),
        });
        self
    }

    /// Serialize to TwiML. All text and attribute values are XML-escaped
    /// since this document is interpreted verbatim during a live call.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>");
        for verb in &self.verbs {
            match verb {
                Verb::Say {
                    text,
                    language,
                    voice,
                } => {
                    let _ = write!(
                        xml,
                        "\n    <Say voice=\"{}\" language=\"{}\">{}</Say>",
                        escape_xml(voice),
                        escape_xml(language),
                        escape_xml(text)
                    );
                }
                Verb::Play { url } => {
                    let _ = write!(xml, "\n    <Play>{}</Play>", escape_xml(url));
                }
            }
        }
        xml.push_str("\n</Response>");
        xml
    }
}

/// The fixed call script: greeting, sample audio, farewell.
pub fn announcement() -> VoiceResponse {
    VoiceResponse::new()
        .say(GREETING, TTS_LANGUAGE, TTS_VOICE)
        .play(SAMPLE_AUDIO_URL)
        .say(FAREWELL, TTS_LANGUAGE, TTS_VOICE)
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
