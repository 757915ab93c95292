// Audio analysis of a track and its tonality

use serde::Deserialize;
use std::fmt;

/// Pitch classes in standard Pitch Class notation (0 = C, 1 = C#/Db, ...)
const PITCH_CLASSES: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

/// Track-level section of the audio analysis resource
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioAnalysis {
    /// Length of the track in seconds
    pub duration: f64,
    pub num_samples: u64,
    pub sample_md5: String,
    pub offset_seconds: f64,
    pub window_seconds: f64,
    pub analysis_sample_rate: u32,
    pub analysis_channels: u32,
    pub end_of_fade_in: f64,
    pub start_of_fade_out: f64,
    /// Overall loudness in dB
    pub loudness: f64,
    /// Estimated tempo in BPM
    pub tempo: f64,
    pub tempo_confidence: f64,
    pub time_signature: i32,
    pub time_signature_confidence: f64,
    /// Pitch class, -1 when no key was detected
    pub key: i32,
    pub key_confidence: f64,
    /// 1 = major, 0 = minor
    pub mode: i32,
    pub mode_confidence: f64,
    #[serde(default)]
    pub codestring: String,
    #[serde(default)]
    pub code_version: f64,
    #[serde(default)]
    pub echoprintstring: String,
    #[serde(default)]
    pub echoprint_version: f64,
    #[serde(default)]
    pub synchstring: String,
    #[serde(default)]
    pub synch_version: f64,
    #[serde(default)]
    pub rhythmstring: String,
    #[serde(default)]
    pub rhythm_version: f64,
}

impl AudioAnalysis {
    pub fn tonality(&self) -> Tonality {
        Tonality {
            key: self.key,
            key_confidence: self.key_confidence,
            mode: self.mode,
            mode_confidence: self.mode_confidence,
        }
    }
}

/// Key and mode of a track, rendered as a chord name such as "Am"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tonality {
    pub key: i32,
    pub key_confidence: f64,
    pub mode: i32,
    pub mode_confidence: f64,
}

impl Tonality {
    /// Chord name, or None when the key was not detected or the mode is
    /// neither major nor minor.
    ///
    /// Enharmonic keys are kept side by side: key 1 in minor is "C#m/Dbm".
    pub fn chord(&self) -> Option<String> {
        let pitch = usize::try_from(self.key)
            .ok()
            .and_then(|k| PITCH_CLASSES.get(k))?;

        match self.mode {
            1 => Some(pitch.to_string()),
            0 => Some(
                pitch
                    .split('/')
                    .map(|p| format!("{}m", p))
                    .collect::<Vec<_>>()
                    .join("/"),
            ),
            _ => None,
        }
    }

    /// Mean of the key and mode confidences
    pub fn confidence(&self) -> f64 {
        (self.key_confidence + self.mode_confidence) / 2.0
    }
}

impl fmt::Display for Tonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chord() {
            Some(chord) => write!(f, "{}", chord),
            None => write!(f, "unknown"),
        }
    }
}
