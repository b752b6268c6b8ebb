//! JSON configuration and text/JSON report writers for phrase recognition.

use std::fmt::Write as _;
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::alphabet::{alphabet_symbols, GEORGIAN_ALPHABET};
use crate::recognizer::{Recognition, RecognizerParams, SegmentRecognition};
use crate::score::Score;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_alphabet() -> String {
    GEORGIAN_ALPHABET.to_string()
}

fn default_reference_dir() -> PathBuf {
    PathBuf::from("alphabet")
}

fn default_phrase_path() -> PathBuf {
    PathBuf::from("pictures_src/phrase1.bmp")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("pictures_results")
}

fn default_ground_truth() -> Option<String> {
    Some("მთვარე დღეს ისეთი ლამაზია".to_string())
}

/// Paths and parameters for one recognition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Template symbols in order; whitespace is ignored.
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    /// Directory holding one `<symbol>.bmp` per alphabet symbol.
    #[serde(default = "default_reference_dir")]
    pub reference_dir: PathBuf,
    #[serde(default = "default_phrase_path")]
    pub phrase_path: PathBuf,
    #[serde(default = "default_ground_truth")]
    pub ground_truth: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub params: RecognizerParams,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            alphabet: default_alphabet(),
            reference_dir: default_reference_dir(),
            phrase_path: default_phrase_path(),
            ground_truth: default_ground_truth(),
            output_dir: default_output_dir(),
            params: RecognizerParams::default(),
        }
    }
}

impl OcrConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Alphabet as an ordered symbol list.
    pub fn symbols(&self) -> Vec<char> {
        alphabet_symbols(&self.alphabet)
    }

    pub fn hypotheses_path(&self) -> PathBuf {
        self.output_dir.join("hypotheses.txt")
    }

    pub fn prediction_path(&self) -> PathBuf {
        self.output_dir.join("best_prediction.txt")
    }

    pub fn annotated_path(&self) -> PathBuf {
        self.output_dir.join("phrase_segmented.bmp")
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("report.json")
    }
}

/// Serializable summary of one recognition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionReport {
    pub phrase_path: PathBuf,
    pub prediction: String,
    #[serde(default)]
    pub ground_truth: Option<String>,
    #[serde(default)]
    pub score: Option<Score>,
    pub params: RecognizerParams,
    pub segments: Vec<SegmentRecognition>,
}

impl RecognitionReport {
    pub fn new(
        phrase_path: impl Into<PathBuf>,
        recognition: &Recognition,
        ground_truth: Option<&str>,
        score: Option<Score>,
        params: RecognizerParams,
    ) -> Self {
        Self {
            phrase_path: phrase_path.into(),
            prediction: recognition.text(),
            ground_truth: ground_truth.map(str::to_string),
            score,
            params,
            segments: recognition.segments.clone(),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Per-segment ranking, one line per segment: `1: [('ა', 0.9123), ...]`.
pub fn format_hypotheses(recognition: &Recognition) -> String {
    let mut out = String::new();
    for (i, seg) in recognition.segments.iter().enumerate() {
        let items = seg
            .hypotheses
            .iter()
            .map(|h| format!("('{}', {:.4})", h.label, h.similarity))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{}: [{}]", i + 1, items);
    }
    out
}

pub fn write_hypotheses(path: impl AsRef<Path>, recognition: &Recognition) -> Result<(), IoError> {
    fs::write(path, format_hypotheses(recognition))?;
    Ok(())
}

/// Best prediction as a single line of text.
pub fn write_prediction(path: impl AsRef<Path>, recognition: &Recognition) -> Result<(), IoError> {
    fs::write(path, recognition.text())?;
    Ok(())
}
