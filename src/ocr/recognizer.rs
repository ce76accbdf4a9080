//! Three-outcome text recognition over an OCR engine.
//!
//! Every call returns text: real OCR output, the fixed placeholder when
//! no engine is installed, or a failure description when the engine
//! faults. Blank OCR output is surfaced as-is so the pipeline can report
//! the no-text failure.

use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::models::TextProvenance;

use super::engine::OcrEngine;

/// Fixed placeholder returned when no OCR engine is installed.
pub const PLACEHOLDER_TEXT: &str =
    "SAMPLE TEXT: REPUBLIC OF INDIA PASSPORT - This is a demo response while OCR is being set up.";

/// Text obtained for an image, tagged with how it was obtained.
#[derive(Debug, Clone)]
pub struct RecognizedText {
    /// Recognized text, placeholder, or failure description.
    pub text: String,
    /// How the text was obtained.
    pub provenance: TextProvenance,
    /// Whether an engine was found on this host.
    pub engine_available: bool,
    /// Engine failure description, set only on the fallback path.
    pub error: Option<String>,
}

/// Runs OCR with a primary and a reduced secondary language hint set.
pub struct TextRecognizer {
    engine: Arc<dyn OcrEngine>,
    languages: String,
    fallback_languages: String,
}

impl TextRecognizer {
    /// Create a recognizer over an engine using the configured hints.
    pub fn new(engine: Arc<dyn OcrEngine>, settings: &Settings) -> Self {
        Self {
            engine,
            languages: settings.ocr_languages.clone(),
            fallback_languages: settings.ocr_fallback_languages.clone(),
        }
    }

    /// Whether the underlying engine is available on this host.
    pub fn engine_available(&self) -> bool {
        self.engine.is_available()
    }

    /// Description of what is needed to make the engine available.
    pub fn availability_hint(&self) -> String {
        self.engine.availability_hint()
    }

    /// Obtain text for an image. Never fails; soft failures are encoded
    /// in the provenance tag.
    pub fn recognize(&self, image_path: &Path) -> RecognizedText {
        if !self.engine.is_available() {
            tracing::info!(
                engine = self.engine.name(),
                "OCR engine not available, answering with placeholder text"
            );
            return RecognizedText {
                text: PLACEHOLDER_TEXT.to_string(),
                provenance: TextProvenance::Demo,
                engine_available: false,
                error: None,
            };
        }

        match self.engine.recognize(image_path, &self.languages) {
            Ok(text) if !text.trim().is_empty() => RecognizedText {
                text,
                provenance: TextProvenance::Ocr,
                engine_available: true,
                error: None,
            },
            Ok(blank) => self.secondary_pass(image_path, blank),
            Err(e) => {
                tracing::warn!(engine = self.engine.name(), error = %e, "OCR call faulted");
                RecognizedText {
                    text: format!("OCR processing encountered an issue: {}", e),
                    provenance: TextProvenance::Fallback,
                    engine_available: true,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// One best-effort retry with the reduced language hint set. If it
    /// also yields nothing, the blank primary result stands.
    fn secondary_pass(&self, image_path: &Path, blank: String) -> RecognizedText {
        tracing::info!(
            languages = %self.fallback_languages,
            "primary OCR pass returned no text, retrying with reduced hints"
        );
        match self.engine.recognize(image_path, &self.fallback_languages) {
            Ok(text) if !text.trim().is_empty() => RecognizedText {
                text,
                provenance: TextProvenance::OcrSecondary,
                engine_available: true,
                error: None,
            },
            _ => RecognizedText {
                text: blank,
                provenance: TextProvenance::Ocr,
                engine_available: true,
                error: None,
            },
        }
    }
}
