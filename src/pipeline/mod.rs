//! The document processing pipeline.
//!
//! Four stages executed synchronously per request: decode and normalize
//! the image, recognize text, classify, extract fields. Control flows
//! strictly forward; the only deviation is the OCR degradation policy
//! inside the recognizer. Every fault is converted into a `success =
//! false` result at this boundary - callers never see a raw error.

mod classifier;
mod extractor;

pub use classifier::{classify, ClassificationRule, RULES};
pub use extractor::{ExtractedFields, FieldExtractor};

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::config::Settings;
use crate::models::{DocumentType, ProcessingResult, StructuredRecord};
use crate::ocr::{OcrEngine, RecognizedText, TesseractEngine, TextRecognizer};

/// Hard cap on `extracted_text` length in characters. Output-only:
/// classification and extraction always see the full text.
pub const MAX_EXTRACTED_TEXT_CHARS: usize = 2000;

/// Error reported when OCR yields no text at all.
pub const NO_TEXT_ERROR: &str = "No text could be extracted from the image";

/// Faults inside the pipeline stages. Converted to failure results at
/// the public boundary, never surfaced to callers.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image could not be decoded: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The classification-and-extraction pipeline.
///
/// Holds only read-only state (compiled patterns, language hints), so a
/// single instance is safe to share across concurrent requests.
pub struct DocumentPipeline {
    recognizer: TextRecognizer,
    extractor: FieldExtractor,
}

impl DocumentPipeline {
    /// Create a pipeline over the Tesseract engine.
    pub fn new(settings: &Settings) -> Self {
        Self::with_engine(Arc::new(TesseractEngine::new(settings)), settings)
    }

    /// Create a pipeline over a custom OCR engine.
    pub fn with_engine(engine: Arc<dyn OcrEngine>, settings: &Settings) -> Self {
        Self {
            recognizer: TextRecognizer::new(engine, settings),
            extractor: FieldExtractor::new(),
        }
    }

    /// Whether the underlying OCR engine is available on this host.
    pub fn engine_available(&self) -> bool {
        self.recognizer.engine_available()
    }

    /// Description of what is needed to make the engine available.
    pub fn availability_hint(&self) -> String {
        self.recognizer.availability_hint()
    }

    /// Process raw image bytes into a result. Never fails: any stage
    /// fault becomes a `success = false` result.
    pub fn process_bytes(&self, bytes: &[u8]) -> ProcessingResult {
        match self.run(bytes) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "pipeline fault");
                ProcessingResult::failure(format!("Processing error: {}", e))
            }
        }
    }

    /// Process an image file on disk.
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        match std::fs::read(path) {
            Ok(bytes) => self.process_bytes(&bytes),
            Err(e) => ProcessingResult::failure(format!("Processing error: {}", e)),
        }
    }

    /// Classify and extract over already-recognized text.
    pub fn process_recognized(&self, recognized: RecognizedText) -> ProcessingResult {
        if recognized.text.trim().is_empty() {
            return ProcessingResult::failure(NO_TEXT_ERROR);
        }

        let (document_type, confidence) = classify(&recognized.text);
        let fields = self.extractor.extract(&recognized.text, document_type);

        tracing::info!(
            document_type = %document_type,
            confidence,
            provenance = %recognized.provenance,
            raw_text_length = recognized.text.chars().count(),
            "document processed"
        );

        self.assemble(recognized, document_type, confidence, fields)
    }

    /// Decode, normalize, hand a temporary PNG to the recognizer, then
    /// classify and extract.
    fn run(&self, bytes: &[u8]) -> Result<ProcessingResult, PipelineError> {
        let img = image::load_from_memory(bytes)?;
        let rgb = img.to_rgb8();

        let temp_dir = tempfile::TempDir::new()?;
        let image_path = temp_dir.path().join("document.png");
        rgb.save(&image_path)?;

        let recognized = self.recognizer.recognize(&image_path);
        Ok(self.process_recognized(recognized))
    }

    fn assemble(
        &self,
        recognized: RecognizedText,
        document_type: DocumentType,
        confidence: f64,
        fields: ExtractedFields,
    ) -> ProcessingResult {
        let extracted_text = truncate_chars(recognized.text.trim(), MAX_EXTRACTED_TEXT_CHARS);

        let structured_data = StructuredRecord {
            document_type,
            extraction_date: Utc::now(),
            raw_text_length: recognized.text.chars().count(),
            confidence,
            text_provenance: recognized.provenance,
            engine_available: recognized.engine_available,
            ocr_error: recognized.error,
            passport_number: fields.passport_number,
            visa_number: fields.visa_number,
            dates_found: fields.dates_found,
            names_found: fields.names_found,
            email: fields.email,
        };

        ProcessingResult::success(document_type, confidence, extracted_text, structured_data)
    }
}

/// Truncate to at most `max` characters (not bytes). A hard cap, not a
/// summarization; nothing marks the cut in-band.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
