//! ImmiDoc - immigration document OCR and classification service.
//!
//! Accepts an uploaded document image, recovers its text with Tesseract
//! OCR, classifies the document into a fixed set of types (passport,
//! visa, permit, certificate, identification), and extracts structured
//! fields (identifiers, dates, names, email) by pattern matching.
//!
//! The pipeline degrades gracefully: when no OCR engine is installed it
//! answers with labeled placeholder text, and when the engine faults it
//! answers with a diagnostic description instead of an error. Every
//! request terminates in a well-formed [`ProcessingResult`].

pub mod config;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod server;

pub use config::Settings;
pub use models::{DocumentType, ProcessingResult, StructuredRecord, TextProvenance};
pub use ocr::{OcrEngine, OcrError, RecognizedText, TesseractEngine, TextRecognizer};
pub use pipeline::{DocumentPipeline, PipelineError};
