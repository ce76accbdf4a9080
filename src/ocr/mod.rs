//! OCR engine abstraction and text recognition.
//!
//! The engine is modeled as a capability with three outcomes: available
//! and succeeding, available but faulting, or absent from the host.
//! [`TextRecognizer`] wraps an engine and always produces usable text:
//! real OCR output, a labeled placeholder, or a failure description.
//!
//! Tesseract via its command-line binary is the production engine;
//! anything satisfying [`OcrEngine`] can stand in for it.

mod engine;
mod recognizer;

pub use engine::{OcrEngine, OcrError, TesseractEngine};
pub use recognizer::{RecognizedText, TextRecognizer, PLACEHOLDER_TEXT};
