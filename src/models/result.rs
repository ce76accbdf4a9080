//! Processing result models.
//!
//! A [`ProcessingResult`] is built fresh for every request and has no
//! lifecycle beyond the call that produced it. Optional fields signal
//! "no match" by absence, never by null or a sentinel value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification outcome for a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Passport,
    Visa,
    Permit,
    Certificate,
    Identification,
    Document,
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::Visa => "visa",
            Self::Permit => "permit",
            Self::Certificate => "certificate",
            Self::Identification => "identification",
            Self::Document => "document",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "passport" => Some(Self::Passport),
            "visa" => Some(Self::Visa),
            "permit" => Some(Self::Permit),
            "certificate" => Some(Self::Certificate),
            "identification" => Some(Self::Identification),
            "document" => Some(Self::Document),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Fixed confidence for this document type.
    ///
    /// Confidence is fully determined by the type, never derived from
    /// match counts or text quality. `Document` keeps its legacy 0.7
    /// for wire compatibility although the classifier never emits it.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Passport | Self::Visa => 0.9,
            Self::Permit | Self::Certificate | Self::Identification => 0.8,
            Self::Document => 0.7,
            Self::Unknown => 0.5,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the recognized text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextProvenance {
    /// Primary OCR pass over the live engine.
    Ocr,
    /// Secondary OCR pass with the reduced language hint set.
    OcrSecondary,
    /// Engine was present but faulted; text is a failure description.
    Fallback,
    /// No engine installed; text is the fixed placeholder.
    Demo,
}

impl TextProvenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ocr => "ocr",
            Self::OcrSecondary => "ocr-secondary",
            Self::Fallback => "fallback",
            Self::Demo => "demo",
        }
    }
}

impl std::fmt::Display for TextProvenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured fields extracted from recognized text.
///
/// Always carries classification and provenance metadata; the
/// pattern-matched fields are present only when their pattern matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Classified document type (equals the top-level type).
    pub document_type: DocumentType,
    /// Timestamp of processing (not of document issuance).
    pub extraction_date: DateTime<Utc>,
    /// Character count of the untruncated recognized text.
    pub raw_text_length: usize,
    /// Fixed confidence for the classified type.
    pub confidence: f64,
    /// How the text was obtained.
    pub text_provenance: TextProvenance,
    /// Whether an OCR engine was found on this host.
    pub engine_available: bool,
    /// Engine failure description, present only on the fallback path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_error: Option<String>,
    /// Passport number, matched only for passport documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    /// Visa number, matched only for visa documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_number: Option<String>,
    /// Dates in first-occurrence order, at most 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates_found: Option<Vec<String>>,
    /// Candidate names in first-occurrence order, at most 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_found: Option<Vec<String>>,
    /// First email address found, any document type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Final result of processing a document image.
///
/// Exactly one of the two shapes holds: `success = true` with
/// `document_type`, `confidence`, `extracted_text`, and
/// `structured_data`, or `success = false` with `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Trimmed recognized text, hard-capped at 2000 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingResult {
    /// Build a successful result.
    pub fn success(
        document_type: DocumentType,
        confidence: f64,
        extracted_text: String,
        structured_data: StructuredRecord,
    ) -> Self {
        Self {
            success: true,
            document_type: Some(document_type),
            confidence: Some(confidence),
            extracted_text: Some(extracted_text),
            structured_data: Some(structured_data),
            error: None,
        }
    }

    /// Build a failed result carrying a human-readable error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            document_type: None,
            confidence: None,
            extracted_text: None,
            structured_data: None,
            error: Some(error.into()),
        }
    }
}
