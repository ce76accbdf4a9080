//! OCR engine trait and the Tesseract subprocess implementation.

use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

use thiserror::Error;

use crate::config::Settings;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for OCR engines.
///
/// Implementations must be cheap to probe: `is_available` is consulted
/// on every request and on the status endpoints.
pub trait OcrEngine: Send + Sync {
    /// Engine name for logs and status output.
    fn name(&self) -> &str;

    /// Check whether the engine can be invoked on this host.
    fn is_available(&self) -> bool;

    /// Description of what is needed to make the engine available.
    fn availability_hint(&self) -> String;

    /// Recognize text in an image file using the given language hints.
    fn recognize(&self, image_path: &Path, languages: &str) -> Result<String, OcrError>;
}

/// Availability of the tesseract binary, probed once per process.
static TESSERACT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Tesseract OCR engine invoked as a subprocess.
pub struct TesseractEngine {
    binary: String,
    engine_mode: u8,
    page_segmentation_mode: u8,
}

impl TesseractEngine {
    /// Create an engine from settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            binary: settings.tesseract_bin.clone(),
            engine_mode: settings.ocr_engine_mode,
            page_segmentation_mode: settings.page_segmentation_mode,
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        *TESSERACT_AVAILABLE.get_or_init(|| which::which(&self.binary).is_ok())
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            "Tesseract is available".to_string()
        } else {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        }
    }

    fn recognize(&self, image_path: &Path, languages: &str) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", languages])
            .args(["--oem", &self.engine_mode.to_string()])
            .args(["--psm", &self.page_segmentation_mode.to_string()])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::RecognitionFailed(format!(
                        "tesseract failed: {}",
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::EngineNotAvailable(
                    "tesseract not found (install tesseract-ocr)".to_string(),
                ))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}
