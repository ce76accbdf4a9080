//! Configuration management for ImmiDoc.
//!
//! Settings come from built-in defaults, optionally overridden by a
//! config file (TOML, YAML, or JSON, chosen by extension) and then by
//! environment variables. Everything here is read-only after startup;
//! request handling never mutates configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default Tesseract binary name, resolved via PATH.
pub const DEFAULT_TESSERACT_BIN: &str = "tesseract";

/// Default language hints for the primary OCR pass.
pub const DEFAULT_OCR_LANGUAGES: &str = "eng+hin";

/// Reduced language hints for the secondary OCR pass.
pub const DEFAULT_OCR_FALLBACK_LANGUAGES: &str = "eng";

/// Default OCR engine mode (3 = default, LSTM where available).
pub const DEFAULT_OCR_ENGINE_MODE: u8 = 3;

/// Default page segmentation mode (6 = single uniform block of text).
pub const DEFAULT_PAGE_SEGMENTATION_MODE: u8 = 6;

/// Default maximum upload size in bytes (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Tesseract binary name or path.
    pub tesseract_bin: String,
    /// Language hints for the primary OCR pass (e.g. "eng+hin").
    pub ocr_languages: String,
    /// Reduced language hints for the secondary OCR pass.
    pub ocr_fallback_languages: String,
    /// Tesseract OCR engine mode (--oem).
    pub ocr_engine_mode: u8,
    /// Tesseract page segmentation mode (--psm).
    pub page_segmentation_mode: u8,
    /// Host the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tesseract_bin: DEFAULT_TESSERACT_BIN.to_string(),
            ocr_languages: DEFAULT_OCR_LANGUAGES.to_string(),
            ocr_fallback_languages: DEFAULT_OCR_FALLBACK_LANGUAGES.to_string(),
            ocr_engine_mode: DEFAULT_OCR_ENGINE_MODE,
            page_segmentation_mode: DEFAULT_PAGE_SEGMENTATION_MODE,
            host: "127.0.0.1".to_string(),
            port: 3030,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Settings {
    /// Apply environment variable overrides.
    ///
    /// `IMMIDOC_TESSERACT_BIN` and `IMMIDOC_OCR_LANGUAGES` take priority
    /// over both defaults and config file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(bin) = std::env::var("IMMIDOC_TESSERACT_BIN") {
            if !bin.is_empty() {
                self.tesseract_bin = bin;
            }
        }
        if let Ok(langs) = std::env::var("IMMIDOC_OCR_LANGUAGES") {
            if !langs.is_empty() {
                self.ocr_languages = langs;
            }
        }
    }
}

/// Configuration file structure. All fields optional; unset fields keep
/// the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tesseract binary name or path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract_bin: Option<String>,
    /// Primary OCR language hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_languages: Option<String>,
    /// Secondary-pass OCR language hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_fallback_languages: Option<String>,
    /// Tesseract OCR engine mode (--oem).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_engine_mode: Option<u8>,
    /// Tesseract page segmentation mode (--psm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_segmentation_mode: Option<u8>,
    /// Server bind host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Server bind port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Maximum accepted upload body size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    /// Load configuration from a specific file path.
    /// Supports TOML, YAML, and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        Ok(config)
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref bin) = self.tesseract_bin {
            settings.tesseract_bin = bin.clone();
        }
        if let Some(ref langs) = self.ocr_languages {
            settings.ocr_languages = langs.clone();
        }
        if let Some(ref langs) = self.ocr_fallback_languages {
            settings.ocr_fallback_languages = langs.clone();
        }
        if let Some(oem) = self.ocr_engine_mode {
            settings.ocr_engine_mode = oem;
        }
        if let Some(psm) = self.page_segmentation_mode {
            settings.page_segmentation_mode = psm;
        }
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(max) = self.max_upload_bytes {
            settings.max_upload_bytes = max;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Look for a config file in the current directory, then the user
/// config directory. Checks immidoc.{ext} and config.{ext}.
fn discover_config() -> Option<PathBuf> {
    let extensions = ["toml", "yaml", "yml", "json"];
    let basenames = ["immidoc", "config"];

    let mut dirs_to_check: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs_to_check.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join("immidoc"));
    }

    for dir in dirs_to_check {
        for basename in basenames {
            for ext in extensions {
                let path = dir.join(format!("{}.{}", basename, ext));
                if path.exists() {
                    return Some(path);
                }
            }
        }
    }
    None
}

/// Load settings from defaults, config file, and environment overrides.
///
/// An explicit `config_path` that fails to load is an error; a broken
/// auto-discovered file is logged and skipped.
pub async fn load_settings_with_options(options: &LoadOptions) -> Result<Settings, String> {
    let mut settings = Settings::default();

    let config = if let Some(ref path) = options.config_path {
        Some(Config::load_from_path(path).await?)
    } else if let Some(path) = discover_config() {
        match Config::load_from_path(&path).await {
            Ok(config) => {
                tracing::debug!("Loaded config from: {}", path.display());
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                None
            }
        }
    } else {
        None
    };

    if let Some(config) = config {
        config.apply_to_settings(&mut settings);
    }
    settings.apply_env_overrides();

    Ok(settings)
}
