//! Pattern-based field extraction from recognized text.
//!
//! Each pattern is applied independently over the full (untruncated)
//! text; a pattern that finds nothing simply leaves its field absent.
//! Identifier patterns are conditioned on the already-decided document
//! type, everything else runs for any type.
//!
//! The name pattern is a two-capitalized-word heuristic and matches any
//! capitalized two-word phrase ("INDIA PASSPORT" as readily as
//! "JOHN DOE"). That breadth is a documented limitation kept for output
//! compatibility, not a defect to tighten.

use regex::Regex;

use crate::models::DocumentType;

/// Maximum dates kept, in first-occurrence order.
const MAX_DATES: usize = 3;

/// Maximum candidate names kept, in first-occurrence order.
const MAX_NAMES: usize = 2;

/// Fields matched out of recognized text. Absent means no match.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    pub passport_number: Option<String>,
    pub visa_number: Option<String>,
    pub dates_found: Option<Vec<String>>,
    pub names_found: Option<Vec<String>>,
    pub email: Option<String>,
}

/// Extracts structured fields with a fixed set of compiled patterns.
pub struct FieldExtractor {
    passport_number: Regex,
    visa_number: Regex,
    date: Regex,
    name: Regex,
    email: Regex,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor {
    /// Compile the extraction patterns.
    pub fn new() -> Self {
        Self {
            // One or two letters followed by 6-8 digits
            passport_number: Regex::new(r"(?i)\b[A-Z]{1,2}\d{6,8}\b")
                .expect("passport number regex should compile"),
            // 8-12 alphanumeric characters
            visa_number: Regex::new(r"(?i)\b[A-Z0-9]{8,12}\b")
                .expect("visa number regex should compile"),
            // day/month/year with / or - separators, no calendar validation
            date: Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b")
                .expect("date regex should compile"),
            // Two adjacent capitalized words of at least 3 letters each
            name: Regex::new(r"\b[A-Z][A-Za-z]{2,}\s+[A-Z][A-Za-z]{2,}\b")
                .expect("name regex should compile"),
            email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("email regex should compile"),
        }
    }

    /// Run all patterns over `text`, conditioned on `document_type`.
    pub fn extract(&self, text: &str, document_type: DocumentType) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        if document_type == DocumentType::Passport {
            fields.passport_number = self
                .passport_number
                .find(text)
                .map(|m| m.as_str().to_string());
        }

        if document_type == DocumentType::Visa {
            fields.visa_number = self.visa_number.find(text).map(|m| m.as_str().to_string());
        }

        let dates: Vec<String> = self
            .date
            .find_iter(text)
            .take(MAX_DATES)
            .map(|m| m.as_str().to_string())
            .collect();
        if !dates.is_empty() {
            fields.dates_found = Some(dates);
        }

        let names: Vec<String> = self
            .name
            .find_iter(text)
            .take(MAX_NAMES)
            .map(|m| m.as_str().to_string())
            .collect();
        if !names.is_empty() {
            fields.names_found = Some(names);
        }

        fields.email = self.email.find(text).map(|m| m.as_str().to_string());

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPORT_SAMPLE: &str =
        "REPUBLIC OF INDIA PASSPORT Name: JOHN DOE Passport No: A1234567 Date of Birth: 15/06/1990";

    #[test]
    fn test_passport_sample() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract(PASSPORT_SAMPLE, DocumentType::Passport);

        assert_eq!(fields.passport_number.as_deref(), Some("A1234567"));
        assert_eq!(
            fields.dates_found,
            Some(vec!["15/06/1990".to_string()])
        );
        // The heuristic picks up "INDIA PASSPORT" before "JOHN DOE"
        assert_eq!(
            fields.names_found,
            Some(vec!["INDIA PASSPORT".to_string(), "JOHN DOE".to_string()])
        );
        assert!(fields.visa_number.is_none());
        assert!(fields.email.is_none());
    }

    #[test]
    fn test_passport_number_requires_passport_type() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract(PASSPORT_SAMPLE, DocumentType::Unknown);
        assert!(fields.passport_number.is_none());
    }

    #[test]
    fn test_visa_number() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract("VISA ENTRY PERMIT ABCD12345678", DocumentType::Visa);
        assert_eq!(fields.visa_number.as_deref(), Some("ABCD12345678"));

        let fields = extractor.extract("VISA ENTRY PERMIT ABCD12345678", DocumentType::Permit);
        assert!(fields.visa_number.is_none());
    }

    #[test]
    fn test_date_cap_and_order() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract(
            "issued 01/02/2020, renewed 3-4-2021, expires 05/06/2022, seen 07/08/2023",
            DocumentType::Unknown,
        );
        assert_eq!(
            fields.dates_found,
            Some(vec![
                "01/02/2020".to_string(),
                "3-4-2021".to_string(),
                "05/06/2022".to_string(),
            ])
        );
    }

    #[test]
    fn test_date_has_no_calendar_validation() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract("stamped 32/13/9999", DocumentType::Unknown);
        assert_eq!(fields.dates_found, Some(vec!["32/13/9999".to_string()]));
    }

    #[test]
    fn test_name_cap() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract(
            "Jane Smith and John Doe and Mary Brown",
            DocumentType::Unknown,
        );
        assert_eq!(
            fields.names_found,
            Some(vec!["Jane Smith".to_string(), "John Doe".to_string()])
        );
    }

    #[test]
    fn test_email() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract(
            "contact applicant.one@example.org or second@example.org",
            DocumentType::Unknown,
        );
        assert_eq!(fields.email.as_deref(), Some("applicant.one@example.org"));
    }

    #[test]
    fn test_no_match_leaves_fields_absent() {
        let extractor = FieldExtractor::new();
        let fields = extractor.extract("nothing here", DocumentType::Passport);
        assert!(fields.passport_number.is_none());
        assert!(fields.dates_found.is_none());
        assert!(fields.names_found.is_none());
        assert!(fields.email.is_none());
    }
}
