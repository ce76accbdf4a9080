//! Ordered keyword-membership classification.
//!
//! An explicit ordered rule list evaluated first-match-wins. Order
//! matters: broad categories sit after specific ones, so text carrying
//! both "passport" and "visa" keywords classifies as passport. The rule
//! table is fixed for output compatibility; confidence comes from the
//! per-type lookup, never from match counts.

use crate::models::DocumentType;

/// One classification rule: any keyword present selects the type.
pub struct ClassificationRule {
    pub keywords: &'static [&'static str],
    pub document_type: DocumentType,
}

/// Rules evaluated in order; first match wins.
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        keywords: &["passport", "republic", "travel document"],
        document_type: DocumentType::Passport,
    },
    ClassificationRule {
        keywords: &["visa", "entry permit", "immigration"],
        document_type: DocumentType::Visa,
    },
    ClassificationRule {
        keywords: &["work permit", "employment"],
        document_type: DocumentType::Permit,
    },
    ClassificationRule {
        keywords: &["certificate", "birth", "marriage"],
        document_type: DocumentType::Certificate,
    },
    ClassificationRule {
        keywords: &["license", "identification"],
        document_type: DocumentType::Identification,
    },
];

/// Classify recognized text into a document type and its confidence.
pub fn classify(text: &str) -> (DocumentType, f64) {
    let lower = text.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|keyword| lower.contains(keyword)) {
            return (rule.document_type, rule.document_type.confidence());
        }
    }
    (DocumentType::Unknown, DocumentType::Unknown.confidence())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category_keyword() {
        assert_eq!(classify("REPUBLIC OF INDIA").0, DocumentType::Passport);
        assert_eq!(classify("travel document holder").0, DocumentType::Passport);
        assert_eq!(classify("immigration stamp").0, DocumentType::Visa);
        assert_eq!(classify("WORK PERMIT 2024").0, DocumentType::Permit);
        assert_eq!(classify("employment record").0, DocumentType::Permit);
        assert_eq!(classify("birth record office").0, DocumentType::Certificate);
        assert_eq!(classify("marriage registry").0, DocumentType::Certificate);
        assert_eq!(classify("driving license").0, DocumentType::Identification);
        assert_eq!(
            classify("identification card").0,
            DocumentType::Identification
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Passport keywords precede visa keywords
        let (doc_type, confidence) = classify("PASSPORT with VISA stamps");
        assert_eq!(doc_type, DocumentType::Passport);
        assert_eq!(confidence, 0.9);

        // Visa precedes permit
        let (doc_type, _) = classify("entry permit for employment");
        assert_eq!(doc_type, DocumentType::Visa);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("PaSsPoRt").0, DocumentType::Passport);
        assert_eq!(classify("VISA").0, DocumentType::Visa);
    }

    #[test]
    fn test_no_keyword_is_unknown() {
        let (doc_type, confidence) = classify("Miscellaneous document content");
        assert_eq!(doc_type, DocumentType::Unknown);
        assert_eq!(confidence, 0.5);
    }

    #[test]
    fn test_confidence_matches_type_lookup() {
        for rule in RULES {
            for keyword in rule.keywords {
                let (doc_type, confidence) = classify(keyword);
                assert_eq!(doc_type, rule.document_type);
                assert_eq!(confidence, doc_type.confidence());
            }
        }
    }
}
