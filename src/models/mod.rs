//! Data models for document processing results.

mod result;

pub use result::{DocumentType, ProcessingResult, StructuredRecord, TextProvenance};
