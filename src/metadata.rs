//! Setting document metadata.
//!
//! Create a [`Metadata`] object, set the data, and then include it in the document
//! via [`Document::set_metadata`]. It is written to the document information
//! dictionary.
//!
//! [`Document::set_metadata`]: crate::Document::set_metadata

use pdf_writer::{Pdf, TextStr};

use crate::object::ObjectId;

const PRODUCER: &str = "quire";

/// Metadata for a PDF document.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Metadata {
    pub(crate) title: Option<String>,
    pub(crate) authors: Option<Vec<String>>,
    pub(crate) subject: Option<String>,
    pub(crate) keywords: Option<Vec<String>>,
    pub(crate) creator: Option<String>,
}

impl Metadata {
    /// Create new metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// The title of the document.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// The authors of the document.
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        if !authors.is_empty() {
            self.authors = Some(authors);
        }
        self
    }

    /// The subject of the document.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = non_empty(subject.into());
        self
    }

    /// The keywords that describe the document.
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.keywords = Some(keywords);
        }
        self
    }

    /// The application that created the original content.
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = non_empty(creator.into());
        self
    }

    pub(crate) fn serialize_document_info(&self, id: ObjectId, pdf: &mut Pdf) {
        let mut document_info = pdf.document_info(id.to_pdf_ref());

        if let Some(title) = &self.title {
            document_info.title(TextStr(title));
        }

        if let Some(authors) = &self.authors {
            document_info.author(TextStr(&authors.join(", ")));
        }

        if let Some(subject) = &self.subject {
            document_info.subject(TextStr(subject));
        }

        if let Some(keywords) = &self.keywords {
            document_info.keywords(TextStr(&keywords.join(", ")));
        }

        if let Some(creator) = &self.creator {
            document_info.creator(TextStr(creator));
        }

        document_info.producer(TextStr(PRODUCER));
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_ignored() {
        let metadata = Metadata::new().title("").authors(vec![]).creator("demo");
        assert_eq!(metadata.title, None);
        assert_eq!(metadata.authors, None);
        assert_eq!(metadata.creator.as_deref(), Some("demo"));
    }

    #[test]
    fn document_info() {
        let metadata = Metadata::new()
            .title("Report")
            .authors(vec!["A. Smith".to_string(), "B. Jones".to_string()])
            .keywords(vec!["charts".to_string(), "pdf".to_string()]);

        let mut pdf = Pdf::new();
        metadata.serialize_document_info(ObjectId::new(9), &mut pdf);
        let out = String::from_utf8_lossy(&pdf.finish()).into_owned();

        assert!(out.contains("9 0 obj"));
        assert!(out.contains("/Title (Report)"));
        assert!(out.contains("/Author (A. Smith, B. Jones)"));
        assert!(out.contains("/Keywords (charts, pdf)"));
        assert!(out.contains("/Producer (quire)"));
        assert!(!out.contains("/Subject"));
    }
}
