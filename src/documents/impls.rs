// Standard library
use std::fs;
use std::path::Path;

// 3rd party crates
use tracing::debug;

// Current module imports
use super::errors::DocumentError;
use super::types::{Document, Product};

impl Document {
    /// Encode the document in its wire representation.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(DocumentError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::Decode)
    }

    /// Read and decode a document stored as JSON on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            doc_id = document.doc_id.as_deref().unwrap_or("<none>"),
            products = document.products().len(),
            "Loaded document"
        );
        Ok(document)
    }

    pub fn products(&self) -> &[Product] {
        self.products.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::types::Description;

    const SAMPLE: &str = r#"{
        "description": { "participantInn": "7700000000" },
        "docId": "doc-1",
        "docStatus": "DRAFT",
        "docType": "LP_INTRODUCE_GOODS",
        "importRequest": true,
        "ownerInn": "7711111111",
        "participantInn": "7700000000",
        "producerInn": "7722222222",
        "productionDate": "2024-01-23",
        "productionType": "OWN_PRODUCTION",
        "products": [
            {
                "certificateDocument": "CONFORMITY_CERTIFICATE",
                "certificateDocumentDate": "2024-01-01",
                "certificateDocumentNumber": "RU-123",
                "ownerInn": "7711111111",
                "producerInn": "7722222222",
                "productionDate": "2024-01-23",
                "tnvedCode": "6401100000",
                "uitCode": "010460",
                "uituCode": "020460"
            }
        ],
        "regDate": "2024-01-24",
        "regNumber": "42"
    }"#;

    #[test]
    fn decodes_wire_schema() {
        let document = Document::from_json(SAMPLE).unwrap();

        assert_eq!(document.doc_id.as_deref(), Some("doc-1"));
        assert!(document.import_request);
        assert_eq!(
            document.description,
            Some(Description {
                participant_inn: Some("7700000000".into())
            })
        );
        assert_eq!(document.products().len(), 1);
        assert_eq!(document.products()[0].tnved_code.as_deref(), Some("6401100000"));
        assert_eq!(document.products()[0].uitu_code.as_deref(), Some("020460"));
    }

    #[test]
    fn encodes_camel_case_and_skips_missing_fields() {
        let document = Document {
            doc_id: Some("doc-2".into()),
            owner_inn: Some("7711111111".into()),
            products: Some(vec![Product {
                uit_code: Some("010460".into()),
                ..Product::default()
            }]),
            ..Document::default()
        };

        let value: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "docId": "doc-2",
                "importRequest": false,
                "ownerInn": "7711111111",
                "products": [{ "uitCode": "010460" }]
            })
        );
    }

    #[test]
    fn tolerates_sparse_documents() {
        let document = Document::from_json(r#"{"docId": "x"}"#).unwrap();
        assert_eq!(document.doc_id.as_deref(), Some("x"));
        assert!(document.products().is_empty());
        assert!(!document.import_request);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Document::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DocumentError::Decode(_)));
    }

    #[test]
    fn reports_missing_file() {
        let err = Document::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
