use serde::{Deserialize, Serialize};

pub type DocId = i64;

/// A movie as read from the document source. Missing fields fall back to
/// `0` / empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub description: String,
}

impl Document {
    pub fn new(id: DocId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id, title: title.into(), description: description.into() }
    }

    /// Searchable text: title and description joined by a single space.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub document: Document,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_joins_title_and_description() {
        let doc = Document::new(1, "The Matrix", "Sci-fi");
        assert_eq!(doc.content(), "The Matrix Sci-fi");
    }

    #[test]
    fn partial_record_uses_defaults() {
        let doc: Document = serde_json::from_str(r#"{"id": 2, "title": "The Matrix"}"#).unwrap();
        assert_eq!(doc, Document::new(2, "The Matrix", ""));

        let empty: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Document::default());
    }

    #[test]
    fn serializes_to_plain_record() {
        let doc = Document::new(3, "Interstellar", "Space");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "title": "Interstellar", "description": "Space"}));
    }
}
