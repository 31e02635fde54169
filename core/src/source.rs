use crate::document::Document;
use crate::error::{Error, Result};
use crate::tokenizer::Stopwords;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Supplies the document collection.
pub trait DocumentSource {
    fn load_documents(&self) -> Result<Vec<Document>>;
}

/// Supplies the stopword set used by the tokenizer.
pub trait StopwordSource {
    fn load_stopwords(&self) -> Result<Stopwords>;
}

/// Reads `{"movies": [{"id": .., "title": .., "description": ..}, ...]}`.
pub struct JsonDocumentSource {
    path: PathBuf,
}

impl JsonDocumentSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    fn read_payload(&self) -> Result<serde_json::Map<String, Value>> {
        let bytes = fs::read(&self.path)
            .map_err(|source| Error::DataAccess { path: self.path.clone(), source })?;
        let payload: Value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::data_format(&self.path, format!("malformed JSON: {e}")))?;
        match payload {
            Value::Object(map) => Ok(map),
            other => Err(Error::data_format(
                &self.path,
                format!("expected a top-level object, got {}", json_kind(&other)),
            )),
        }
    }
}

impl DocumentSource for JsonDocumentSource {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut payload = self.read_payload()?;
        let entries = match payload.remove("movies") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(Error::data_format(
                    &self.path,
                    format!("expected 'movies' to be a list, got {}", json_kind(&other)),
                ))
            }
        };

        let total = entries.len();
        let mut documents = Vec::with_capacity(total);
        for entry in entries {
            if !entry.is_object() {
                continue;
            }
            let doc: Document = serde_json::from_value(entry)
                .map_err(|e| Error::data_format(&self.path, format!("invalid movie entry: {e}")))?;
            documents.push(doc);
        }
        tracing::debug!(path = %self.path.display(), documents = documents.len(), skipped = total - documents.len(), "loaded documents");
        Ok(documents)
    }
}

/// One stopword per line. A missing file means no stopwords.
pub struct StopwordFile {
    path: PathBuf,
}

impl StopwordFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl StopwordSource for StopwordFile {
    fn load_stopwords(&self) -> Result<Stopwords> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stopword file, using empty set");
                return Ok(Stopwords::new());
            }
            Err(source) => return Err(Error::DataAccess { path: self.path.clone(), source }),
        };
        let stopwords: Stopwords = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        tracing::debug!(path = %self.path.display(), count = stopwords.len(), "loaded stopwords");
        Ok(stopwords)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
