use crate::document::DocId;
use crate::error::{Error, Result};
use crate::index::{DocMap, Postings};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

/// Persisted projection of an inverted index, keys and postings in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredIndex {
    pub index: BTreeMap<String, Vec<DocId>>,
    pub docmap: BTreeMap<DocId, String>,
}

impl StoredIndex {
    /// Sorts tokens, ids and postings and drops duplicate ids.
    pub fn normalize(index: &Postings, docmap: &DocMap) -> Self {
        let index = index
            .iter()
            .map(|(token, ids)| {
                let mut ids: Vec<DocId> = ids.iter().copied().collect();
                ids.sort_unstable();
                ids.dedup();
                (token.clone(), ids)
            })
            .collect();
        let docmap = docmap.iter().map(|(id, content)| (*id, content.clone())).collect();
        Self { index, docmap }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    pub created_at: String,
    pub token_count: usize,
    pub document_count: usize,
}

/// Durable storage for the inverted index.
pub trait IndexStore {
    fn save(&self, index: &Postings, docmap: &DocMap) -> Result<()>;
    fn load(&self) -> Result<StoredIndex>;
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.json") }
    pub fn docmap(&self) -> PathBuf { self.root.join("docmap.json") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

/// JSON-backed index cache living in a single directory.
pub struct FileIndexStore {
    paths: IndexPaths,
}

impl FileIndexStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { paths: IndexPaths::new(root) }
    }

    pub fn paths(&self) -> &IndexPaths {
        &self.paths
    }

    /// Reads the sidecar metadata, if a previous save wrote one.
    pub fn load_meta(&self) -> Result<Option<IndexMeta>> {
        let path = self.paths.meta();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::index_store(path, format!("unable to read: {e}"))),
        };
        let meta: IndexMeta = decode(&path, &bytes)?;
        if meta.version != FORMAT_VERSION {
            return Err(Error::index_store(
                path,
                format!("unsupported format version {} (expected {FORMAT_VERSION})", meta.version),
            ));
        }
        Ok(Some(meta))
    }
}

impl IndexStore for FileIndexStore {
    fn save(&self, index: &Postings, docmap: &DocMap) -> Result<()> {
        let stored = StoredIndex::normalize(index, docmap);
        let meta = IndexMeta {
            version: FORMAT_VERSION,
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .map_err(|e| Error::index_store(self.paths.meta(), format!("unable to timestamp: {e}")))?,
            token_count: stored.index.len(),
            document_count: stored.docmap.len(),
        };

        let root = &self.paths.root;
        fs::create_dir_all(root).map_err(|e| Error::index_store(root, format!("unable to create directory: {e}")))?;

        // Stage every artifact before replacing any of them.
        let staged = [
            (self.paths.index(), encode(&self.paths.index(), &stored.index)?),
            (self.paths.docmap(), encode(&self.paths.docmap(), &stored.docmap)?),
            (self.paths.meta(), encode(&self.paths.meta(), &meta)?),
        ];
        let mut temps = Vec::with_capacity(staged.len());
        for (path, bytes) in &staged {
            let temp = path.with_extension("json.tmp");
            write_synced(&temp, bytes).map_err(|e| Error::index_store(&temp, format!("unable to write: {e}")))?;
            temps.push((temp, path));
        }
        for (temp, path) in temps {
            fs::rename(&temp, path).map_err(|e| Error::index_store(path, format!("unable to replace: {e}")))?;
        }
        if let Err(e) = File::open(root).and_then(|dir| dir.sync_all()) {
            tracing::warn!(path = %root.display(), error = %e, "unable to sync index cache directory");
        }

        tracing::info!(path = %root.display(), tokens = meta.token_count, documents = meta.document_count, "saved index cache");
        Ok(())
    }

    fn load(&self) -> Result<StoredIndex> {
        let meta = self.load_meta()?;
        let index: BTreeMap<String, Vec<DocId>> = read_artifact(&self.paths.index())?;
        let docmap: BTreeMap<DocId, String> = read_artifact(&self.paths.docmap())?;

        let index = index
            .into_iter()
            .map(|(token, mut ids)| {
                ids.sort_unstable();
                ids.dedup();
                (token, ids)
            })
            .collect();
        let stored = StoredIndex { index, docmap };

        // A crash between renames leaves artifacts from different saves.
        if let Some(meta) = &meta {
            if meta.token_count != stored.index.len() || meta.document_count != stored.docmap.len() {
                return Err(Error::index_store(
                    &self.paths.root,
                    format!(
                        "artifacts disagree with meta.json: {} tokens and {} documents loaded, {} and {} recorded",
                        stored.index.len(),
                        stored.docmap.len(),
                        meta.token_count,
                        meta.document_count
                    ),
                ));
            }
        }

        tracing::info!(
            path = %self.paths.root.display(),
            tokens = stored.index.len(),
            documents = stored.docmap.len(),
            created_at = meta.as_ref().map(|m| m.created_at.as_str()).unwrap_or("unknown"),
            "loaded index cache"
        );
        Ok(stored)
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::index_store(path, "not found; run `index build` first")
        } else {
            Error::index_store(path, format!("unable to read: {e}"))
        }
    })?;
    decode(path, &bytes)
}

fn decode<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| Error::index_store(path, format!("invalid payload: {e}")))
}

fn encode<T: Serialize>(path: &Path, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| Error::index_store(path, format!("unable to encode: {e}")))
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}
