use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tantivy::{doc, Index};
use walkdir::WalkDir;

use hitnav_core::chunker::Chunker;
use hitnav_core::types::{DocId, FIELD_CHUNK, FIELD_DOC_ID, FIELD_ID, FIELD_TEXT, FIELD_TEXT_EXACT};

use crate::tantivy_utils::{build_schema, register_tokenizers};

/// Writes documents into the chunk index. A document that fits in one page
/// is stored as a single unchunked record (chunk 0, key `"{doc}"`);
/// anything larger is stored as one record per page (chunk `n` starting at
/// 1, key `"{doc}_{n}"`).
pub struct ChunkIndexer {
    index: Index,
    chunker: Chunker,
    id_field: tantivy::schema::Field,
    doc_id_field: tantivy::schema::Field,
    chunk_field: tantivy::schema::Field,
    text_field: tantivy::schema::Field,
    text_exact_field: tantivy::schema::Field,
}

#[derive(Debug, Clone)]
pub struct IndexedDoc {
    pub doc_id: DocId,
    pub path: PathBuf,
    /// Number of chunk records written; 0 means the document is unchunked.
    pub chunks: u32,
}

impl ChunkIndexer {
    pub fn new(index_dir: PathBuf) -> Result<Self> {
        Self::with_chunker(index_dir, Chunker::new())
    }

    pub fn with_chunker(index_dir: PathBuf, chunker: Chunker) -> Result<Self> {
        let schema = build_schema();
        if index_dir.exists() {
            fs::remove_dir_all(&index_dir)?;
        }
        fs::create_dir_all(&index_dir)?;
        let index = Index::create_in_dir(&index_dir, schema.clone())?;
        register_tokenizers(&index);
        let id_field = schema.get_field(FIELD_ID)?;
        let doc_id_field = schema.get_field(FIELD_DOC_ID)?;
        let chunk_field = schema.get_field(FIELD_CHUNK)?;
        let text_field = schema.get_field(FIELD_TEXT)?;
        let text_exact_field = schema.get_field(FIELD_TEXT_EXACT)?;
        Ok(Self { index, chunker, id_field, doc_id_field, chunk_field, text_field, text_exact_field })
    }

    /// Index every `.txt` file under `data_dir`, assigning sequential doc
    /// ids in path order. Returns the id-to-path table for the caller.
    pub fn index_files(&self, data_dir: &Path) -> Result<Vec<IndexedDoc>> {
        let mut index_writer = self.index.writer(50_000_000)?;
        let mut docs = Vec::new();
        let mut next_doc_id: DocId = 1;
        for file_path in self.list_txt_files(data_dir) {
            let content = self.read_file_content(&file_path)?;
            let doc_id = next_doc_id;
            next_doc_id += 1;
            let pages = self.chunker.split(&content);
            if pages.len() <= 1 {
                let text = pages.into_iter().next().unwrap_or_default();
                index_writer.add_document(doc!(
                    self.id_field => doc_id.to_string(),
                    self.doc_id_field => doc_id,
                    self.chunk_field => 0u64,
                    self.text_field => text.clone(),
                    self.text_exact_field => text,
                ))?;
                docs.push(IndexedDoc { doc_id, path: file_path, chunks: 0 });
            } else {
                let total = pages.len() as u32;
                for (i, text) in pages.into_iter().enumerate() {
                    let chunk = i as u64 + 1;
                    index_writer.add_document(doc!(
                        self.id_field => format!("{}_{}", doc_id, chunk),
                        self.doc_id_field => doc_id,
                        self.chunk_field => chunk,
                        self.text_field => text.clone(),
                        self.text_exact_field => text,
                    ))?;
                }
                docs.push(IndexedDoc { doc_id, path: file_path, chunks: total });
            }
        }
        index_writer.commit()?;
        Ok(docs)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
        }
    }

    fn list_txt_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut txt_files = Vec::new();
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("txt") {
                txt_files.push(path.to_path_buf());
            }
        }
        txt_files.sort();
        txt_files
    }
}
