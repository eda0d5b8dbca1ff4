//! Pipeline orchestration: cache consult, extraction, field matching,
//! knowledge append. One call per document, no internal parallelism.

use serde::Serialize;
use thiserror::Error;

use crate::cache::{CacheError, TextCache};
use crate::pipeline::extraction::types::{encode_failure, failure_message};
use crate::pipeline::extraction::ExtractionEngine;
use crate::pipeline::fields::{extract_fields, FieldMap, FieldSchema};
use crate::store::{KnowledgeStore, StoreError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("Text extraction failed for '{label}': {message}")]
    Extraction { label: String, message: String },

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of processing one document.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub label: String,
    pub extracted_text: String,
    pub extracted_fields: FieldMap,
}

/// The extraction pipeline with its injected collaborators.
pub struct ExtractionService {
    engine: ExtractionEngine,
    cache: TextCache,
    knowledge: KnowledgeStore,
}

impl ExtractionService {
    pub fn new(engine: ExtractionEngine, cache: TextCache, knowledge: KnowledgeStore) -> Self {
        Self {
            engine,
            cache,
            knowledge,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// Run the full pipeline for one document.
    ///
    /// The cache answers byte-identical re-submissions without re-running
    /// the engine, regardless of label or schema. Extraction failures are
    /// persisted in marker form and reported as errors on every submission
    /// of the same bytes; they are never appended to the knowledge store.
    pub fn process(
        &self,
        label: &str,
        schema: &FieldSchema,
        pdf_bytes: &[u8],
    ) -> Result<Extraction, ServiceError> {
        if pdf_bytes.is_empty() {
            return Err(ServiceError::EmptyDocument);
        }

        tracing::info!(label, bytes = pdf_bytes.len(), "Processing document");

        let text = match self.cache.lookup(pdf_bytes)? {
            Some(text) => text,
            None => {
                let computed = match self.engine.extract(pdf_bytes) {
                    Ok(doc) => doc.text,
                    Err(e) => {
                        tracing::warn!(label, error = %e, "Extraction failed");
                        encode_failure(&e)
                    }
                };
                self.cache.store(pdf_bytes, &computed)?;
                computed
            }
        };

        if let Some(message) = failure_message(&text) {
            return Err(ServiceError::Extraction {
                label: label.to_string(),
                message: message.to_string(),
            });
        }

        let fields = extract_fields(&text, schema);
        self.knowledge.append(label, fields.clone())?;

        Ok(Extraction {
            label: label.to_string(),
            extracted_text: text,
            extracted_fields: fields,
        })
    }
}
