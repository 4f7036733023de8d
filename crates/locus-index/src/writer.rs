//! Index writer for loading gazetteer records into the Tantivy index.

use std::{fs, path::Path};

use tantivy::{
    Index, IndexWriter as TantivyIndexWriter, TantivyDocument, directory::MmapDirectory,
    tokenizer::TextAnalyzer,
};

use crate::{
    analyzer::{LOCUS_TOKENIZER, build_analyzer, tokenize_name},
    error::IndexError,
    record::LocationRecord,
    schema::IndexSchema,
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes location records to a Tantivy index.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
    /// Analyzer producing the indexed name tokens.
    analyzer: TextAnalyzer,
}

impl IndexWriter {
    /// Opens or creates an index at the given path.
    pub fn open(path: &Path) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();

        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        let analyzer = build_analyzer();
        index
            .tokenizers()
            .register(LOCUS_TOKENIZER, analyzer.clone());

        let writer = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Ok(Self {
            index,
            writer,
            schema,
            analyzer,
        })
    }

    /// Stages a record for writing. Nothing is visible until [`commit`](Self::commit).
    pub fn add_record(&mut self, record: &LocationRecord) -> Result<(), IndexError> {
        let stored =
            serde_json::to_string(record).map_err(|e| IndexError::InvalidRecord(e.to_string()))?;

        let mut doc = TantivyDocument::new();
        doc.add_pre_tokenized_text(
            self.schema.name,
            tokenize_name(&mut self.analyzer, &record.name),
        );
        doc.add_u64(self.schema.population, record.population);
        doc.add_text(self.schema.record, stored);

        self.writer
            .add_document(doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Stages multiple records.
    pub fn add_records<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a LocationRecord>,
    ) -> Result<(), IndexError> {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Commits all pending changes, making them visible to new sessions.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Returns the number of committed documents.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self
            .index
            .reader()
            .map_err(|e| IndexError::Write(e.to_string()))?;
        Ok(reader.searcher().num_docs())
    }
}
