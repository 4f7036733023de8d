//! Index schema definition for the locus name index.
//!
//! - `name`: place name (text with positions, `locus_name` tokenizer)
//! - `population`: ranking key (u64, indexed, stored, fast)
//! - `record`: the full [`LocationRecord`](crate::LocationRecord) as stored JSON

use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::LOCUS_TOKENIZER;

/// Name of the population fast field, read while collecting hits.
pub const POPULATION_FIELD: &str = "population";

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Analyzed place name.
    pub name: Field,
    /// Population, used as the primary ranking key.
    pub population: Field,
    /// Serialized record carried through to candidates.
    pub record: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        // Positions are required for phrase queries.
        let name_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(LOCUS_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let name = builder.add_text_field("name", name_options);

        let population = builder.add_u64_field(POPULATION_FIELD, INDEXED | STORED | FAST);
        let record = builder.add_text_field("record", STORED);

        let schema = builder.build();

        Self {
            schema,
            name,
            population,
            record,
        }
    }

    /// Returns the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn schema_has_all_fields() {
        let schema = IndexSchema::new();
        let s = schema.schema();

        for name in ["name", "population", "record"] {
            assert!(s.get_field(name).is_ok(), "missing field {name}");
        }
    }

    #[test]
    fn population_is_fast() {
        let schema = IndexSchema::new();
        let entry = schema.schema().get_field_entry(schema.population);
        assert!(entry.is_fast());
        assert!(entry.is_indexed());
    }

    #[test]
    fn name_has_positions() {
        let schema = IndexSchema::new();
        let entry = schema.schema().get_field_entry(schema.name);
        let indexing = entry
            .field_type()
            .get_index_record_option()
            .unwrap();
        assert!(indexing.has_positions());
        assert!(!entry.is_stored());
    }
}
