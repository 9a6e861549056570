use tantivy::schema::{
    IndexRecordOption, Schema, TextFieldIndexing, TextOptions, INDEXED, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer, WhitespaceTokenizer};
use tantivy::Index;

use hitnav_core::types::{FIELD_CHUNK, FIELD_DOC_ID, FIELD_ID, FIELD_TEXT, FIELD_TEXT_EXACT};

pub const TOKENIZER_TEXT: &str = "page_text";
pub const TOKENIZER_EXACT: &str = "ws_exact";

pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _id_field = schema_builder.add_text_field(FIELD_ID, STRING | STORED);
    let _doc_id_field = schema_builder.add_u64_field(FIELD_DOC_ID, INDEXED | STORED);
    let _chunk_field = schema_builder.add_u64_field(FIELD_CHUNK, INDEXED | STORED);
    let text_indexing = TextFieldIndexing::default()
        .set_tokenizer(TOKENIZER_TEXT)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let _text_field = schema_builder
        .add_text_field(FIELD_TEXT, TextOptions::default().set_indexing_options(text_indexing).set_stored());
    let exact_indexing = TextFieldIndexing::default()
        .set_tokenizer(TOKENIZER_EXACT)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let _text_exact_field = schema_builder
        .add_text_field(FIELD_TEXT_EXACT, TextOptions::default().set_indexing_options(exact_indexing).set_stored());
    schema_builder.build()
}

pub fn register_tokenizers(index: &Index) {
    let text = TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser).build();
    index.tokenizers().register(TOKENIZER_TEXT, text);
    // whitespace-separated, case preserved: exact matching for pattern hits
    let exact = TextAnalyzer::builder(WhitespaceTokenizer::default()).build();
    index.tokenizers().register(TOKENIZER_EXACT, exact);
}
