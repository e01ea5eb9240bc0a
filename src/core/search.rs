//! Query execution against one named index.
//!
//! Every call opens its own private index handle, runs a single
//! match-style query, collects highlighted fragments from the `Line`
//! field, and drops the handle on all exit paths. No handle is
//! cached or shared, so concurrent searches over the same or
//! different indexes never contend in this layer.

use crate::core::error::{LineseekError, Result};
use crate::core::registry::IndexDescriptor;
use crate::core::types::{SearchHit, SearchResults};
use std::time::Instant;
use tantivy::{
    collector::{Count, TopDocs},
    query::{EmptyQuery, Query, QueryParser},
    schema::{Field, FieldType, Schema, Value},
    snippet::SnippetGenerator,
    Index, TantivyDocument,
};
use tracing::{debug, warn};

/// Field the highlighter draws fragments from. Fragments the engine
/// computes for any other field are discarded.
pub const LINE_FIELD: &str = "Line";

/// Stored field carrying the document identifier. Indexes without it
/// fall back to the segment-local document address.
pub const ID_FIELD: &str = "Name";

/// Executes ad hoc searches; stateless across calls
#[derive(Debug, Clone)]
pub struct SearchService {
    default_size: usize,
    max_size: usize,
    max_from: usize,
    snippet_max_chars: usize,
}

impl SearchService {
    /// Create a new search service
    pub fn new(
        default_size: usize,
        max_size: usize,
        max_from: usize,
        snippet_max_chars: usize,
    ) -> Self {
        Self {
            default_size,
            max_size,
            max_from,
            snippet_max_chars,
        }
    }

    /// Execute one search against the index behind `descriptor`.
    ///
    /// `from` and `size` page through the full result set; both are
    /// clamped to their configured maximums, since the collector
    /// allocates for `size + from` up front. The returned total
    /// always counts every matching document, not just the returned
    /// page.
    ///
    /// An empty or whitespace-only term matches nothing and returns
    /// an empty result rather than an error.
    pub fn search(
        &self,
        descriptor: &IndexDescriptor,
        term: &str,
        from: Option<usize>,
        size: Option<usize>,
    ) -> Result<SearchResults> {
        let start = Instant::now();

        // Reopened fresh per request; dropped when this call returns.
        let index = Index::open_in_dir(&descriptor.path).map_err(|e| {
            warn!(index = %descriptor.name, error = %e, "failed to open index");
            LineseekError::IndexNotFound(descriptor.name.clone())
        })?;

        let reader = index.reader().map_err(|e| {
            LineseekError::SearchFailed(format!("Failed to create reader: {e}"))
        })?;
        let searcher = reader.searcher();
        let schema = index.schema();

        let query = build_query(&index, &schema, term);

        let limit = size.unwrap_or(self.default_size).clamp(1, self.max_size);
        let offset = from.unwrap_or(0).min(self.max_from);

        let (total, top_docs) = searcher
            .search(&*query, &(Count, TopDocs::with_limit(limit).and_offset(offset)))
            .map_err(|e| {
                warn!(index = %descriptor.name, error = %e, "search execution failed");
                LineseekError::SearchFailed(format!("Search failed: {e}"))
            })?;

        let snippet_generator = match text_field(&schema, LINE_FIELD) {
            Some(field) => {
                let mut generator = SnippetGenerator::create(&searcher, &*query, field)
                    .map_err(|e| {
                        LineseekError::SearchFailed(format!("Failed to build highlighter: {e}"))
                    })?;
                generator.set_max_num_chars(self.snippet_max_chars);
                Some(generator)
            }
            None => None,
        };

        let id_field = schema.get_field(ID_FIELD).ok();

        let mut hits = Vec::with_capacity(top_docs.len());
        for (_score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                LineseekError::SearchFailed(format!("Failed to retrieve document: {e}"))
            })?;

            let id = id_field
                .and_then(|field| {
                    doc.get_first(field)
                        .and_then(|v| v.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    format!("{}:{}", doc_address.segment_ord, doc_address.doc_id)
                });

            let highlighted_lines = snippet_generator
                .as_ref()
                .map(|generator| {
                    let snippet = generator.snippet_from_doc(&doc);
                    if snippet.highlighted().is_empty() {
                        Vec::new()
                    } else {
                        vec![snippet.to_html()]
                    }
                })
                .unwrap_or_default();

            hits.push(SearchHit {
                id,
                highlighted_lines,
            });
        }

        let took = start.elapsed();
        debug!(
            index = %descriptor.name,
            total,
            returned = hits.len(),
            took_ms = took.as_millis() as u64,
            "search completed"
        );

        Ok(SearchResults { total, took, hits })
    }
}

/// Build a match-style query over all indexed text fields.
///
/// Lenient parsing: free text never fails, malformed operator syntax
/// degrades to whatever the parser salvaged.
fn build_query(index: &Index, schema: &Schema, term: &str) -> Box<dyn Query> {
    let default_fields: Vec<Field> = schema
        .fields()
        .filter(|(_, entry)| is_indexed_text(entry.field_type()))
        .map(|(field, _)| field)
        .collect();

    if term.trim().is_empty() || default_fields.is_empty() {
        return Box::new(EmptyQuery);
    }

    let parser = QueryParser::for_index(index, default_fields);
    let (query, _errors) = parser.parse_query_lenient(term);
    query
}

fn is_indexed_text(field_type: &FieldType) -> bool {
    matches!(field_type, FieldType::Str(options) if options.get_indexing_options().is_some())
}

fn text_field(schema: &Schema, name: &str) -> Option<Field> {
    let field = schema.get_field(name).ok()?;
    is_indexed_text(schema.get_field_entry(field).field_type()).then_some(field)
}
