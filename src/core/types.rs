//! Core data types for the lineseek service.
//!
//! Domain results produced by the query executor, plus the wire
//! request/response structures exchanged over HTTP. The wire format
//! keeps the upper-cased `SearchStat`/`Hits`/`Name`/`Line` keys
//! existing clients depend on.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One matching document with its highlighted fragments
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Opaque document identifier assigned by the index
    pub id: String,

    /// Highlighted fragments drawn from the `Line` field.
    /// Empty when the field is absent or nothing qualified.
    pub highlighted_lines: Vec<String>,
}

/// Outcome of one query execution, in relevance order
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Count of all matching documents, not just the returned page
    pub total: usize,

    /// Elapsed duration of the query
    pub took: Duration,

    /// Returned page of hits, ordered by relevance
    pub hits: Vec<SearchHit>,
}

/// Query-string parameters of `GET /search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Index name
    #[serde(rename = "i", default)]
    pub index: String,

    /// Free-text search term
    #[serde(rename = "q", default)]
    pub term: String,

    /// Hit offset within the full result set
    pub from: Option<usize>,

    /// Page size, clamped to the configured maximum
    pub size: Option<usize>,
}

/// Wire shape of one hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitResponse {
    /// Document identifier
    #[serde(rename = "Name")]
    pub name: String,

    /// Highlighted fragments from the `Line` field
    #[serde(rename = "Line")]
    pub line: Vec<String>,
}

/// Response body of `GET /search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Human-readable summary, e.g. `"3 results (1.2ms)"`
    #[serde(rename = "SearchStat")]
    pub search_stat: String,

    /// Matching documents in relevance order
    #[serde(rename = "Hits")]
    pub hits: Vec<HitResponse>,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            search_stat: format!("{} results ({:?})", results.total, results.took),
            hits: results
                .hits
                .into_iter()
                .map(|hit| HitResponse {
                    name: hit.id,
                    line: hit.highlighted_lines,
                })
                .collect(),
        }
    }
}

/// One registry entry that failed validation at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedIndex {
    /// Directory base name
    pub name: String,

    /// Why the entry was skipped
    pub reason: String,
}

/// Response body of `GET /indexes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexesResponse {
    /// Names of indexes available for search
    pub indexes: Vec<String>,

    /// Entries that failed validation and are not served
    pub skipped: Vec<SkippedIndex>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_wire_keys() {
        let results = SearchResults {
            total: 2,
            took: Duration::from_millis(3),
            hits: vec![SearchHit {
                id: "doc-1".to_string(),
                highlighted_lines: vec!["a <b>match</b>".to_string()],
            }],
        };

        let response = SearchResponse::from(results);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json["SearchStat"].as_str().unwrap().starts_with("2 results ("));
        assert_eq!(json["Hits"][0]["Name"], "doc-1");
        assert_eq!(json["Hits"][0]["Line"][0], "a <b>match</b>");
    }

    #[test]
    fn test_search_params_deserialization() {
        let params: SearchParams =
            serde_json::from_str(r#"{"i": "hpotter", "q": "nimbus", "size": 5}"#).unwrap();

        assert_eq!(params.index, "hpotter");
        assert_eq!(params.term, "nimbus");
        assert_eq!(params.from, None);
        assert_eq!(params.size, Some(5));
    }

    #[test]
    fn test_search_params_default_empty() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();

        assert_eq!(params.index, "");
        assert_eq!(params.term, "");
    }
}
