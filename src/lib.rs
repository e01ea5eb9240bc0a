//! Lineseek - Multi-Index Full-Text Search Service
//!
//! Serves a directory of independently named Tantivy indexes over
//! HTTP. A query names one index and a search term, and gets back
//! ranked matches with highlighted fragments.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - registry (index discovery and name resolution)
//!   - search (per-request query execution)
//!   - services (unified service container)
//!
//! - **http**: REST adapter (depends on core)
//!   - handlers, middleware, router
//!
//! # Key Properties
//!
//! - Indexes are discovered once at startup; entries that fail to
//!   open are skipped and reported, the rest are served.
//! - Every search opens its own private index handle and releases
//!   it when done. No handle is shared between requests.
//! - Results are bounded by a configurable page size; highlighting
//!   is drawn from the `Line` field only.

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{LineseekError, Result};
pub use crate::core::registry::{IndexDescriptor, IndexRegistry};
pub use crate::core::search::SearchService;
pub use crate::core::services::Services;
pub use crate::core::types::*;
