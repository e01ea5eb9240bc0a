//! Core domain logic for the lineseek service.
//!
//! Protocol-agnostic: nothing in here knows about HTTP. The http/
//! adapter composes these pieces.

pub mod config;
pub mod error;
pub mod registry;
pub mod search;
pub mod services;
pub mod types;
