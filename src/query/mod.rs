//! Queries over a parsed SSH config.
//!
//! This module handles:
//! - Resolving an alias to a concrete (non-template) host block
//! - Regex search across rendered blocks
//! - Flattening a block into a key/value mapping

pub mod fields;
pub mod matcher;
pub mod search;

pub use fields::{HostFields, extract_fields, fields_to_json};
pub use matcher::{block_matches, concrete_blocks, glob_match, resolve};
pub use search::{MatchSpan, SearchHit, compile_search_pattern, find, search};
