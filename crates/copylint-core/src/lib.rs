//! Core contracts for copylint.
//!
//! This crate defines the localized content tree, the language pair, the
//! validation issue type, and the loading helpers shared by the rules,
//! validator, and CLI crates.

pub mod content;
pub mod error;
pub mod issue;
pub mod language;
pub mod ordered;

pub use content::{ContentTree, ContentValue, load_content};
pub use error::{CoreError, Result};
pub use issue::{IssueSeverity, ValidationIssue};
pub use language::Language;
pub use ordered::OrderedMap;
