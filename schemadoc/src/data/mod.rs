//! Schema data structures and reference resolution.
//!
//! This module provides the in-memory representation of a JSON Schema
//! document and the resolution of `$ref` strings to documentation URLs:
//!
//! - [`node`] - Tagged schema node model
//! - [`reference`] - `$ref` resolution and URL derivation

/// Tagged schema node model.
pub mod node;

/// `$ref` resolution and URL derivation.
pub mod reference;

pub use node::SchemaNode;
