//! # schemadoc
//!
//! A library for presenting JSON Schema documents as documentation.
//!
//! schemadoc turns a schema document into a navigable property tree with
//! cross-links between schema pages, suitable for embedding in a generated
//! documentation site.
//!
//! ## Features
//!
//! - Tagged schema node model parsed from `serde_json` values
//! - `$ref` resolution to documentation URLs with category routing
//! - Recursive tree rendering with explicit expand/collapse state
//! - Markdown output for statically generated pages
//!
//! ## Quick Start
//!
//! ```rust
//! use schemadoc::data::node::SchemaNode;
//! use schemadoc::view::{ExpandState, TreeRenderer};
//!
//! let value = serde_json::json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! });
//! let node = SchemaNode::from_value(&value);
//! let state = ExpandState::expand_all(&node);
//! let tree = TreeRenderer::new(&state).render(&node, 0);
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema node model and reference resolution
//! - [`view`] - Tree rendering and expansion state

/// Schema node model and reference resolution.
pub mod data;

/// Tree rendering and expansion state.
pub mod view;

pub use data::node::SchemaNode;
pub use data::reference::{kebab_case, resolve_ref, ResolvedRef};
pub use view::{ExpandState, SchemaTree, TreeRenderer};
