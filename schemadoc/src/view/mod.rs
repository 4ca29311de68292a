//! Tree rendering of schema nodes.
//!
//! Rendering is split into an explicit expansion state owned by the caller
//! ([`state`]), the recursive renderer producing a tree of display
//! elements ([`tree`]), and a markdown writer for statically generated
//! pages ([`markdown`]).

/// Markdown output for rendered trees.
pub mod markdown;

/// Expand/collapse state keyed by node path.
pub mod state;

/// Recursive tree renderer and display elements.
pub mod tree;

pub use markdown::write_markdown;
pub use state::{ExpandState, NodePath};
pub use tree::{PropertyRow, RowChildren, SchemaTree, TreeRenderer, TypeDisplay};
