use log::debug;
use serde::Serialize;

use crate::data::node::{SchemaNode, SchemaShape};
use crate::data::reference::{resolve_ref, ResolvedRef};

use super::state::{ExpandState, NodePath};

/// How a property's type is displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDisplay {
    /// Plain type label.
    Plain(String),
    /// Cross-link to the referenced schema's documentation page.
    Link(ResolvedRef),
}

/// Leaf rendering of a schema without properties.
#[derive(Debug, Clone, Serialize)]
pub struct LeafView {
    /// Resolved type label, `"any"` when the type is absent.
    pub type_label: String,
    /// Optional description text.
    pub description: Option<String>,
    /// Allowed enum values joined by `", "`, if any.
    pub allowed_values: Option<String>,
}

/// One rendered property row.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyRow {
    /// Property name.
    pub name: String,
    /// Path of the row from the tree root.
    pub path: NodePath,
    /// Type display, a cross-link for reference properties.
    pub type_display: TypeDisplay,
    /// Whether the owning object lists this property as required.
    pub required: bool,
    /// Optional description text.
    pub description: Option<String>,
    /// Allowed enum values joined by `", "`, if any.
    pub allowed_values: Option<String>,
    /// Expansion toggle state; present only when the row nests further.
    pub toggle: Option<bool>,
    /// Child content; present only while the row is expanded.
    pub children: Option<RowChildren>,
}

/// Child content of an expanded row.
#[derive(Debug, Clone, Serialize)]
pub enum RowChildren {
    /// Nested property rows of an object property.
    Properties(Vec<PropertyRow>),
    /// Element subtree of an array property.
    ArrayItems(Box<SchemaTree>),
}

/// Rendered property list of an object node.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyList {
    /// Path of the owning node.
    pub path: NodePath,
    /// Whether the list is visible; defaults to expanded while the
    /// nesting level is below 2.
    pub expanded: bool,
    /// Rows in property insertion order.
    pub rows: Vec<PropertyRow>,
}

/// Rendered form of one schema node.
#[derive(Debug, Clone, Serialize)]
pub enum SchemaTree {
    /// Node without properties.
    Leaf(LeafView),
    /// Object node with a property list.
    Properties(PropertyList),
}

/// Recursive schema tree renderer.
///
/// Rendering is a pure function of the node, the expansion state, and the
/// nesting level; it performs no I/O and cannot fail.
pub struct TreeRenderer<'a> {
    state: &'a ExpandState,
}

impl<'a> TreeRenderer<'a> {
    /// Renderer over the given expansion state.
    pub fn new(state: &'a ExpandState) -> Self {
        Self { state }
    }

    /// Render `node` at the given nesting level.
    pub fn render(&self, node: &SchemaNode, level: usize) -> SchemaTree {
        let mut path = Vec::new();
        self.render_node(node, level, &mut path)
    }

    fn render_node(&self, node: &SchemaNode, level: usize, path: &mut NodePath) -> SchemaTree {
        match &node.shape {
            SchemaShape::Object {
                properties,
                required,
            } => {
                let expanded = self.state.is_expanded(path, level < 2);
                let mut rows = Vec::with_capacity(properties.len());
                for (name, child) in properties {
                    path.push(name.clone());
                    rows.push(self.render_row(name, child, required, level, path));
                    path.pop();
                }
                SchemaTree::Properties(PropertyList {
                    path: path.clone(),
                    expanded,
                    rows,
                })
            }
            shape => SchemaTree::Leaf(LeafView {
                type_label: node.meta.type_display(),
                description: node.meta.description.clone(),
                allowed_values: allowed_values(shape),
            }),
        }
    }

    fn render_row(
        &self,
        name: &str,
        node: &SchemaNode,
        required: &[String],
        level: usize,
        path: &mut NodePath,
    ) -> PropertyRow {
        let type_display = match &node.shape {
            SchemaShape::Reference { target } => match resolve_ref(target) {
                Some(resolved) => TypeDisplay::Link(resolved),
                None => {
                    debug!("unresolvable $ref, falling back to opaque type: {target}");
                    TypeDisplay::Plain(node.meta.type_display())
                }
            },
            _ => TypeDisplay::Plain(node.meta.type_display()),
        };

        let nested = node.has_nested();
        let expanded = nested && self.state.is_expanded(path, false);
        let children = if expanded {
            match &node.shape {
                SchemaShape::Object {
                    properties,
                    required,
                } => {
                    let mut rows = Vec::with_capacity(properties.len());
                    for (child_name, child) in properties {
                        path.push(child_name.clone());
                        rows.push(self.render_row(child_name, child, required, level, path));
                        path.pop();
                    }
                    Some(RowChildren::Properties(rows))
                }
                SchemaShape::Array { items } => Some(RowChildren::ArrayItems(Box::new(
                    self.render_node(items, level + 1, path),
                ))),
                _ => None,
            }
        } else {
            None
        };

        PropertyRow {
            name: name.to_string(),
            path: path.clone(),
            type_display,
            required: required.iter().any(|r| r == name),
            description: node.meta.description.clone(),
            allowed_values: allowed_values(&node.shape),
            toggle: if nested { Some(expanded) } else { None },
            children,
        }
    }
}

fn allowed_values(shape: &SchemaShape) -> Option<String> {
    match shape {
        SchemaShape::Enum { values } => Some(values.join(", ")),
        _ => None,
    }
}
