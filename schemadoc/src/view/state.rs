use std::collections::HashMap;

use crate::data::node::{SchemaNode, SchemaShape};

/// Property-name path from the tree root identifying one node.
pub type NodePath = Vec<String>;

/// Explicit expand/collapse state for a rendered tree.
///
/// The state is owned by whoever drives a render and threaded down through
/// it, so a whole tree's expansion can be inspected and replayed
/// deterministically. Toggling is a plain state flip with no persistence;
/// it is lost on navigation.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    expanded: HashMap<NodePath, bool>,
}

impl ExpandState {
    /// Empty state; every lookup falls back to the renderer's default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an explicit expansion state for a node path.
    pub fn set(&mut self, path: NodePath, expanded: bool) {
        self.expanded.insert(path, expanded);
    }

    /// Flip the state at `path`, starting from `default` when unset.
    pub fn toggle(&mut self, path: &[String], default: bool) {
        let current = self.is_expanded(path, default);
        self.expanded.insert(path.to_vec(), !current);
    }

    /// Current state at `path`, or `default` when never touched.
    pub fn is_expanded(&self, path: &[String], default: bool) -> bool {
        self.expanded.get(path).copied().unwrap_or(default)
    }

    /// State with every nested node under `node` expanded.
    ///
    /// Used for static rendering where the whole tree must be visible.
    pub fn expand_all(node: &SchemaNode) -> Self {
        let mut state = Self::new();
        let mut path = Vec::new();
        state.expand_from(node, &mut path);
        state
    }

    fn expand_from(&mut self, node: &SchemaNode, path: &mut NodePath) {
        match &node.shape {
            SchemaShape::Object { properties, .. } => {
                self.expanded.insert(path.clone(), true);
                for (name, child) in properties {
                    path.push(name.clone());
                    self.expand_from(child, path);
                    path.pop();
                }
            }
            SchemaShape::Array { items } => {
                // Array item subtrees share the owning row's path.
                self.expanded.insert(path.clone(), true);
                self.expand_from(items, path);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(parts: &[&str]) -> NodePath {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_flips_from_default() {
        let mut state = ExpandState::new();
        let p = path(&["a", "b"]);
        assert!(!state.is_expanded(&p, false));

        state.toggle(&p, false);
        assert!(state.is_expanded(&p, false));

        state.toggle(&p, false);
        assert!(!state.is_expanded(&p, false));
    }

    #[test]
    fn test_expand_all_covers_nested_paths() {
        let node = SchemaNode::from_value(&json!({
            "properties": {
                "outer": {
                    "properties": { "inner": { "type": "string" } }
                },
                "list": {
                    "type": "array",
                    "items": { "properties": { "x": { "type": "integer" } } }
                }
            }
        }));
        let state = ExpandState::expand_all(&node);

        assert!(state.is_expanded(&path(&[]), false));
        assert!(state.is_expanded(&path(&["outer"]), false));
        assert!(state.is_expanded(&path(&["list"]), false));
        // leaves carry no entry and keep the caller's default
        assert!(!state.is_expanded(&path(&["outer", "inner"]), false));
    }
}
