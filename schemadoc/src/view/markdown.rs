//! Markdown output for rendered schema trees.
//!
//! Used by the static page generator, which renders with a fully expanded
//! state so the whole property tree appears on the page.

use super::tree::{PropertyRow, RowChildren, SchemaTree, TypeDisplay};

/// Write a rendered tree as a markdown fragment.
///
/// Collapsed property lists produce no output, matching the interactive
/// viewer's behaviour.
pub fn write_markdown(tree: &SchemaTree) -> String {
    let mut out = String::new();
    write_tree(tree, 0, &mut out);
    out
}

fn write_tree(tree: &SchemaTree, indent: usize, out: &mut String) {
    match tree {
        SchemaTree::Leaf(leaf) => {
            let pad = "  ".repeat(indent);
            out.push_str(&format!("{pad}Type: **{}**\n", leaf.type_label));
            if let Some(description) = &leaf.description {
                out.push_str(&format!("{pad}{description}\n"));
            }
            if let Some(values) = &leaf.allowed_values {
                out.push_str(&format!("{pad}Allowed values: {values}\n"));
            }
        }
        SchemaTree::Properties(list) => {
            if !list.expanded {
                return;
            }
            write_rows(&list.rows, indent, out);
        }
    }
}

fn write_rows(rows: &[PropertyRow], indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    for row in rows {
        let type_text = match &row.type_display {
            TypeDisplay::Plain(label) => label.clone(),
            TypeDisplay::Link(resolved) => format!("[{}]({})", resolved.name, resolved.url),
        };
        let required = if row.required { ", required" } else { "" };
        let description = row
            .description
            .as_deref()
            .map(|d| format!(": {d}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{pad}- **{}** ({type_text}{required}){description}\n",
            row.name
        ));
        if let Some(values) = &row.allowed_values {
            out.push_str(&format!("{pad}  - Allowed values: {values}\n"));
        }
        match &row.children {
            Some(RowChildren::Properties(children)) => write_rows(children, indent + 1, out),
            Some(RowChildren::ArrayItems(items)) => {
                out.push_str(&format!("{pad}  - Array items:\n"));
                write_tree(items, indent + 2, out);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::node::SchemaNode;
    use crate::view::{ExpandState, TreeRenderer};
    use serde_json::json;

    fn markdown_for(value: serde_json::Value) -> String {
        let node = SchemaNode::from_value(&value);
        let state = ExpandState::expand_all(&node);
        write_markdown(&TreeRenderer::new(&state).render(&node, 0))
    }

    #[test]
    fn test_property_bullets() {
        let md = markdown_for(json!({
            "properties": {
                "name": { "type": "string", "description": "Display name" },
                "count": { "type": "integer" }
            },
            "required": ["name"]
        }));
        assert_eq!(
            md,
            "- **name** (string, required): Display name\n- **count** (integer)\n"
        );
    }

    #[test]
    fn test_reference_renders_as_link() {
        let md = markdown_for(json!({
            "properties": {
                "condition": { "$ref": "../../condition/QueryCondition.json" }
            }
        }));
        assert!(md.contains(
            "- **condition** ([QueryCondition](/schemas/common/condition/query-condition/))"
        ));
    }

    #[test]
    fn test_nested_rows_indent() {
        let md = markdown_for(json!({
            "properties": {
                "outer": {
                    "type": "object",
                    "properties": { "inner": { "type": "string" } }
                }
            }
        }));
        assert!(md.contains("- **outer** (object)\n  - **inner** (string)\n"));
    }
}
