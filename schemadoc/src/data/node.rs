use serde::Serialize;
use serde_json::Value;

/// Fallback label for nodes without a `type` field.
pub const ANY_TYPE: &str = "any";

/// Display label for a schema `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeLabel {
    /// Single scalar type name.
    One(String),
    /// Union of scalar type names.
    Many(Vec<String>),
}

impl TypeLabel {
    fn from_value(value: &Value) -> Option<TypeLabel> {
        match value {
            Value::String(name) => Some(TypeLabel::One(name.clone())),
            Value::Array(items) => {
                let names: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                if names.is_empty() {
                    None
                } else {
                    Some(TypeLabel::Many(names))
                }
            }
            _ => None,
        }
    }

    /// Render the label; type unions join with `" | "`.
    pub fn display(&self) -> String {
        match self {
            TypeLabel::One(name) => name.clone(),
            TypeLabel::Many(names) => names.join(" | "),
        }
    }
}

/// Metadata shared by every schema node shape.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeMeta {
    /// Optional description text.
    pub description: Option<String>,
    /// Declared type, if any.
    pub type_label: Option<TypeLabel>,
}

impl NodeMeta {
    /// Type label for display, `"any"` when absent.
    pub fn type_display(&self) -> String {
        self.type_label
            .as_ref()
            .map(TypeLabel::display)
            .unwrap_or_else(|| ANY_TYPE.to_string())
    }
}

/// Structural classification of a schema node.
///
/// A node carrying `$ref` is a pure reference: its own type and properties
/// are never rendered independently.
#[derive(Debug, Clone, Serialize)]
pub enum SchemaShape {
    /// Reference to another schema document.
    Reference {
        /// Raw `$ref` string, e.g. `"../../condition/QueryCondition.json"`.
        target: String,
    },
    /// Object with named properties in insertion order.
    Object {
        /// Property name to nested node, insertion order preserved.
        properties: Vec<(String, SchemaNode)>,
        /// Names of properties that must be present.
        required: Vec<String>,
    },
    /// Array with an element schema.
    Array {
        /// Schema describing the array element shape.
        items: Box<SchemaNode>,
    },
    /// Closed set of allowed literal values.
    Enum {
        /// Allowed values, stringified for display.
        values: Vec<String>,
    },
    /// Plain leaf.
    Scalar,
}

/// One JSON Schema document or sub-document.
///
/// Constructed once per page render from a schema document loaded at build
/// time and immutable for the render's duration.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaNode {
    /// Shared node metadata.
    pub meta: NodeMeta,
    /// Structural shape.
    pub shape: SchemaShape,
}

impl SchemaNode {
    /// Build a node from a JSON value.
    ///
    /// Classification precedence is `$ref`, then `properties`, then
    /// `items`, then `enum`. Non-object input degrades to an untyped
    /// scalar leaf; this constructor never fails.
    pub fn from_value(value: &Value) -> SchemaNode {
        let Value::Object(map) = value else {
            return SchemaNode {
                meta: NodeMeta::default(),
                shape: SchemaShape::Scalar,
            };
        };

        let meta = NodeMeta {
            description: map
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            type_label: map.get("type").and_then(TypeLabel::from_value),
        };

        let shape = if let Some(target) = map.get("$ref").and_then(Value::as_str) {
            SchemaShape::Reference {
                target: target.to_string(),
            }
        } else if let Some(Value::Object(props)) = map.get("properties") {
            let properties = props
                .iter()
                .map(|(name, child)| (name.clone(), SchemaNode::from_value(child)))
                .collect();
            let required = map
                .get("required")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            SchemaShape::Object {
                properties,
                required,
            }
        } else if let Some(items) = map.get("items") {
            SchemaShape::Array {
                items: Box::new(SchemaNode::from_value(items)),
            }
        } else if let Some(values) = map.get("enum").and_then(Value::as_array) {
            SchemaShape::Enum {
                values: values.iter().map(enum_literal).collect(),
            }
        } else {
            SchemaShape::Scalar
        };

        SchemaNode { meta, shape }
    }

    /// Whether the node nests further and therefore carries a toggle.
    pub fn has_nested(&self) -> bool {
        matches!(
            self.shape,
            SchemaShape::Object { .. } | SchemaShape::Array { .. }
        )
    }
}

fn enum_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_takes_precedence() {
        let node = SchemaNode::from_value(&json!({
            "$ref": "../model/Foo.json",
            "type": "object",
            "properties": { "x": { "type": "string" } }
        }));
        assert!(matches!(
            node.shape,
            SchemaShape::Reference { ref target } if target == "../model/Foo.json"
        ));
    }

    #[test]
    fn test_property_order_preserved() {
        let node = SchemaNode::from_value(&json!({
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" }
            }
        }));
        let SchemaShape::Object { properties, .. } = &node.shape else {
            panic!("expected object shape");
        };
        let names: Vec<&str> = properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_type_display_defaults_to_any() {
        let node = SchemaNode::from_value(&json!({ "description": "no type here" }));
        assert_eq!(node.meta.type_display(), "any");

        let node = SchemaNode::from_value(&json!({ "type": ["string", "null"] }));
        assert_eq!(node.meta.type_display(), "string | null");
    }

    #[test]
    fn test_enum_values_stringified() {
        let node = SchemaNode::from_value(&json!({ "enum": ["a", 1, true] }));
        let SchemaShape::Enum { values } = &node.shape else {
            panic!("expected enum shape");
        };
        assert_eq!(values, &["a", "1", "true"]);
    }

    #[test]
    fn test_non_object_input_degrades_to_scalar() {
        let node = SchemaNode::from_value(&json!(true));
        assert!(matches!(node.shape, SchemaShape::Scalar));
        assert!(node.meta.description.is_none());
    }
}
