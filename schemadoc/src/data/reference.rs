//! Resolution of `$ref` strings to documentation page URLs.
//!
//! A reference such as `"../../condition/QueryCondition.json"` resolves to
//! a display name (`QueryCondition`) and a site-relative URL
//! (`/schemas/common/condition/query-condition/`). Resolution is pure and
//! performs no I/O; an unresolvable reference yields `None` and the caller
//! falls back to opaque type display.

use serde::Serialize;

/// Display name and navigable URL computed from a `$ref` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRef {
    /// Schema name, the file stem of the referenced document.
    pub name: String,
    /// Site-relative URL of the schema's documentation page.
    pub url: String,
}

/// Category marker substrings and their URL prefixes.
///
/// Checked in order, first match wins. `/statemachine/conf/` must stay
/// ahead of `/statemachine/` to avoid misrouting.
const CATEGORY_ROUTES: &[(&str, &str)] = &[
    ("/condition/", "/schemas/common/condition/"),
    ("/statemachine/conf/", "/schemas/common/statemachine/conf/"),
    ("/statemachine/", "/schemas/common/statemachine/"),
    ("/entity/", "/schemas/entity/"),
    ("/model/", "/schemas/model/"),
    ("/search/", "/schemas/search/"),
    ("/processing/", "/schemas/processing/"),
    ("/common/", "/schemas/common/"),
];

/// URL prefix used when no category marker matches.
const DEFAULT_ROUTE: &str = "/schemas/common/";

/// Resolve a `$ref` string to a display name and page URL.
///
/// Returns `None` when the reference has no trailing `<Name>.json`
/// segment; this is a fallback condition, not an error.
pub fn resolve_ref(reference: &str) -> Option<ResolvedRef> {
    let stem = reference.strip_suffix(".json")?;
    let name = stem.rsplit('/').next().unwrap_or(stem);
    if name.is_empty() {
        return None;
    }

    let prefix = CATEGORY_ROUTES
        .iter()
        .find(|(marker, _)| reference.contains(marker))
        .map(|(_, prefix)| *prefix)
        .unwrap_or(DEFAULT_ROUTE);

    Some(ResolvedRef {
        name: name.to_string(),
        url: format!("{prefix}{}/", kebab_case(name)),
    })
}

/// Convert a capitalized-word-boundary name to hyphenated lowercase.
///
/// A hyphen is inserted at every lowercase-to-uppercase boundary, then the
/// whole string is lowercased: `QueryCondition` becomes `query-condition`,
/// while `ID` (no boundary) becomes `id`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if prev_lower && ch.is_ascii_uppercase() {
            out.push('-');
        }
        prev_lower = ch.is_ascii_lowercase();
        out.extend(ch.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_condition_ref() {
        let resolved = resolve_ref("../../condition/QueryCondition.json").unwrap();
        assert_eq!(resolved.name, "QueryCondition");
        assert_eq!(resolved.url, "/schemas/common/condition/query-condition/");
    }

    #[test]
    fn test_statemachine_conf_wins_over_statemachine() {
        let resolved = resolve_ref("../statemachine/conf/StateConf.json").unwrap();
        assert_eq!(resolved.url, "/schemas/common/statemachine/conf/state-conf/");

        let resolved = resolve_ref("../statemachine/WorkflowInfo.json").unwrap();
        assert_eq!(resolved.url, "/schemas/common/statemachine/workflow-info/");
    }

    #[test]
    fn test_category_routing() {
        let cases = [
            ("../entity/EntityRequest.json", "/schemas/entity/entity-request/"),
            ("../model/ModelInfo.json", "/schemas/model/model-info/"),
            ("../search/SearchQuery.json", "/schemas/search/search-query/"),
            (
                "../processing/CalcNode.json",
                "/schemas/processing/calc-node/",
            ),
            ("../common/PageInfo.json", "/schemas/common/page-info/"),
        ];
        for (reference, url) in cases {
            assert_eq!(resolve_ref(reference).unwrap().url, url, "{reference}");
        }
    }

    #[test]
    fn test_unknown_category_defaults_to_common() {
        let resolved = resolve_ref("../somewhere/Thing.json").unwrap();
        assert_eq!(resolved.url, "/schemas/common/thing/");
    }

    #[test]
    fn test_no_json_segment_yields_none() {
        assert!(resolve_ref("").is_none());
        assert!(resolve_ref("../model/Foo").is_none());
        assert!(resolve_ref("#/definitions/Foo").is_none());
        assert!(resolve_ref("../model/.json").is_none());
    }

    #[test]
    fn test_bare_file_name_resolves() {
        let resolved = resolve_ref("Foo.json").unwrap();
        assert_eq!(resolved.name, "Foo");
        assert_eq!(resolved.url, "/schemas/common/foo/");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("QueryCondition"), "query-condition");
        assert_eq!(kebab_case("ID"), "id");
        assert_eq!(kebab_case("simple"), "simple");
        assert_eq!(kebab_case("EntityCreateRequest"), "entity-create-request");
    }
}
