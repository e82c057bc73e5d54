//! Required-field validation, run before submission.
//!
//! Only the editable field kinds participate: a required component whose
//! bound field carries empty data fails. References are *not* dereferenced
//! here — the edited data lives in the field map regardless of how many
//! components point at it — so only owned children are walked, in document
//! order.

use crate::model::{Component, ComponentKey};
use crate::resources::FieldMap;

/// Whether this component itself fails the required-field check.
fn fails(component: &Component, fields: &FieldMap) -> bool {
    if !component.kind.is_field() || !component.is_required {
        return false;
    }
    // A required field with no bound entry has no data either way.
    fields
        .get(&component.key)
        .is_none_or(|field| field.data.is_empty())
}

/// Recursive check that required, revealed fields carry non-empty data.
/// Short-circuits on the first failure in document order.
pub fn validate(component: &Component, fields: &FieldMap) -> bool {
    if fails(component, fields) {
        return false;
    }

    for child in &component.children {
        if !validate(child, fields) {
            return false;
        }
    }

    true
}

/// Collect every required field that would fail validation, in document
/// order. Callers surface these to the user rather than a bare boolean.
pub fn missing_required(component: &Component, fields: &FieldMap) -> Vec<ComponentKey> {
    let mut missing = Vec::new();
    collect_missing(component, fields, &mut missing);
    missing
}

fn collect_missing(component: &Component, fields: &FieldMap, missing: &mut Vec<ComponentKey>) {
    if fails(component, fields) {
        missing.push(component.key.clone());
    }
    for child in &component.children {
        collect_missing(child, fields, missing);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::build::build_component;
    use crate::model::ContentMap;
    use crate::resources::Resources;
    use serde_json::json;

    fn content() -> ContentMap {
        let mut map = ContentMap::new();
        map.insert("classID".into(), "Work".into());
        map
    }

    fn form() -> (Component, Resources) {
        let doc = json!({
            "type": "Region",
            "name": "Body",
            "children": [
                {
                    "type": "TextInput",
                    "config": { "value": "@P .Amount", "label": "@L Amount", "required": true }
                },
                {
                    "type": "TextArea",
                    "config": { "value": "@P .Notes", "label": "@L Notes" }
                },
                {
                    "type": "Currency",
                    "config": { "value": "@P .Total", "label": "@L Total", "required": true }
                }
            ]
        });
        let mut resources = Resources::new();
        let component = build_component(&doc, &content(), &mut resources, "Work").unwrap();
        (component, resources)
    }

    #[test]
    fn empty_required_fields_fail() {
        let (component, resources) = form();
        assert!(!validate(&component, &resources.fields));

        let missing = missing_required(&component, &resources.fields);
        let keys: Vec<&str> = missing.iter().map(ComponentKey::as_str).collect();
        assert_eq!(keys, vec!["Work.Amount", "Work.Total"]);
    }

    #[test]
    fn filled_required_fields_pass() {
        let (component, mut resources) = form();
        for key in ["Amount", "Total"] {
            resources
                .field_mut(&ComponentKey::new("Work", key))
                .unwrap()
                .data = "100".into();
        }

        assert!(validate(&component, &resources.fields));
        assert!(missing_required(&component, &resources.fields).is_empty());
    }

    #[test]
    fn optional_fields_never_fail() {
        let (component, mut resources) = form();
        for key in ["Amount", "Total"] {
            resources
                .field_mut(&ComponentKey::new("Work", key))
                .unwrap()
                .data = "x".into();
        }
        // Notes stays empty; it is not required.
        assert!(validate(&component, &resources.fields));
    }

    #[test]
    fn graph_without_editable_fields_is_valid() {
        let doc = json!({ "type": "Region", "name": "Body" });
        let mut resources = Resources::new();
        let component = build_component(&doc, &content(), &mut resources, "Work").unwrap();

        assert!(validate(&component, &resources.fields));
    }

    #[test]
    fn references_are_not_dereferenced() {
        let doc = json!({
            "type": "Reference",
            "config": { "name": "Target", "type": "view" }
        });
        let mut resources = Resources::new();
        let reference = build_component(&doc, &content(), &mut resources, "Work").unwrap();

        // Arena holds a target with a failing required field under the same
        // key space; validation of the reference still passes because only
        // owned children are walked.
        let target = json!({
            "type": "View",
            "name": "Target",
            "classID": "Work",
            "config": { "template": "DefaultForm" },
            "children": [{
                "type": "TextInput",
                "config": { "value": "@P .Amount", "label": "@L Amount", "required": true }
            }]
        });
        build_component(&target, &content(), &mut resources, "").unwrap();

        assert!(validate(&reference, &resources.fields));
    }
}
