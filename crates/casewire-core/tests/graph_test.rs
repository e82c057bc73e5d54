//! End-to-end graph tests: a full service response in, an editable,
//! validated, submittable component graph out.

#![allow(clippy::unwrap_used)]

use casewire_core::traverse::debug_outline;
use casewire_core::validate::{missing_required, validate};
use casewire_core::{CaseSnapshot, ComponentKey, ComponentKind};
use pretty_assertions::assert_eq;
use serde_json::json;

/// A trimmed but structurally faithful case-opening response: case info
/// with one assignment, scalar and non-scalar content, field metadata, a
/// root view, and a shared view reached through two reference sites.
fn response_body() -> String {
    json!({
        "data": {
            "caseInfo": {
                "ID": "My-Org-Work-Expense E-1001",
                "businessID": "E-1001",
                "caseTypeID": "My-Org-Work-Expense",
                "caseTypeName": "Expense report",
                "createTime": "2024-03-01T09:30:00.000Z",
                "createdBy": "ada",
                "lastUpdateTime": "2024-03-01T09:31:00.000Z",
                "lastUpdatedBy": "ada",
                "name": "Expense report",
                "owner": "ada",
                "status": "New",
                "assignments": [
                    {
                        "ID": "ASSIGN-WORKLIST My-Org-Work-Expense E-1001!CREATE",
                        "name": "Create",
                        "canPerform": "true",
                        "actions": [
                            { "ID": "Create", "name": "Create", "type": "Assignment" }
                        ]
                    }
                ],
                "content": {
                    "classID": "My-Org-Work-Expense",
                    "Status": "New",
                    "Attachments": { "ignored": "embedded page" }
                }
            }
        },
        "uiResources": {
            "resources": {
                "fields": {
                    "Amount": [{
                        "type": "Decimal",
                        "classID": "My-Org-Work-Expense",
                        "label": "Expense amount"
                    }],
                    "Notes": [{
                        "type": "Text",
                        "classID": "My-Org-Work-Expense",
                        "label": "Notes"
                    }]
                },
                "views": {
                    "Details": [{
                        "type": "View",
                        "name": "Details",
                        "classID": "My-Org-Work-Expense",
                        "config": { "template": "DefaultForm" },
                        "children": [
                            {
                                "type": "Region",
                                "name": "Body",
                                "children": [
                                    {
                                        "type": "TextInput",
                                        "config": {
                                            "value": "@P .Amount",
                                            "label": "@FL .Amount",
                                            "required": true
                                        }
                                    },
                                    {
                                        "type": "Reference",
                                        "config": { "name": "SharedNotes", "type": "view" }
                                    }
                                ]
                            },
                            {
                                "type": "Reference",
                                "config": { "name": "SharedNotes", "type": "view" }
                            }
                        ]
                    }],
                    "SharedNotes": [{
                        "type": "View",
                        "name": "SharedNotes",
                        "classID": "My-Org-Work-Expense",
                        "config": { "template": "DefaultForm" },
                        "children": [{
                            "type": "TextArea",
                            "config": { "value": "@P .Notes", "label": "@FL .Notes" }
                        }]
                    }]
                }
            },
            "root": {
                "config": {
                    "context": "caseInfo.content",
                    "name": "Details",
                    "type": "view"
                }
            }
        }
    })
    .to_string()
}

#[test]
fn full_response_builds_the_graph() {
    let snapshot = CaseSnapshot::parse(&response_body()).unwrap();

    assert_eq!(snapshot.case_info.id, "My-Org-Work-Expense E-1001");
    assert_eq!(snapshot.case_info.business_id, "E-1001");
    assert_eq!(snapshot.case_info.case_type.id, "My-Org-Work-Expense");
    assert_eq!(snapshot.case_info.case_type.name, "Expense report");
    assert_eq!(snapshot.case_info.status, "New");

    let assignment = snapshot
        .case_info
        .assignments
        .get("ASSIGN-WORKLIST My-Org-Work-Expense E-1001!CREATE")
        .unwrap();
    assert!(assignment.can_perform);
    assert_eq!(assignment.actions["Create"].action_type, "Assignment");

    // Scalar content survives; embedded pages do not.
    assert_eq!(snapshot.case_info.content["Status"], "New");
    assert!(!snapshot.case_info.content.contains_key("Attachments"));

    // Root points at the arena entry for the Details view.
    let root = snapshot.root.unwrap();
    assert_eq!(root.as_str(), "My-Org-Work-Expense.Details");
    let details = snapshot.resources.component(&root).unwrap();
    assert_eq!(details.kind, ComponentKind::View);
    assert_eq!(details.ref_kind, ComponentKind::DefaultForm);

    // Every non-reference node is reachable by key.
    for name in ["Details", "Body", "Amount", "SharedNotes", "Notes"] {
        let key = ComponentKey::new("My-Org-Work-Expense", name);
        assert!(
            snapshot.resources.component(&key).is_some(),
            "missing arena entry for {name}"
        );
    }

    // Labels resolved through the metadata table.
    let amount = snapshot
        .resources
        .component(&ComponentKey::new("My-Org-Work-Expense", "Amount"))
        .unwrap();
    assert_eq!(amount.label, "Expense amount");
    assert_eq!(amount.summary, "TextInput: Expense amount");
    assert!(amount.is_required);
}

#[test]
fn validation_gates_on_required_data() {
    let mut snapshot = CaseSnapshot::parse(&response_body()).unwrap();
    let root = snapshot.root.clone().unwrap();
    let details = snapshot.resources.component(&root).unwrap().clone();

    // Amount is required and the case content carries no value for it.
    assert!(!validate(&details, &snapshot.resources.fields));
    let missing = missing_required(&details, &snapshot.resources.fields);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].as_str(), "My-Org-Work-Expense.Amount");

    // The user fills it in.
    let amount_key = ComponentKey::new("My-Org-Work-Expense", "Amount");
    let field = snapshot.resources.field_mut(&amount_key).unwrap();
    field.data = "100".into();
    field.is_dirty = true;

    assert!(validate(&details, &snapshot.resources.fields));

    // Only the touched field lands in the submission payload.
    let content = snapshot.resources.dirty_content().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content["Amount"], "100");
}

#[test]
fn selection_is_consistent_across_reference_paths() {
    let mut snapshot = CaseSnapshot::parse(&response_body()).unwrap();
    let root = snapshot.root.clone().unwrap();
    let shared_key = ComponentKey::new("My-Org-Work-Expense", "SharedNotes");

    assert!(snapshot.resources.select_component(&shared_key));

    // Exactly one arena entry carries the flag.
    let flagged = snapshot
        .resources
        .components
        .values()
        .filter(|c| c.is_selected)
        .count();
    assert_eq!(flagged, 1);

    // Both reference paths from the root report the same selected target.
    let details = snapshot.resources.component(&root).unwrap().clone();
    let mut outline = Vec::new();
    debug_outline(&details, &snapshot.resources.components, 0, &mut outline);

    let selected: Vec<&str> = outline
        .iter()
        .filter(|node| node.is_selected)
        .map(|node| node.key.as_str())
        .collect();
    assert_eq!(selected.len(), 4); // two reference sites, two dereferenced targets
    assert!(
        selected
            .iter()
            .all(|key| *key == "My-Org-Work-Expense.SharedNotes")
    );

    // Selecting something else clears it everywhere.
    snapshot
        .resources
        .select_component(&ComponentKey::new("My-Org-Work-Expense", "Body"));
    assert!(!snapshot.resources.is_selected(&shared_key));
}

#[test]
fn response_without_ui_resources_has_no_root() {
    let body = json!({
        "data": {
            "caseInfo": {
                "ID": "My-Org-Work-Expense E-1002",
                "businessID": "E-1002",
                "caseTypeID": "My-Org-Work-Expense",
                "caseTypeName": "Expense report",
                "createTime": "2024-03-01T10:00:00.000Z",
                "createdBy": "ada",
                "lastUpdateTime": "2024-03-01T10:00:00.000Z",
                "lastUpdatedBy": "ada",
                "name": "Expense report",
                "owner": "ada",
                "status": "New"
            }
        }
    })
    .to_string();

    let snapshot = CaseSnapshot::parse(&body).unwrap();
    assert!(snapshot.root.is_none());
    assert!(snapshot.resources.components.is_empty());
    assert!(snapshot.resources.fields.is_empty());
    assert!(snapshot.case_info.assignments.is_empty());
}
