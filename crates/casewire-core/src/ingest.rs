//! Service-response ingestion.
//!
//! One case/assignment/action response carries everything this crate
//! models: case identity and assignments under `data.caseInfo`, the
//! content namespace, and (for form-bearing endpoints) `uiResources` with
//! the field-metadata table, the view table, and the root component
//! pointer. Raw response shapes are deserialized with serde and converted
//! into the domain types; the two resource tables are dynamically shaped
//! and navigated as JSON values.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::build::build_component;
use crate::error::CoreError;
use crate::model::{ActionInfo, Assignment, CaseInfo, CaseType, ComponentKey, ContentMap, Field};
use crate::resolve::{coerce_bool, coerce_scalar, content_value, make_key};
use crate::resources::Resources;

/// Everything extracted from one service response: case metadata plus the
/// freshly built component/field arena. Replaces the previous snapshot
/// wholesale when the user navigates.
#[derive(Debug)]
pub struct CaseSnapshot {
    pub case_info: CaseInfo,
    pub resources: Resources,
    /// Key of the root view, when the response carried UI resources.
    pub root: Option<ComponentKey>,
}

// ── Raw response shapes ─────────────────────────────────────────────

#[derive(Deserialize)]
struct RawResponse {
    data: RawData,
    #[serde(rename = "uiResources")]
    ui_resources: Option<RawUiResources>,
}

#[derive(Deserialize)]
struct RawData {
    #[serde(rename = "caseInfo")]
    case_info: RawCaseInfo,
}

#[derive(Deserialize)]
struct RawCaseInfo {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "businessID")]
    business_id: String,
    #[serde(rename = "caseTypeID")]
    case_type_id: String,
    #[serde(rename = "caseTypeName")]
    case_type_name: String,
    #[serde(rename = "createTime")]
    create_time: String,
    #[serde(rename = "createdBy")]
    created_by: String,
    #[serde(rename = "lastUpdateTime")]
    last_update_time: String,
    #[serde(rename = "lastUpdatedBy")]
    last_updated_by: String,
    name: String,
    owner: String,
    status: String,
    #[serde(default)]
    assignments: Vec<RawAssignment>,
    #[serde(default)]
    content: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawAssignment {
    #[serde(rename = "ID")]
    id: String,
    name: String,
    #[serde(rename = "canPerform", default)]
    can_perform: Value,
    #[serde(default)]
    actions: Vec<RawAction>,
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "ID")]
    id: String,
    name: String,
    #[serde(rename = "type")]
    action_type: String,
}

#[derive(Deserialize)]
struct RawUiResources {
    resources: RawResourceTables,
    root: RawRoot,
}

#[derive(Deserialize)]
struct RawResourceTables {
    #[serde(default)]
    fields: Map<String, Value>,
    #[serde(default)]
    views: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawRoot {
    config: RawRootConfig,
}

#[derive(Deserialize)]
struct RawRootConfig {
    context: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<RawCaseInfo> for CaseInfo {
    fn from(raw: RawCaseInfo) -> Self {
        let mut content = ContentMap::new();
        for (name, value) in &raw.content {
            // Non-scalar content (embedded pages, lists) is not name-resolvable.
            if let Some(scalar) = coerce_scalar(value) {
                content.insert(name.clone(), scalar);
            }
        }

        let mut assignments = indexmap::IndexMap::new();
        for assignment in raw.assignments {
            let mut actions = indexmap::IndexMap::new();
            for action in assignment.actions {
                actions.insert(
                    action.id.clone(),
                    ActionInfo {
                        id: action.id,
                        name: action.name,
                        action_type: action.action_type,
                    },
                );
            }
            assignments.insert(
                assignment.id.clone(),
                Assignment {
                    id: assignment.id,
                    name: assignment.name,
                    can_perform: coerce_bool(&assignment.can_perform),
                    actions,
                },
            );
        }

        Self {
            id: raw.id,
            business_id: raw.business_id,
            case_type: CaseType {
                id: raw.case_type_id,
                name: raw.case_type_name,
            },
            create_time: raw.create_time,
            created_by: raw.created_by,
            last_update_time: raw.last_update_time,
            last_updated_by: raw.last_updated_by,
            name: raw.name,
            owner: raw.owner,
            status: raw.status,
            assignments,
            content,
        }
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

impl CaseSnapshot {
    /// Parse a full case/assignment/action response body.
    pub fn parse(body: &str) -> Result<Self, CoreError> {
        let raw: RawResponse = serde_json::from_str(body)?;
        let case_info = CaseInfo::from(raw.data.case_info);

        let mut resources = Resources::new();
        let mut root = None;

        if let Some(ui) = raw.ui_resources {
            // Field metadata first: label resolution for editable
            // components reads it while views are built.
            ingest_fields(&ui.resources.fields, &case_info.content, &mut resources)?;

            for entries in ui.resources.views.values() {
                let Some(entries) = entries.as_array() else {
                    continue;
                };
                for view in entries {
                    build_component(view, &case_info.content, &mut resources, "")?;
                }
            }

            root = Some(resolve_root(&ui.root.config, &case_info.content)?);
        }

        debug!(
            case = %case_info.id,
            components = resources.components.len(),
            fields = resources.fields.len(),
            "case snapshot ingested"
        );

        Ok(Self {
            case_info,
            resources,
            root,
        })
    }
}

fn ingest_fields(
    tables: &Map<String, Value>,
    content: &ContentMap,
    resources: &mut Resources,
) -> Result<(), CoreError> {
    for (id, entries) in tables {
        let Some(entries) = entries.as_array() else {
            continue;
        };
        for value in entries {
            let field_type = value
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| CoreError::MissingAttribute {
                    attribute: "field.type".to_owned(),
                })?;

            // The metadata table sometimes carries a completely malformed
            // "Unknown" entry; skip it entirely.
            if field_type.eq_ignore_ascii_case("unknown") {
                warn!(field = %id, "skipping malformed field metadata");
                continue;
            }

            let class_id = value
                .get("classID")
                .and_then(Value::as_str)
                .ok_or_else(|| CoreError::MissingAttribute {
                    attribute: "field.classID".to_owned(),
                })?
                .to_owned();
            let label = value
                .get("label")
                .and_then(Value::as_str)
                .ok_or_else(|| CoreError::MissingAttribute {
                    attribute: "field.label".to_owned(),
                })?
                .to_owned();

            let mut field = Field {
                id: id.clone(),
                label,
                field_type: field_type.to_owned(),
                json: serde_json::to_string_pretty(value)?,
                ..Field::default()
            };
            if let Some(flag) = value.get("isSpecial") {
                field.is_special = coerce_bool(flag);
            }
            if let Some(flag) = value.get("isClassKey") {
                field.is_class_key = coerce_bool(flag);
            }

            // Seed the editable value from case content when present.
            field.data = content_value(content, &class_id, id, false)?;
            field.class_id = class_id;

            let key = make_key(&field.class_id, id);
            resources.fields.insert(key, field);
        }
    }

    Ok(())
}

/// Resolve the root component pointer. Only the `caseInfo.content` context
/// with a `view` root is supported; anything else cannot be represented
/// and is a fatal error.
fn resolve_root(config: &RawRootConfig, content: &ContentMap) -> Result<ComponentKey, CoreError> {
    if config.context != "caseInfo.content" {
        return Err(CoreError::UnsupportedRoot {
            detail: format!("context '{}'", config.context),
        });
    }
    if config.kind != "view" {
        return Err(CoreError::UnsupportedRoot {
            detail: format!("type '{}'", config.kind),
        });
    }

    let class_id = content
        .get("classID")
        .ok_or_else(|| CoreError::UnsupportedRoot {
            detail: "content does not carry a classID".to_owned(),
        })?;
    Ok(make_key(class_id, &config.name))
}

// ── Case-type listing ───────────────────────────────────────────────

#[derive(Deserialize)]
struct RawCaseTypes {
    #[serde(rename = "applicationIsConstellationCompatible", default)]
    compatible: bool,
    #[serde(rename = "caseTypes", default)]
    case_types: Vec<RawCaseType>,
}

#[derive(Deserialize)]
struct RawCaseType {
    #[serde(rename = "ID")]
    id: String,
    name: String,
}

/// Parse the case-type listing response.
pub fn parse_case_types(body: &str) -> Result<Vec<CaseType>, CoreError> {
    let raw: RawCaseTypes = serde_json::from_str(body)?;
    if !raw.compatible || raw.case_types.is_empty() {
        return Err(CoreError::IncompatibleApplication);
    }

    Ok(raw
        .case_types
        .into_iter()
        .map(|ct| CaseType {
            id: ct.id,
            name: ct.name,
        })
        .collect())
}
