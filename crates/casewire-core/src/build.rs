//! Graph builder — recursive construction of typed components from the
//! untyped JSON form description.
//!
//! This is where every component kind is explicitly accounted for: the
//! exhaustive match below decides per kind which attributes to extract and
//! how names resolve. Building has two side effects on [`Resources`]:
//! every finalized node is published into the component map (so reference
//! components can later be dereferenced by key), and editable nodes bind a
//! [`Field`] entry at the same key, creating one if the metadata table did
//! not supply it.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Component, ComponentKind, Field};
use crate::resolve::{coerce_bool, make_key, resolve_label, resolve_name};
use crate::resources::Resources;

/// Recursively build a component and its children from document JSON.
///
/// `parent_class_id` is the namespace the component is evaluated in unless
/// the component declares its own (`classID` on views, `@CLASS` contexts on
/// references). Children inherit the *current* component's resolved class,
/// not the caller's, so nested components pick up context changes.
///
/// Fatal construction failures (empty name/class, unspecified kind)
/// propagate up and reject the whole subtree. Known-but-unsupported
/// configurations degrade instead: the node is marked broken and carries a
/// diagnostic.
pub fn build_component(
    json: &Value,
    content: &crate::model::ContentMap,
    resources: &mut Resources,
    parent_class_id: &str,
) -> Result<Component, CoreError> {
    let mut component = Component {
        json: serde_json::to_string_pretty(json)?,
        ..Component::default()
    };

    let tag = attr_str(json, "type")?;
    component.kind = ComponentKind::from_tag(tag);

    match component.kind {
        ComponentKind::Unknown => {
            component.class_id = parent_class_id.to_owned();
            // The literal tag, for diagnostics only.
            component.name = tag.to_owned();
        }
        ComponentKind::Reference => {
            component.class_id = parent_class_id.to_owned();

            let config = attr(json, "config")?;
            let raw_name = attr_str(config, "config.name")?;
            component.name = resolve_name(raw_name, content, &component.class_id, false)?;
            component.ref_kind = config
                .get("type")
                .and_then(Value::as_str)
                .map_or(ComponentKind::Unspecified, ComponentKind::from_tag);

            // References might specify a context. `@CLASS <name>` switches
            // the namespace; any other form marks the reference broken and
            // the edge is never followed.
            if let Some(context) = config.get("context").and_then(Value::as_str) {
                if let Some(class_id) = context.strip_prefix("@CLASS ") {
                    component.class_id = class_id.to_owned();
                } else {
                    warn!(context, "unsupported reference context");
                    component.is_broken = true;
                    component.broken_reason = Some(format!("Unsupported context: {context}"));
                }
            }
        }
        ComponentKind::Region => {
            component.class_id = parent_class_id.to_owned();
            let raw_name = attr_str(json, "name")?;
            component.name = resolve_name(raw_name, content, &component.class_id, false)?;
        }
        ComponentKind::View => {
            // Views carry their own namespace rather than inheriting one.
            component.class_id = attr_str(json, "classID")?.to_owned();
            let raw_name = attr_str(json, "name")?;
            component.name = resolve_name(raw_name, content, &component.class_id, false)?;

            // Views usually, but not always, specify a template. A view
            // without a recognized template is treated downstream as an
            // unsupported container, not an error here.
            if let Some(template) = json
                .get("config")
                .and_then(|config| config.get("template"))
                .and_then(Value::as_str)
            {
                component.ref_kind = ComponentKind::from_tag(template);
            }
        }
        ComponentKind::Currency | ComponentKind::TextArea | ComponentKind::TextInput => {
            component.class_id = parent_class_id.to_owned();

            let config = attr(json, "config")?;
            let raw_value = attr_str(config, "config.value")?;
            component.name = resolve_name(raw_value, content, &component.class_id, true)?;
            let raw_label = attr_str(config, "config.label")?;
            component.label = resolve_label(raw_label, &resources.fields, &component.class_id)?;

            if let Some(flag) = config.get("disabled") {
                component.is_disabled = coerce_bool(flag);
            }
            if let Some(flag) = config.get("readOnly") {
                component.is_readonly = coerce_bool(flag);
            }
            if let Some(flag) = config.get("required") {
                component.is_required = coerce_bool(flag);
            }
        }
        // Structural tags with nothing to extract.
        ComponentKind::DefaultForm | ComponentKind::Unspecified => {}
    }

    // Finalize. A component the builder cannot safely represent rejects the
    // whole subtree.
    if component.name.is_empty()
        || component.class_id.is_empty()
        || component.kind == ComponentKind::Unspecified
    {
        return Err(CoreError::MalformedComponent {
            json: component.json,
        });
    }
    component.key = make_key(&component.class_id, &component.name);
    component.summary = match component.kind {
        ComponentKind::Reference | ComponentKind::View => {
            Component::summary_with_ref(component.kind, &component.name, component.ref_kind)
        }
        kind if kind.is_field() => Component::summary_of(kind, &component.label),
        kind => Component::summary_of(kind, &component.name),
    };

    // Editable components bind a field entry at the same key; the metadata
    // table normally supplies it, but a plain form document may not.
    if component.kind.is_field() {
        resources
            .fields
            .entry(component.key.clone())
            .or_insert_with(|| Field {
                id: component.name.clone(),
                class_id: component.class_id.clone(),
                label: component.label.clone(),
                field_type: component.kind.to_string(),
                ..Field::default()
            });
    }

    if let Some(children) = json.get("children").and_then(Value::as_array) {
        for child in children {
            component
                .children
                .push(build_component(child, content, resources, &component.class_id)?);
        }
    }

    debug!(key = %component.key, kind = %component.kind, "component built");

    // Publish into the arena so reference components can dereference this
    // node by key. References themselves stay out: their key names the
    // *target*, and publishing the reference site would clobber it.
    if component.kind != ComponentKind::Reference {
        resources
            .components
            .insert(component.key.clone(), component.clone());
    }

    Ok(component)
}

fn attr<'a>(json: &'a Value, attribute: &str) -> Result<&'a Value, CoreError> {
    json.get(attribute.rsplit('.').next().unwrap_or(attribute))
        .ok_or_else(|| CoreError::MissingAttribute {
            attribute: attribute.to_owned(),
        })
}

fn attr_str<'a>(json: &'a Value, attribute: &str) -> Result<&'a str, CoreError> {
    attr(json, attribute)?
        .as_str()
        .ok_or_else(|| CoreError::MissingAttribute {
            attribute: attribute.to_owned(),
        })
}
