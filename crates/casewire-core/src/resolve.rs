//! Name/label resolution — pure functions, no side effects.
//!
//! The document refers to case data and field metadata through small
//! expression prefixes:
//!
//! - `"@P .Name"` — a property reference, resolved against the case
//!   [`ContentMap`] (or taken as the bare property name for field bindings).
//! - `"@L Text"` — a literal label.
//! - `"@FL .Name"` — the label of the field metadata entry for `.Name`.
//!
//! Anything else passes through verbatim where a literal is allowed.

use serde_json::Value;

use crate::error::CoreError;
use crate::model::{ComponentKey, ContentMap};
use crate::resources::FieldMap;

/// Derive the composite identity used everywhere as a map key.
///
/// Deterministic and order-dependent: `make_key("Class", "Name")` is
/// `"Class.Name"`.
pub fn make_key(class_id: &str, name: &str) -> ComponentKey {
    ComponentKey::new(class_id, name)
}

/// Resolve a name expression against the content namespace.
///
/// For structural names (`bind_required == false`), `"@P .Name"`
/// dereferences through `content` (strictly — a missing binding is an
/// error) and any other string is returned verbatim.
///
/// For field bindings (`bind_required == true`), the expression must be a
/// property reference and the bare property name is returned: a field's
/// data lives in the field map, not the content map, so there is nothing to
/// dereference — but a literal that binds to no real field expression is
/// rejected.
pub fn resolve_name(
    expr: &str,
    content: &ContentMap,
    class_id: &str,
    bind_required: bool,
) -> Result<String, CoreError> {
    if let Some(rest) = expr.strip_prefix("@P ") {
        let property = rest.strip_prefix('.').unwrap_or(rest);
        if bind_required {
            Ok(property.to_owned())
        } else {
            content_value(content, class_id, property, true)
        }
    } else if bind_required {
        Err(CoreError::UnresolvedName {
            name: expr.to_owned(),
            reason: "field names must be property references".to_owned(),
        })
    } else {
        Ok(expr.to_owned())
    }
}

/// Resolve a label expression against the field-metadata namespace.
pub fn resolve_label(expr: &str, fields: &FieldMap, class_id: &str) -> Result<String, CoreError> {
    if let Some(text) = expr.strip_prefix("@L ") {
        return Ok(text.to_owned());
    }

    if let Some(rest) = expr.strip_prefix("@FL ") {
        let field_id = rest.strip_prefix('.').unwrap_or(rest);
        let key = make_key(class_id, field_id);
        return fields
            .get(&key)
            .map(|field| field.label.clone())
            .ok_or(CoreError::MissingField { key });
    }

    Ok(expr.to_owned())
}

/// Look up `name` in the content namespace scoped by `class_id`.
///
/// The content map carries its own `classID` entry; a lookup against a
/// different class resolves nothing. In strict mode every miss is an error,
/// otherwise the empty string is returned.
pub fn content_value(
    content: &ContentMap,
    class_id: &str,
    name: &str,
    strict: bool,
) -> Result<String, CoreError> {
    let miss = |reason: String| {
        if strict {
            Err(CoreError::UnresolvedName {
                name: name.to_owned(),
                reason,
            })
        } else {
            Ok(String::new())
        }
    };

    match content.get("classID") {
        Some(content_class) if content_class == class_id => match content.get(name) {
            Some(value) => Ok(value.clone()),
            None => miss("name not found in content".to_owned()),
        },
        Some(content_class) => miss(format!(
            "content is scoped to class '{content_class}', not '{class_id}'"
        )),
        None => miss("content does not carry a classID".to_owned()),
    }
}

/// Robust boolean extraction: accepts a JSON boolean or the string "true".
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Coerce a scalar JSON value to its string form; `None` for non-scalars.
pub fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
