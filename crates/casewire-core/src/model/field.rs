// ── Field model ──

/// Editable value bound to one or more components via the composite key.
///
/// Fields are owned by the field map in [`crate::Resources`] and looked up,
/// never copied, by the components that bind to them. `data` is what the
/// user edits; `is_dirty` is set the first time the field becomes
/// interactively editable in a render pass and gates which values are
/// collected into a submission payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub id: String,
    pub class_id: String,
    pub label: String,
    pub field_type: String,
    pub data: String,
    /// Pretty-printed metadata payload, kept for inspection.
    pub json: String,

    /// Special (service-managed) fields are never editable or submitted.
    pub is_special: bool,
    /// Class-key fields identify the case and are likewise untouchable.
    pub is_class_key: bool,
    pub is_dirty: bool,
}
