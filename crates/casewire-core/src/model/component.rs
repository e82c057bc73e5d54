// ── Component model ──
//
// ComponentKind, ComponentKey, and the Component node itself. A Component
// carries no behavior: the builder fills it in, the traversal and
// validation passes read it.

use std::fmt;

/// Closed set of recognized component kinds.
///
/// The document's `type` tag is matched case-insensitively; any string
/// outside this set maps to [`ComponentKind::Unknown`] so an unsupported
/// component degrades to a diagnostic marker instead of a crash.
/// `Unspecified` is the pre-construction default and is never valid on a
/// finalized component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum ComponentKind {
    #[default]
    Unspecified,
    Unknown,

    // Infrastructure:
    Reference,
    Region,
    View,

    // Fields:
    Currency,
    TextArea,
    TextInput,

    // Templates:
    DefaultForm,
}

impl ComponentKind {
    /// Map a document `type` tag to a kind. Unrecognized tags (including a
    /// literal "Unspecified") become `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "reference" => Self::Reference,
            "region" => Self::Region,
            "view" => Self::View,
            "currency" => Self::Currency,
            "textarea" => Self::TextArea,
            "textinput" => Self::TextInput,
            "defaultform" => Self::DefaultForm,
            _ => Self::Unknown,
        }
    }

    /// True for the editable field kinds.
    pub fn is_field(self) -> bool {
        matches!(self, Self::Currency | Self::TextArea | Self::TextInput)
    }
}

/// Composite identity derived from a class namespace and a name, such as
/// `"The-Class-ID.TheName"`.
///
/// Shared by the component map and the field map: two components with the
/// same class and name in the source document are intentionally the same
/// graph node. This is how reference indirection and shared field bindings
/// work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentKey(String);

impl ComponentKey {
    /// Deterministic, order-dependent composition of class id and name.
    pub fn new(class_id: &str, name: &str) -> Self {
        Self(format!("{class_id}.{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the form description graph.
///
/// Finalized components always have a non-empty `name`, a non-empty
/// `class_id`, and a kind other than `Unspecified`; the builder rejects the
/// whole subtree otherwise. A `Reference` component never owns its target —
/// the target lives in the [`crate::Resources`] arena and is reached by
/// `key` lookup.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: String,
    pub class_id: String,
    /// Identifies this node, or the referenced node for references/fields.
    pub key: ComponentKey,

    pub label: String,
    /// Pretty-printed original payload, kept for inspection.
    pub json: String,
    /// Human-readable summary: `Kind: Name` or `Kind: Name [RefKind]`.
    pub summary: String,
    /// Diagnostic for a known-but-unsupported configuration.
    pub broken_reason: Option<String>,

    pub is_readonly: bool,
    pub is_required: bool,
    pub is_disabled: bool,
    pub is_broken: bool,
    /// Authoritative only on arena entries: owned child instances consult
    /// the arena by `key` (see `Resources::select_component`).
    pub is_selected: bool,

    /// Referenced component kind, or the template kind for views.
    pub ref_kind: ComponentKind,
    pub children: Vec<Component>,
}

impl Component {
    /// Summary without a referenced kind.
    pub(crate) fn summary_of(kind: ComponentKind, name: &str) -> String {
        format!("{kind}: {name}")
    }

    /// Summary including the referenced kind (references and views).
    pub(crate) fn summary_with_ref(kind: ComponentKind, name: &str, ref_kind: ComponentKind) -> String {
        format!("{kind}: {name} [{ref_kind}]")
    }
}
