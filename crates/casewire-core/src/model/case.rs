// ── Case metadata ──
//
// Everything the service reports about an open case besides the UI
// description itself: identity, assignments and their actions, and the
// content namespace that name resolution reads from.

use indexmap::IndexMap;

/// Read-only lookup from content name to resolved string value.
///
/// Supplied by the service response; consulted, never mutated, by the
/// resolver. Scalar JSON values are coerced to strings on ingest.
pub type ContentMap = IndexMap<String, String>;

/// A case type the application can instantiate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseType {
    pub id: String,
    pub name: String,
}

/// A flow action available on an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInfo {
    pub id: String,
    pub name: String,
    pub action_type: String,
}

/// An open assignment on a case, with the actions it offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    pub id: String,
    pub name: String,
    pub can_perform: bool,
    pub actions: IndexMap<String, ActionInfo>,
}

/// Case identity and lifecycle metadata from the service response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseInfo {
    pub id: String,
    pub business_id: String,
    pub case_type: CaseType,
    pub create_time: String,
    pub created_by: String,
    pub last_update_time: String,
    pub last_updated_by: String,
    pub name: String,
    pub owner: String,
    pub status: String,

    pub assignments: IndexMap<String, Assignment>,
    pub content: ContentMap,
}
