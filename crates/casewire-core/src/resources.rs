//! Case-scoped ownership container for the component and field maps.
//!
//! `Resources` is the arena the whole graph lives in: the builder publishes
//! every finalized component here, references dereference through it, and
//! the presentation adapter edits field data through it. It spans the life
//! of one opened case/assignment/action and is rebuilt on navigation.

use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{Component, ComponentKey, Field};

pub type ComponentMap = indexmap::IndexMap<ComponentKey, Component>;
pub type FieldMap = indexmap::IndexMap<ComponentKey, Field>;

/// Shared ownership of the component and field maps for one open case.
#[derive(Debug, Default)]
pub struct Resources {
    pub components: ComponentMap,
    pub fields: FieldMap,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(&self, key: &ComponentKey) -> Option<&Component> {
        self.components.get(key)
    }

    pub fn field(&self, key: &ComponentKey) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Mutable field access for the presentation adapter, which may set
    /// `data` and `is_dirty` but never constructs or deletes graph nodes.
    pub fn field_mut(&mut self, key: &ComponentKey) -> Option<&mut Field> {
        self.fields.get_mut(key)
    }

    /// Make the component at `key` the sole selected component.
    ///
    /// Every component reachable from the map is deselected first: the full
    /// map sweep recurses owned children, and reference targets are
    /// themselves arena entries, so the sweep covers every reference path
    /// as well. Exactly one entry is then flagged. Returns `false` (with
    /// nothing selected) when `key` is not in the arena.
    pub fn select_component(&mut self, key: &ComponentKey) -> bool {
        for component in self.components.values_mut() {
            clear_selection(component);
        }

        match self.components.get_mut(key) {
            Some(component) => {
                debug!(key = %key, "component selected");
                component.is_selected = true;
                true
            }
            None => false,
        }
    }

    /// Whether the arena entry at `key` is the selected component.
    ///
    /// Traversal consults this for owned child instances too, so a node
    /// reached via two distinct reference paths reports the same state from
    /// both.
    pub fn is_selected(&self, key: &ComponentKey) -> bool {
        self.components.get(key).is_some_and(|c| c.is_selected)
    }

    /// Collect edited field data for submission: every dirty field that is
    /// neither special nor a class key, as `{field id: data}`. `None` when
    /// nothing was touched.
    pub fn dirty_content(&self) -> Option<Map<String, Value>> {
        let mut content = Map::new();
        for field in self.fields.values() {
            if field.is_special || field.is_class_key {
                continue;
            }
            if field.is_dirty {
                content.insert(field.id.clone(), Value::String(field.data.clone()));
            }
        }

        if content.is_empty() { None } else { Some(content) }
    }
}

/// Recursively clear selection on a component and its owned children.
///
/// Reference edges are deliberately not followed here: their targets are
/// arena entries and the caller sweeps the whole arena.
fn clear_selection(component: &mut Component) {
    component.is_selected = false;
    for child in &mut component.children {
        clear_selection(child);
    }
}
