//! Reference-aware traversal of the component graph.
//!
//! Three walks share one structural pattern: visit the owned child list,
//! and for `Reference` components that are not broken, additionally
//! dereference through the component map by key and recurse into the
//! target — a reference is a non-owning edge into the same graph, not a
//! subtree. Broken references are safe no-op targets: a diagnostic marker
//! is rendered and the edge is never followed.
//!
//! The third walk, selection propagation, lives on
//! [`Resources::select_component`](crate::Resources::select_component).

use tracing::warn;

use crate::model::{Component, ComponentKey, ComponentKind, Field};
use crate::resources::{ComponentMap, FieldMap, Resources};

// ── Bounding regions ────────────────────────────────────────────────

/// Axis-aligned bounding region in the adapter's coordinate space, used to
/// draw debug outlines around a component and everything it reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    pub const EMPTY: Self = Self {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };

    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Smallest region covering both; empty regions contribute nothing.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            other
        } else if other.is_empty() {
            self
        } else {
            Self {
                x0: self.x0.min(other.x0),
                y0: self.y0.min(other.y0),
                x1: self.x1.max(other.x1),
                y1: self.y1.max(other.y1),
            }
        }
    }
}

// ── Presentation adapter seam ───────────────────────────────────────

/// What the render walk asks of the presentation adapter.
///
/// The adapter draws widgets and reports their bounds; it may also report
/// that a component's click-to-select affordance was hit this pass. The
/// adapter never constructs or deletes graph nodes.
pub trait RenderSink {
    /// Draw the widget for an editable field component. `editable` is the
    /// computed editability; the adapter draws a read-only label otherwise.
    /// `selected` is the arena state for the component's key, so a node
    /// reached through any reference path highlights consistently.
    fn field(&mut self, component: &Component, field: &Field, editable: bool, selected: bool)
    -> Bounds;

    /// Draw a structural or diagnostic marker for a non-field component.
    /// Return [`Bounds::EMPTY`] to draw nothing.
    fn marker(&mut self, component: &Component, selected: bool) -> Bounds;

    /// Whether this component's select affordance was clicked this pass.
    fn clicked(&mut self, component: &Component) -> bool;
}

/// True unless the component or its bound field forbids editing.
pub fn is_editable(component: &Component, field: &Field) -> bool {
    !(component.is_readonly || component.is_disabled || field.is_special || field.is_class_key)
}

/// Selection is authoritative on arena entries; owned child instances
/// report the arena state for their key.
fn arena_selected(component: &Component, components: &ComponentMap) -> bool {
    components
        .get(&component.key)
        .map_or(component.is_selected, |entry| entry.is_selected)
}

// ── Render traversal ────────────────────────────────────────────────

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// Union of the regions of the root and every visited descendant,
    /// dereferenced targets included.
    pub bounds: Bounds,
    /// The last component whose select affordance was hit, if any. The
    /// caller applies it via `Resources::select_component`.
    pub clicked: Option<ComponentKey>,
}

/// Run a render pass from the arena entry at `root`.
///
/// Returns `None` when `root` is not in the arena. Fields revealed as
/// editable are marked dirty, which is what later gates their inclusion in
/// the submission payload.
pub fn render_pass(
    root: &ComponentKey,
    resources: &mut Resources,
    sink: &mut dyn RenderSink,
) -> Option<RenderOutcome> {
    let components = &resources.components;
    let fields = &mut resources.fields;
    let root = components.get(root)?;

    let mut clicked = None;
    let bounds = render_component(root, components, fields, sink, &mut clicked);
    Some(RenderOutcome { bounds, clicked })
}

/// Recursively render a component, returning the bounding region of it and
/// everything it reaches.
pub fn render_component(
    component: &Component,
    components: &ComponentMap,
    fields: &mut FieldMap,
    sink: &mut dyn RenderSink,
    clicked: &mut Option<ComponentKey>,
) -> Bounds {
    let selected = arena_selected(component, components);

    match component.kind {
        ComponentKind::Reference => {
            if component.is_broken {
                // Diagnostic leaf; the edge is never followed.
                return sink.marker(component, selected);
            }

            let bounds = sink.marker(component, selected);
            match components.get(&component.key) {
                Some(target) => {
                    bounds.union(render_component(target, components, fields, sink, clicked))
                }
                None => {
                    warn!(key = %component.key, "dangling reference");
                    bounds
                }
            }
        }
        ComponentKind::Currency | ComponentKind::TextArea | ComponentKind::TextInput => {
            let Some(field) = fields.get_mut(&component.key) else {
                warn!(key = %component.key, "editable component has no bound field");
                return sink.marker(component, selected);
            };

            let editable = is_editable(component, field);
            if editable {
                // First interactive reveal makes the field submittable.
                field.is_dirty = true;
            }

            let bounds = sink.field(component, field, editable, selected);
            if sink.clicked(component) {
                *clicked = Some(component.key.clone());
            }
            bounds
        }
        _ => {
            let mut bounds = sink.marker(component, selected);

            // A view with an unsupported template skips its children
            // entirely. No diagnostic is recorded for this case.
            let process_children = component.kind != ComponentKind::View
                || !matches!(
                    component.ref_kind,
                    ComponentKind::Unspecified | ComponentKind::Unknown
                );

            if process_children {
                for child in &component.children {
                    bounds =
                        bounds.union(render_component(child, components, fields, sink, clicked));
                }
            }
            bounds
        }
    }
}

// ── Debug-dump traversal ────────────────────────────────────────────

/// One line of the hierarchical debug outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    pub depth: usize,
    pub key: ComponentKey,
    pub summary: String,
    pub is_selected: bool,
    pub is_broken: bool,
    pub broken_reason: Option<String>,
}

/// Emit the hierarchical summary tree for a component, mirroring the
/// render walk. The adapter uses each node's `key` to make one component
/// the sole inspected/selected component on click.
pub fn debug_outline(
    component: &Component,
    components: &ComponentMap,
    depth: usize,
    out: &mut Vec<OutlineNode>,
) {
    let is_selected = arena_selected(component, components);

    out.push(OutlineNode {
        depth,
        key: component.key.clone(),
        summary: component.summary.clone(),
        is_selected,
        is_broken: component.is_broken,
        broken_reason: component.broken_reason.clone(),
    });

    if component.is_broken {
        // Marker only; never dereference a broken reference.
    } else if component.kind == ComponentKind::Reference {
        if let Some(target) = components.get(&component.key) {
            debug_outline(target, components, depth + 1, out);
        }
    }

    for child in &component.children {
        debug_outline(child, components, depth + 1, out);
    }
}
