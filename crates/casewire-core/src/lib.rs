//! Component graph engine for server-described case forms.
//!
//! A remote case service answers every request with a nested JSON document
//! describing a tree of typed components (references, regions, views, input
//! fields). This crate turns that description into a navigable, validated,
//! stateful object graph:
//!
//! - **[`model`]** — value types: [`Component`], [`ComponentKind`],
//!   [`ComponentKey`], [`Field`], and the case/assignment metadata.
//! - **[`resolve`]** — pure name/label resolution against the case content
//!   namespace and the field-metadata namespace.
//! - **[`build`]** — recursive construction of typed components from untyped
//!   JSON, publishing every finalized node into the shared [`Resources`]
//!   arena.
//! - **[`traverse`]** — render and debug-outline walks that follow owned
//!   child edges *and* non-owning reference edges through the arena, plus
//!   the global single-selection operation.
//! - **[`validate`]** — the required-field pass run before submission.
//! - **[`ingest`]** — full service-response parsing: case info, field
//!   metadata, view table, and root component resolution.
//!
//! Reference components never own their targets: the same referenced
//! component may be reached from multiple reference sites, so targets live
//! in the arena and are reached by [`ComponentKey`] lookup.

pub mod build;
pub mod error;
pub mod ingest;
pub mod model;
pub mod resolve;
pub mod resources;
pub mod traverse;
pub mod validate;

pub use build::build_component;
pub use error::CoreError;
pub use ingest::{CaseSnapshot, parse_case_types};
pub use model::{
    ActionInfo, Assignment, CaseInfo, CaseType, Component, ComponentKey, ComponentKind,
    ContentMap, Field,
};
pub use resources::{ComponentMap, FieldMap, Resources};
pub use traverse::{Bounds, OutlineNode, RenderOutcome, RenderSink};
