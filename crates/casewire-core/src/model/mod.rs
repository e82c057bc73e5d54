//! Value types for the component graph: no behavior beyond identity,
//! display, and small predicates.

pub mod case;
pub mod component;
pub mod field;

pub use case::{ActionInfo, Assignment, CaseInfo, CaseType, ContentMap};
pub use component::{Component, ComponentKey, ComponentKind};
pub use field::Field;
