//! Declarative descriptor tables for record types.
//!
//! A record's table is either written by hand or generated by
//! `#[derive(Record)]`; the metadata cache only ever reads it.

pub mod annotation;
pub mod field;
pub mod record;

pub use annotation::{Annotation, AnnotationValue, Annotations};
pub use field::{FieldKind, FieldModel, GetFn, SetFn};
pub use record::{FilterBinding, Record, RecordModel};
