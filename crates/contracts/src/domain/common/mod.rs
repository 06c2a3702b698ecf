//! Common types shared by the HR aggregates

pub mod aggregate_id;
pub mod reference;

// Re-exports
pub use aggregate_id::AggregateId;
pub use reference::{json_to_id, parse_reference_list, RefField, ReferenceEntity, ReferenceKind};
