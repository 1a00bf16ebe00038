//! Customer domain - the record a churn prediction is made for

mod entity;
mod field;

pub use entity::CustomerRecord;
pub use field::{CustomerField, FieldKind, FieldValue};
