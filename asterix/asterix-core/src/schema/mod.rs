//! In-memory category schema: UAP plus data item layouts.

mod format;
mod registry;
mod types;

pub use format::format_schema;
pub use registry::{SchemaProvider, SchemaRegistry};
pub use types::{
    BitField, BitSpan, CompoundFormat, DataItem, FixedFormat, ItemFormat, MAX_FIELD_BITS,
    MAX_FIXED_LENGTH, RepetitiveFormat, Schema, UapSlot, VariableFormat,
};
