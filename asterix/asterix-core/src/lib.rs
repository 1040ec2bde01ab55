//! Encoding-agnostic core types for the ASTERIX decoder.
//!
//! This crate provides the category [`Schema`] model, the decoded value
//! model ([`Record`], [`ItemValue`], [`Fields`], [`Value`]), the
//! [`SchemaProvider`] contract and the decoder options. It knows nothing
//! about descriptor documents or about the wire format.

mod error;
mod options;
mod schema;
mod value;

pub use error::{DecodeError, SchemaError};
pub use options::{DecodeOptions, Framing, IndicatorConvention};
pub use schema::{
    BitField, BitSpan, CompoundFormat, DataItem, FixedFormat, ItemFormat, MAX_FIELD_BITS,
    MAX_FIXED_LENGTH, RepetitiveFormat, Schema, SchemaProvider, SchemaRegistry, UapSlot,
    VariableFormat, format_schema,
};
pub use value::{Decoded, Fields, ItemValue, Message, Record, Value};
