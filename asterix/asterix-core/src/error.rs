//! Error types for schema construction and message decoding.

/// Error returned while decoding a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// No schema is registered for the leading category octet.
    #[error("category {category} is not supported")]
    CategoryUnsupported { category: u8 },

    /// An octet was required at `offset` but the buffer was already consumed.
    #[error("out of data at offset {offset}")]
    OutOfData { offset: usize },

    /// A data block header declares a length that cannot frame a block.
    #[error("data block for category {category} declares invalid length {declared}")]
    InvalidBlockLength { category: u8, declared: usize },
}

/// Error returned by [`Schema::new`](crate::Schema::new) when a format
/// descriptor is structurally invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A fixed block declares zero octets.
    #[error("data item '{item}': fixed block has zero length")]
    ZeroLengthFixed { item: String },

    /// A fixed block is longer than a data block can carry.
    #[error("data item '{item}': fixed block of {length} octets is too long (at most 65535)")]
    FixedTooLong { item: String, length: usize },

    /// A bit position lies outside the byte span of its fixed block.
    #[error("data item '{item}': field '{field}' addresses bit {bit} outside a {length}-octet block")]
    BitOutOfRange {
        item: String,
        field: String,
        bit: u16,
        length: usize,
    },

    /// A bit range is wider than the widest supported container.
    #[error("data item '{item}': field '{field}' is {width} bits wide (at most 64 supported)")]
    FieldTooWide {
        item: String,
        field: String,
        width: u16,
    },

    #[error("data item '{item}': field has an empty name")]
    EmptyFieldName { item: String },

    #[error("data item '{item}': field '{field}' has a non-finite scale")]
    InvalidScale { item: String, field: String },

    #[error("data item '{item}': variable format has no blocks")]
    EmptyVariable { item: String },

    #[error("data item '{item}': compound format has no subfields")]
    EmptyCompound { item: String },

    #[error("data item '{item}' declares no format")]
    EmptyDataItem { item: String },

    #[error("data item '{item}' is defined more than once")]
    DuplicateItem { item: String },
}
