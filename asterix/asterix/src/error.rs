//! Error type for the decoder facade.

/// Errors produced by [`AsterixDecoder`](crate::AsterixDecoder) and its
/// builder.
#[derive(Debug, thiserror::Error)]
pub enum AsterixError {
    /// I/O error while opening or memory-mapping an input file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The hex input contains a non-hex character.
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A descriptor directory could not be read.
    #[cfg(feature = "xml")]
    #[error(transparent)]
    Schema(#[from] asterix_xml::XmlSchemaError),
}
