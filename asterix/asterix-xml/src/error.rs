//! Error type for descriptor loading.

use std::path::PathBuf;

use asterix_core::SchemaError;

/// Errors produced while reading or converting a category descriptor.
#[derive(Debug, thiserror::Error)]
pub enum XmlSchemaError {
    /// Malformed XML (syntax, attributes, escapes, mismatched tags).
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// The document ended before its root element was closed.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// The root element is not `<Category>`.
    #[error("expected <Category> root element, found <{found}>")]
    NotACategory { found: String },

    #[error("{parent} has no <{element}> element")]
    MissingElement {
        parent: String,
        element: &'static str,
    },

    #[error("<{element}> has no '{attribute}' attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// A numeric attribute could not be parsed.
    #[error("<{element}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidNumber {
        element: String,
        attribute: &'static str,
        value: String,
    },

    /// The descriptor converted, but the resulting schema is invalid.
    #[error("invalid descriptor for category {category}: {source}")]
    Schema {
        category: u8,
        #[source]
        source: SchemaError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
