//! XML category descriptor loader for the ASTERIX decoder.
//!
//! Reads the descriptor format used by the Eurocontrol-style
//! `asterix_catCCC_M_N.xml` files into an [`asterix_core::Schema`]:
//!
//! ```text
//! <Category id ver>
//!   <DataItem id>
//!     <DataItemName/>
//!     <DataItemFormat> Fixed | Variable | Repetitive | Compound ... </DataItemFormat>
//!   </DataItem>
//!   <UAP> <UAPItem frn>id | - </UAPItem> ... </UAP>
//! </Category>
//! ```
//!
//! Elements that carry no layout information (`DataItemDefinition`,
//! `BitsValue`, `BitsName`, ...) are ignored.

mod convert;
mod directory;
mod error;
mod tree;

use std::{fs, path::Path};

use asterix_core::Schema;
use log::debug;

pub use directory::{DescriptorFile, SchemaDirectory, parse_file_name};
pub use error::XmlSchemaError;

/// Parses one category descriptor document.
pub fn parse_category(xml: &str) -> Result<Schema, XmlSchemaError> {
    let root = tree::parse_document(xml)?;
    convert::convert_category(&root)
}

/// Reads and parses the descriptor at `path`.
pub fn load_category(path: impl AsRef<Path>) -> Result<Schema, XmlSchemaError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| XmlSchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = parse_category(&xml)?;
    debug!(
        "loaded category {} ({} items) from {}",
        schema.category(),
        schema.items().len(),
        path.display()
    );
    Ok(schema)
}
