//! Schema-driven ASTERIX decoder.
//!
//! ```no_run
//! use asterix::AsterixDecoder;
//!
//! let decoder = AsterixDecoder::builder()
//!     .with_schema_dir("config")
//!     .build()?;
//! let decoded = decoder.decode_hex("30 80 19 C9")?;
//! for (category, records) in &decoded.records {
//!     println!("cat {category:03}: {} record(s)", records.len());
//! }
//! # Ok::<(), asterix::AsterixError>(())
//! ```

mod decoder;
mod error;
mod hex_input;

pub use asterix_codec as codec;
pub use asterix_core as core;
#[cfg(feature = "xml")]
pub use asterix_xml as xml;
pub use decoder::{AsterixDecoder, AsterixDecoderBuilder};
pub use error::AsterixError;
pub use hex_input::parse_hex;
