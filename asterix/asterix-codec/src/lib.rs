//! Wire-level ASTERIX decoding driven by an [`asterix_core::Schema`].
//!
//! Records are decoded by walking the FSPEC presence chain, resolving each
//! set bit through the category UAP and decoding the data item's formats at
//! the cursor. Reads past the end of the input are zero-filled, so malformed
//! input degrades into padded values or fewer records, never a panic.

pub mod bitfield;
mod cursor;
mod message;
mod presence;
mod record;
pub mod shape;

pub use cursor::Cursor;
pub use message::{BLOCK_HEADER_LEN, decode_message, decode_stream};
pub use presence::PresenceMask;
pub use record::{decode_record, decode_records};
