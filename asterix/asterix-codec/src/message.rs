//! Message and data block decoding.

use asterix_core::{DecodeError, DecodeOptions, Decoded, Framing, Message, SchemaProvider};
use log::{debug, warn};

use crate::{cursor::Cursor, record::decode_records};

/// Octets in a data block header: category plus 16-bit length.
pub const BLOCK_HEADER_LEN: usize = 3;

/// Decodes an unframed message: one category octet followed by records up to
/// the end of `data`.
///
/// Fails with [`DecodeError::OutOfData`] on empty input and with
/// [`DecodeError::CategoryUnsupported`] when `provider` has no schema for the
/// category.
pub fn decode_message(
    data: &[u8],
    provider: &dyn SchemaProvider,
    options: &DecodeOptions,
) -> Result<Message, DecodeError> {
    let mut cursor = Cursor::from_slice(data);
    let category = cursor.read_octet()?;
    decode_body(category, &mut cursor, provider, options)
}

fn decode_body(
    category: u8,
    cursor: &mut Cursor,
    provider: &dyn SchemaProvider,
    options: &DecodeOptions,
) -> Result<Message, DecodeError> {
    let schema = provider
        .schema(category)
        .ok_or(DecodeError::CategoryUnsupported { category })?;

    let mut message = Message::new(category);
    message.records = decode_records(cursor, &schema, options);
    debug!("cat {category:03}: {} record(s)", message.records.len());
    Ok(message)
}

/// Decodes a whole input according to `options.framing`.
///
/// Never fails: unsupported categories are listed in
/// [`Decoded::unsupported`], and a malformed block header ends decoding with
/// a warning, keeping what was decoded before it.
pub fn decode_stream(data: &[u8], provider: &dyn SchemaProvider, options: &DecodeOptions) -> Decoded {
    let mut decoded = Decoded::new();

    match options.framing {
        Framing::Unframed => push_result(&mut decoded, decode_message(data, provider, options)),
        Framing::DataBlock => {
            let mut cursor = Cursor::from_slice(data);
            while !cursor.is_exhausted() {
                match read_block(&mut cursor) {
                    Ok((category, mut body)) => push_result(
                        &mut decoded,
                        decode_body(category, &mut body, provider, options),
                    ),
                    Err(e) => {
                        warn!("data block decoding stopped: {e}");
                        break;
                    }
                }
            }
        }
    }

    decoded
}

fn push_result(decoded: &mut Decoded, result: Result<Message, DecodeError>) {
    match result {
        Ok(message) => decoded.push_message(message),
        Err(DecodeError::CategoryUnsupported { category }) => {
            warn!("category {category:03} is not supported, skipped");
            decoded.push_unsupported(category);
        }
        Err(e) => debug!("no message decoded: {e}"),
    }
}

/// Reads a block header and splits the block body off `cursor`. A body
/// shorter than the declared length is decoded as far as it goes.
fn read_block(cursor: &mut Cursor) -> Result<(u8, Cursor), DecodeError> {
    let start = cursor.position();
    let category = cursor.read_octet()?;
    let declared = usize::from(cursor.read_octet()?) << 8 | usize::from(cursor.read_octet()?);

    if declared < BLOCK_HEADER_LEN {
        return Err(DecodeError::InvalidBlockLength { category, declared });
    }
    let body_len = declared - BLOCK_HEADER_LEN;
    if body_len > cursor.remaining() {
        warn!(
            "cat {category:03} block at offset {start} declares {declared} octets, {} available",
            cursor.remaining() + BLOCK_HEADER_LEN
        );
    }

    Ok((category, cursor.take(body_len)))
}
