//! FSPEC-driven record decoding.

use asterix_core::{DecodeError, DecodeOptions, ItemValue, Record, Schema, UapSlot};
use log::{debug, trace};

use crate::{cursor::Cursor, presence::PresenceMask, shape::decode_format};

/// Decodes one record at the cursor position.
///
/// Returns [`DecodeError::OutOfData`] only when no FSPEC octet is left. A
/// FSPEC cut short by the end of the buffer still yields a record built from
/// the presence bits read so far. Field reads past the end are zero-filled
/// and never fail.
pub fn decode_record(
    cursor: &mut Cursor,
    schema: &Schema,
    options: &DecodeOptions,
) -> Result<Record, DecodeError> {
    let start = cursor.position();
    let fspec = PresenceMask::read(cursor);
    if fspec.octets().is_empty() {
        return Err(DecodeError::OutOfData { offset: start });
    }
    if fspec.is_truncated() {
        debug!(
            "cat {:03}: fspec at offset {start} ends with the buffer",
            schema.category()
        );
    }
    trace!(
        "cat {:03} record at offset {start}, fspec {:02x?}",
        schema.category(),
        fspec.octets()
    );

    let mut record = Record::new();
    for position in fspec.presence_bits() {
        let id = match schema.slot(position) {
            Some(UapSlot::Item(id)) => id,
            Some(UapSlot::Spare) => continue,
            None => {
                trace!("fspec bit {position} lies beyond the uap");
                continue;
            }
        };
        let Some(item) = schema.item_at(position) else {
            debug!("cat {:03}: no definition for data item {id}, skipped", schema.category());
            continue;
        };

        let mut formats = item.formats.iter();
        let Some(first) = formats.next() else {
            continue;
        };
        let mut value: ItemValue = decode_format(cursor, first, options);
        for format in formats {
            value.merge(decode_format(cursor, format, options));
        }
        record.insert(item.id.as_str(), value);
    }

    Ok(record)
}

/// Decodes records until the cursor is exhausted or a record runs out of
/// data.
pub fn decode_records(cursor: &mut Cursor, schema: &Schema, options: &DecodeOptions) -> Vec<Record> {
    let mut records = Vec::new();
    while !cursor.is_exhausted() {
        match decode_record(cursor, schema, options) {
            Ok(record) => records.push(record),
            Err(e) => {
                trace!("cat {:03}: record production ended: {e}", schema.category());
                break;
            }
        }
    }
    records
}
