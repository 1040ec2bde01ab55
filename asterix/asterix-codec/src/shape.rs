//! Decoders for the four data item shapes.
//!
//! Shapes never fail: reads past the end of the buffer are zero-filled and
//! indicator chains stop at the end of data.

use asterix_core::{
    CompoundFormat, DecodeOptions, Fields, FixedFormat, IndicatorConvention, ItemFormat,
    ItemValue, RepetitiveFormat, Value, VariableFormat,
};
use log::trace;

use crate::{bitfield::extract, cursor::Cursor, presence::PresenceMask};

const FX: &str = "FX";

/// Decodes one format at the cursor position.
pub fn decode_format(cursor: &mut Cursor, format: &ItemFormat, options: &DecodeOptions) -> ItemValue {
    match format {
        ItemFormat::Fixed(fixed) => ItemValue::Fields(decode_fixed(cursor, fixed)),
        ItemFormat::Variable(variable) => {
            let (fields, len) = decode_variable(cursor, variable);
            ItemValue::Variable { fields, len }
        }
        ItemFormat::Repetitive(rep) => ItemValue::List(decode_repetitive(cursor, rep)),
        ItemFormat::Compound(compound) => {
            ItemValue::Fields(decode_compound(cursor, compound, options))
        }
    }
}

pub fn decode_fixed(cursor: &mut Cursor, fixed: &FixedFormat) -> Fields {
    let block = cursor.read_padded(fixed.length);
    fixed
        .fields
        .iter()
        .map(|field| (field.name.as_str(), extract(&block, field)))
        .collect()
}

/// Decodes blocks until one ends with `FX = 0`. Returns the merged fields and
/// the number of octets taken by every processed block.
pub fn decode_variable(cursor: &mut Cursor, variable: &VariableFormat) -> (Fields, usize) {
    let mut fields = Fields::new();
    let mut len = 0;

    for block in &variable.blocks {
        let decoded = decode_fixed(cursor, block);
        len += block.length;
        let last = decoded.get(FX).is_some_and(Value::is_zero);
        fields.merge(decoded);
        if last {
            break;
        }
    }

    (fields, len)
}

/// Decodes a repetition count followed by that many elements, bounded by the
/// number of elements the remaining octets can start.
pub fn decode_repetitive(cursor: &mut Cursor, rep: &RepetitiveFormat) -> Vec<Fields> {
    let Ok(count) = cursor.read_octet() else {
        return Vec::new();
    };
    let startable = cursor.remaining().div_ceil(rep.element.length.max(1));
    let count = usize::from(count).min(startable);
    trace!("repetitive: {count} element(s) of {} octet(s)", rep.element.length);

    (0..count)
        .map(|_| decode_fixed(cursor, &rep.element))
        .collect()
}

pub fn decode_compound(
    cursor: &mut Cursor,
    compound: &CompoundFormat,
    options: &DecodeOptions,
) -> Fields {
    let mask = PresenceMask::read(cursor);
    let mut fields = Fields::new();

    for (index, subfield) in compound.subfields.iter().enumerate() {
        if !subfield_present(&mask, compound, index, options.indicator) {
            continue;
        }
        match decode_format(cursor, subfield, options) {
            ItemValue::Fields(decoded) | ItemValue::Variable { fields: decoded, .. } => {
                fields.merge(decoded)
            }
            ItemValue::List(elements) => fields.insert((index + 1).to_string(), Value::List(elements)),
        }
    }

    fields
}

/// Whether `subfields[index]` is announced by the indicator chain.
fn subfield_present(
    mask: &PresenceMask,
    compound: &CompoundFormat,
    index: usize,
    convention: IndicatorConvention,
) -> bool {
    match convention {
        IndicatorConvention::Presence => mask.is_present(index + 1),
        IndicatorConvention::LegacyFxSlot => {
            // The indicator descriptor, when declared, is child 0.
            let child = index + usize::from(compound.indicator.is_some());
            child
                .checked_sub(1)
                .is_some_and(|octet| mask.fx_set(octet))
        }
    }
}
