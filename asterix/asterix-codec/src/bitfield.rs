//! Bit-field extraction from fixed blocks.
//!
//! A block is read as one big-endian unsigned container. Bits are numbered
//! from the least significant bit of the last octet (bit 1) upwards.

use asterix_core::{BitField, BitSpan, Value};

/// Reads `width` bits (at most 64) starting at 1-based bit `low` of `block`.
/// Bits beyond the block read as zero.
pub fn bits_at(block: &[u8], low: u16, width: u16) -> u64 {
    let mut value = 0u64;
    for offset in (0..width).rev() {
        value = (value << 1) | u64::from(bit_at(block, low.saturating_add(offset)));
    }
    value
}

fn bit_at(block: &[u8], pos: u16) -> u8 {
    let Some(index) = usize::from(pos).checked_sub(1) else {
        return 0;
    };
    let byte_from_end = index / 8;
    if byte_from_end >= block.len() {
        return 0;
    }
    (block[block.len() - 1 - byte_from_end] >> (index % 8)) & 1
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: u16) -> i64 {
    if bits == 0 {
        return 0;
    }
    if bits >= 64 {
        return value as i64;
    }
    let shift = 64 - u32::from(bits);
    ((value << shift) as i64) >> shift
}

/// Extracts the value of `field` from `block`.
pub fn extract(block: &[u8], field: &BitField) -> Value {
    match field.bits {
        BitSpan::Bit(pos) => Value::UInt(u64::from(bit_at(block, pos))),
        BitSpan::Range { .. } => {
            let width = field.bits.width();
            let raw = bits_at(block, field.bits.low(), width);
            match (field.signed, field.scale) {
                (true, Some(scale)) => Value::Float(sign_extend(raw, width) as f64 * scale),
                (true, None) => Value::Int(sign_extend(raw, width)),
                (false, Some(scale)) => Value::Float(raw as f64 * scale),
                (false, None) => Value::UInt(raw),
            }
        }
    }
}
