//! FSPEC and compound indicator octet chains.
//!
//! A chain is read octet by octet while the least significant bit (FX) of
//! the last octet is set. The seven remaining bits of every octet are
//! presence bits, numbered from 1 starting at the most significant bit of
//! the first octet:
//!
//! ```text
//! octet 1: [ 1  2  3  4  5  6  7 FX]
//! octet 2: [ 8  9 10 11 12 13 14 FX]
//! ```

use log::trace;

use crate::cursor::Cursor;

const PRESENCE_BITS_PER_OCTET: usize = 7;

/// A parsed presence-bit chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceMask {
    octets: Vec<u8>,
    truncated: bool,
}

impl PresenceMask {
    /// Reads a chain from `cursor`. Running out of data ends the chain and
    /// marks the mask as truncated; it never fails.
    pub fn read(cursor: &mut Cursor) -> Self {
        let mut octets = Vec::with_capacity(1);
        let mut truncated = false;

        loop {
            match cursor.read_octet() {
                Ok(octet) => {
                    octets.push(octet);
                    if octet & 1 == 0 {
                        break;
                    }
                }
                Err(_) => {
                    truncated = true;
                    break;
                }
            }
        }

        trace!("presence chain {octets:02x?} (truncated: {truncated})");
        Self { octets, truncated }
    }

    pub fn octets(&self) -> &[u8] {
        &self.octets
    }

    /// Number of bits in the concatenated chain, FX slots included.
    pub fn bit_len(&self) -> usize {
        self.octets.len() * 8
    }

    /// True when the buffer ended while the chain still announced more octets.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Raw bit `i` of the concatenation, 1-indexed from the most significant
    /// bit of the first octet.
    pub fn is_bit_set(&self, i: usize) -> bool {
        let Some(index) = i.checked_sub(1) else {
            return false;
        };
        self.octets
            .get(index / 8)
            .is_some_and(|octet| octet & (0x80 >> (index % 8)) != 0)
    }

    /// Continuation bit of the 0-based `octet`.
    pub fn fx_set(&self, octet: usize) -> bool {
        self.octets.get(octet).is_some_and(|o| o & 1 != 0)
    }

    /// Whether presence bit `n` (1-based, FX slots skipped) is set.
    pub fn is_present(&self, n: usize) -> bool {
        let Some(index) = n.checked_sub(1) else {
            return false;
        };
        let raw = (index / PRESENCE_BITS_PER_OCTET) * 8 + index % PRESENCE_BITS_PER_OCTET + 1;
        self.is_bit_set(raw)
    }

    /// Set presence bits in ascending order.
    pub fn presence_bits(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.octets.len() * PRESENCE_BITS_PER_OCTET).filter(|&n| self.is_present(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_octet_without_fx() {
        let mut cursor = Cursor::from_slice(&[0b1010_0000, 0xFF]);
        let mask = PresenceMask::read(&mut cursor);
        assert_eq!(cursor.position(), 1);
        assert_eq!(mask.bit_len(), 8);
        assert!(!mask.is_truncated());
        assert_eq!(mask.presence_bits().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn chained_octets_skip_fx_slots() {
        // bits 1 and 7 in octet one, FX set; bit 8 (first of octet two)
        let mut cursor = Cursor::from_slice(&[0b1000_0011, 0b1000_0000]);
        let mask = PresenceMask::read(&mut cursor);
        assert_eq!(cursor.position(), 2);
        assert_eq!(mask.bit_len(), 16);
        assert!(mask.is_bit_set(8));
        assert!(mask.fx_set(0));
        assert!(!mask.fx_set(1));
        assert_eq!(mask.presence_bits().collect::<Vec<_>>(), vec![1, 7, 8]);
    }

    #[test]
    fn truncated_chain_stops_at_end() {
        let mut cursor = Cursor::from_slice(&[0x01, 0x01]);
        let mask = PresenceMask::read(&mut cursor);
        assert!(mask.is_truncated());
        assert_eq!(mask.octets(), &[0x01, 0x01]);
        assert_eq!(mask.presence_bits().count(), 0);
    }

    #[test]
    fn empty_buffer_yields_empty_truncated_mask() {
        let mut cursor = Cursor::from_slice(&[]);
        let mask = PresenceMask::read(&mut cursor);
        assert!(mask.is_truncated());
        assert_eq!(mask.bit_len(), 0);
        assert!(!mask.is_present(1));
        assert!(!mask.is_present(0));
    }
}
