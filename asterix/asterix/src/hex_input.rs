//! Hex text input.

/// Decodes hex text into bytes.
///
/// Whitespace is ignored, a leading `0x`/`0X` is accepted and an odd number
/// of digits is left-padded with `0`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let mut digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.starts_with("0x") || digits.starts_with("0X") {
        digits.drain(..2);
    }
    if digits.len() % 2 != 0 {
        digits.insert(0, '0');
    }
    hex::decode(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_spacing_prefix_and_odd_length() {
        assert_eq!(parse_hex("01 80\nff").unwrap(), vec![0x01, 0x80, 0xFF]);
        assert_eq!(parse_hex("0x0180FF").unwrap(), vec![0x01, 0x80, 0xFF]);
        assert_eq!(parse_hex("18").unwrap(), vec![0x18]);
        assert_eq!(parse_hex("180").unwrap(), vec![0x01, 0x80]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!(
            parse_hex("01zz"),
            Err(hex::FromHexError::InvalidHexCharacter { c: 'z', .. })
        ));
    }
}
