//! Hex helpers shared by the command line and the capture format.

/// Parse a 16-bit value written in hex, with or without a `0x` prefix.
pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}

/// Parse an intensity in decimal or `0x`-prefixed hex.
pub fn parse_intensity(s: &str) -> Result<u16, String> {
    if s.starts_with("0x") || s.starts_with("0X") {
        return parse_hex_u16(s);
    }
    s.parse::<u16>()
        .map_err(|e| format!("invalid intensity '{s}': {e}"))
}

/// Parse a byte string such as `"0x20 0x00 0x1C"`, `"20 00 1c"` or
/// `"20,00,1c"`.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let digits = token.trim_start_matches("0x").trim_start_matches("0X");
            u8::from_str_radix(digits, 16).map_err(|e| format!("invalid byte '{token}': {e}"))
        })
        .collect()
}

/// Format bytes the way captures store them: `0x20 0x00 ...`.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ── BDD-style scenario tests ────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ═══ Scenario: VID/PID Hex Parsing ══════════════════════════════════════

    /// GIVEN hex strings with and without the 0x prefix
    /// WHEN parse_hex_u16 is called
    /// THEN both forms return the same value
    #[test]
    fn given_hex_with_or_without_prefix_when_parsed_then_same_value() {
        assert_eq!(parse_hex_u16("0x045E"), Ok(0x045E));
        assert_eq!(parse_hex_u16("045e"), Ok(0x045E));
        assert_eq!(parse_hex_u16("0X02EA"), Ok(0x02EA));
    }

    /// GIVEN a value that does not fit in 16 bits
    /// WHEN parse_hex_u16 is called
    /// THEN it returns an error
    #[test]
    fn given_overflow_hex_when_parsed_then_error_returned() {
        assert!(parse_hex_u16("0x10000").is_err());
        assert!(parse_hex_u16("").is_err());
    }

    // ═══ Scenario: Intensity Parsing ════════════════════════════════════════

    /// GIVEN intensities in decimal and hex
    /// WHEN parse_intensity is called
    /// THEN both notations are accepted
    #[test]
    fn given_decimal_or_hex_intensity_when_parsed_then_value_returned() {
        assert_eq!(parse_intensity("32768"), Ok(0x8000));
        assert_eq!(parse_intensity("0x4000"), Ok(16384));
        assert!(parse_intensity("65536").is_err());
        assert!(parse_intensity("-1").is_err());
    }

    // ═══ Scenario: Report Byte Parsing ══════════════════════════════════════

    /// GIVEN a capture-style byte string
    /// WHEN parse_hex_bytes is called
    /// THEN every byte is returned in order
    #[test]
    fn given_capture_style_bytes_when_parsed_then_bytes_in_order() {
        assert_eq!(
            parse_hex_bytes("0x20 0x00 0x1C"),
            Ok(vec![0x20, 0x00, 0x1C])
        );
        assert_eq!(parse_hex_bytes("20,00, 1c"), Ok(vec![0x20, 0x00, 0x1C]));
        assert_eq!(parse_hex_bytes("  "), Ok(vec![]));
    }

    /// GIVEN a byte string with a bad token
    /// WHEN parse_hex_bytes is called
    /// THEN the error names the token
    #[test]
    fn given_bad_token_when_parsed_then_error_names_token() {
        let err = parse_hex_bytes("0x20 0xZZ").err().unwrap_or_default();
        assert!(err.contains("0xZZ"), "unexpected error: {err}");
        assert!(parse_hex_bytes("0x100").is_err());
    }

    // ═══ Scenario: Formatting ═══════════════════════════════════════════════

    /// GIVEN parsed bytes
    /// WHEN formatted and parsed again
    /// THEN the original bytes come back
    #[test]
    fn given_bytes_when_formatted_then_capture_style_output() {
        let bytes = [0x00, 0x08, 0x00, 0xFF];
        let text = format_hex(&bytes);
        assert_eq!(text, "0x00 0x08 0x00 0xFF");
        assert_eq!(parse_hex_bytes(&text), Ok(bytes.to_vec()));
    }
}
