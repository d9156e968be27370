use alloy_primitives::U256;

/// Encode `data` as a 0x-prefixed hex string.
pub fn hex_encode<T: AsRef<[u8]>>(data: T) -> String {
    let hex = hex::encode(data);

    let mut s = "0x".to_string();
    s.push_str(hex.as_str());
    s
}

/// Encode a 256-bit scalar as a 0x-prefixed, zero-padded 64 digit hex string.
pub fn scalar_to_hex(value: &U256) -> String {
    hex_encode(value.to_be_bytes::<32>())
}

/// Strips a leading `0x` or `0X` from `value`, if present.
pub fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scalar_hex_is_padded() {
        assert_eq!(
            scalar_to_hex(&U256::from(1)),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn strips_either_prefix_case() {
        assert_eq!(strip_hex_prefix("0xAbC"), "AbC");
        assert_eq!(strip_hex_prefix("0XAbC"), "AbC");
        assert_eq!(strip_hex_prefix("AbC"), "AbC");
    }
}
