use colored::Colorize;
use serde::Serialize;
use vaultsig_primitives::{
    utils::{scalar_to_hex, strip_hex_prefix},
    ResolvedSignature, U256,
};

/// Parses a hex string, with or without `0x`, into bytes.
pub fn parse_hex_bytes(value: &str) -> eyre::Result<Vec<u8>> {
    hex::decode(strip_hex_prefix(value.trim()))
        .map_err(|e| eyre::eyre!("Invalid hex value {value:?}: {e}"))
}

/// Parses a hex encoded 256-bit scalar.
pub fn parse_scalar(value: &str) -> eyre::Result<U256> {
    let digits = strip_hex_prefix(value.trim());
    if digits.is_empty() || digits.len() > 64 {
        eyre::bail!("Invalid scalar {value:?}: expected 1 to 64 hex digits");
    }
    U256::from_str_radix(digits, 16).map_err(|e| eyre::eyre!("Invalid scalar {value:?}: {e}"))
}

pub fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_field(name: &str, value: impl std::fmt::Display) {
    println!("{}{}", format!("{name}: ").bright_cyan(), value);
}

pub fn print_resolved_signature(signature: &ResolvedSignature) {
    print_field("r", scalar_to_hex(&signature.r()));
    print_field("s", scalar_to_hex(&signature.s()));
    print_field("v", signature.v());
    print_field("address", signature.recovered_address());
    print_field("signature", signature.to_hex().bold());
}
