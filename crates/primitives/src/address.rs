use alloy_primitives::{keccak256, Address};

use crate::{
    consts::{SCALAR_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH, UNCOMPRESSED_PUBLIC_KEY_TAG},
    error::SignatureError,
    utils::strip_hex_prefix,
};

/// Returns the Ethereum address of an SEC1 uncompressed secp256k1 public key.
///
/// The address is the last 20 bytes of `keccak256(x || y)`. Anything other than a 65-byte key
/// starting with `0x04` is rejected.
pub fn ethereum_address(public_key: &[u8]) -> Result<Address, SignatureError> {
    if public_key.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH {
        return Err(SignatureError::InvalidPublicKey(format!(
            "expected {UNCOMPRESSED_PUBLIC_KEY_LENGTH} bytes, got {}",
            public_key.len()
        )));
    }
    if public_key[0] != UNCOMPRESSED_PUBLIC_KEY_TAG {
        return Err(SignatureError::InvalidPublicKey(format!(
            "expected uncompressed key tag 0x04, got {:#04x}",
            public_key[0]
        )));
    }

    Ok(raw_public_key_to_address(&public_key[1..]))
}

/// Builds an SEC1 uncompressed public key from its affine coordinates.
pub fn public_key_from_coordinates(
    x: &[u8],
    y: &[u8],
) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], SignatureError> {
    if x.len() != SCALAR_LENGTH || y.len() != SCALAR_LENGTH {
        return Err(SignatureError::InvalidPublicKey(format!(
            "expected 32-byte coordinates, got x: {} bytes, y: {} bytes",
            x.len(),
            y.len()
        )));
    }

    let mut key = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
    key[0] = UNCOMPRESSED_PUBLIC_KEY_TAG;
    key[1..1 + SCALAR_LENGTH].copy_from_slice(x);
    key[1 + SCALAR_LENGTH..].copy_from_slice(y);
    Ok(key)
}

/// Compares two hex addresses ignoring letter case and an optional `0x` prefix.
///
/// Checksummed and lower-cased renderings of the same address are equal.
pub fn addresses_match(a: &str, b: &str) -> bool {
    strip_hex_prefix(a.trim()).eq_ignore_ascii_case(strip_hex_prefix(b.trim()))
}

pub(crate) fn raw_public_key_to_address(xy: &[u8]) -> Address {
    Address::from_slice(&keccak256(xy)[12..])
}
