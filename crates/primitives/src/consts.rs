use alloy_primitives::U256;

/// The order of the secp256k1 curve.
///
/// `115792089237316195423570985008687907852837564279074904382605163141518161494337`
pub const SECP256K1N: U256 = U256::from_be_bytes([
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
]);

/// The order of the secp256k1 curve, divided by two. Signatures that should be checked according
/// to EIP-2 should have an S value less than or equal to this.
///
/// `57896044618658097711785492504343953926418782139537452191302581570759080747168`
pub const SECP256K1N_HALF: U256 = U256::from_be_bytes([
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
]);

/// Length of a digest handed to the remote signer.
pub const DIGEST_LENGTH: usize = 32;

/// Length of a single big-endian signature scalar.
pub const SCALAR_LENGTH: usize = 32;

/// Length of the `r || s` signature returned by the remote signer.
pub const RAW_SIGNATURE_LENGTH: usize = 2 * SCALAR_LENGTH;

/// Length of an SEC1 uncompressed public key (`0x04 || x || y`).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Tag byte of an SEC1 uncompressed public key.
pub const UNCOMPRESSED_PUBLIC_KEY_TAG: u8 = 0x04;
