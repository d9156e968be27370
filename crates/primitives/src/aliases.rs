use alloy_primitives::B256;

/// The hash of the data being signed. Always 32 bytes.
pub type Digest = B256;

/// A recovery identifier, including whatever offset the target chain adds.
pub type RecoveryId = u8;
