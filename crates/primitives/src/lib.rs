pub use alloy_primitives;
pub use alloy_primitives::{Address, B256, U256};

pub mod core;
pub mod utils;

/// Ethereum address derivation from secp256k1 public keys.
pub mod address;

pub mod consts;

pub mod aliases;

pub mod error;

pub use self::core::{
    recovery::{resolve_recovery_id, RecoverAddress, RecoveryIdConvention, ResolvedSignature},
    signature::{canonicalize, CanonicalSignature, RawSignature},
    util::secp256k1::Secp256k1Recovery,
};
pub use self::error::{MalformedSignature, SignatureError};
