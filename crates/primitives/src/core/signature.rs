use alloy_primitives::U256;
use serde::Serialize;
use tracing::debug;

use crate::{
    consts::{RAW_SIGNATURE_LENGTH, SCALAR_LENGTH, SECP256K1N, SECP256K1N_HALF},
    error::{Component, MalformedSignature},
    utils::hex_encode,
};

/// An `r || s` signature as returned by the remote signer, without a recovery identifier.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawSignature([u8; RAW_SIGNATURE_LENGTH]);

impl RawSignature {
    /// Wraps `bytes`, which must be exactly `r || s`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MalformedSignature> {
        let bytes = <[u8; RAW_SIGNATURE_LENGTH]>::try_from(bytes).map_err(|_| {
            MalformedSignature::InvalidLength { expected: RAW_SIGNATURE_LENGTH, got: bytes.len() }
        })?;
        Ok(Self(bytes))
    }

    /// The big-endian `r` scalar.
    pub fn r(&self) -> U256 {
        U256::from_be_slice(&self.0[..SCALAR_LENGTH])
    }

    /// The big-endian `s` scalar, as sent by the signer.
    pub fn s(&self) -> U256 {
        U256::from_be_slice(&self.0[SCALAR_LENGTH..])
    }

    pub fn split(&self) -> (U256, U256) {
        (self.r(), self.s())
    }

    /// Splits the signature and brings it into low-s form.
    pub fn canonicalize(&self) -> Result<CanonicalSignature, MalformedSignature> {
        let (r, s) = self.split();
        canonicalize(r, s)
    }

    pub fn as_bytes(&self) -> &[u8; RAW_SIGNATURE_LENGTH] {
        &self.0
    }
}

impl TryFrom<&[u8]> for RawSignature {
    type Error = MalformedSignature;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl std::fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RawSignature").field(&hex_encode(self.0)).finish()
    }
}

/// A signature whose `s` lies in the lower half of the scalar field, as required by EIP-2.
///
/// Only obtainable through [`canonicalize`], so `0 < r < N` and `0 < s <= N / 2` always hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalSignature {
    r: U256,
    s: U256,
}

impl CanonicalSignature {
    pub const fn r(&self) -> U256 {
        self.r
    }

    pub const fn s(&self) -> U256 {
        self.s
    }

    /// Returns the `r || s` encoding of the canonical signature.
    pub fn to_bytes(&self) -> [u8; RAW_SIGNATURE_LENGTH] {
        let mut sig = [0u8; RAW_SIGNATURE_LENGTH];
        sig[..SCALAR_LENGTH].copy_from_slice(&self.r.to_be_bytes::<32>());
        sig[SCALAR_LENGTH..].copy_from_slice(&self.s.to_be_bytes::<32>());
        sig
    }
}

/// Brings `(r, s)` into its canonical low-s form.
///
/// Both scalars must lie in `(0, N)`. If `s > N / 2` it is replaced with `N - s`; `r` is never
/// touched.
pub fn canonicalize(r: U256, s: U256) -> Result<CanonicalSignature, MalformedSignature> {
    check_scalar(r, Component::R)?;
    check_scalar(s, Component::S)?;

    if s > SECP256K1N_HALF {
        debug!(s = %s, "flipping high s value");
        // s < N was checked above
        return Ok(CanonicalSignature { r, s: SECP256K1N - s });
    }

    Ok(CanonicalSignature { r, s })
}

fn check_scalar(value: U256, component: Component) -> Result<(), MalformedSignature> {
    if value.is_zero() {
        return Err(MalformedSignature::Zero(component));
    }
    if value >= SECP256K1N {
        return Err(MalformedSignature::OutOfRange(component));
    }
    Ok(())
}
