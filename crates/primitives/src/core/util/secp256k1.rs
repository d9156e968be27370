use ::secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Error, Message, SECP256K1,
};
use alloy_primitives::{Address, B256, U256};

use crate::{
    address::raw_public_key_to_address,
    consts::{RAW_SIGNATURE_LENGTH, SCALAR_LENGTH},
    core::recovery::RecoverAddress,
};

/// [`RecoverAddress`] backed by the libsecp256k1 global context.
///
/// Accepts both bare parities (`0`, `1`) and legacy Ethereum identifiers (`27`, `28`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Recovery;

impl RecoverAddress for Secp256k1Recovery {
    fn recover_address(&self, digest: &B256, r: U256, s: U256, v: u8) -> Option<Address> {
        let y_parity = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            _ => return None,
        };

        let mut sig = [0u8; RAW_SIGNATURE_LENGTH];
        sig[..SCALAR_LENGTH].copy_from_slice(&r.to_be_bytes::<32>());
        sig[SCALAR_LENGTH..].copy_from_slice(&s.to_be_bytes::<32>());

        // NOTE: the underlying error is dropped, callers only care whether a candidate recovers
        // to the expected signer.
        recover_signer_unchecked(&sig, y_parity, &digest.0).ok()
    }
}

/// Recovers the signer of `msg` from a compact `r || s` signature and its y-parity, without
/// checking that `s` is low.
pub fn recover_signer_unchecked(
    sig: &[u8; RAW_SIGNATURE_LENGTH],
    y_parity: u8,
    msg: &[u8; 32],
) -> Result<Address, Error> {
    let recid = RecoveryId::from_i32(y_parity as i32)?;
    let sig = RecoverableSignature::from_compact(sig, recid)?;

    let public = SECP256K1.recover_ecdsa(&Message::from_digest(*msg), &sig)?;
    Ok(raw_public_key_to_address(&public.serialize_uncompressed()[1..]))
}
