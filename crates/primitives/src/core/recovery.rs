use std::{fmt, str::FromStr};

use alloy_primitives::{Address, PrimitiveSignature, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    address::addresses_match,
    aliases::RecoveryId,
    consts::{RAW_SIGNATURE_LENGTH, SCALAR_LENGTH},
    core::signature::CanonicalSignature,
    error::SignatureError,
    utils::hex_encode,
};

/// Public-key recovery capability.
///
/// Returns the address of the key that produced `(r, s)` over `digest` under recovery
/// identifier `v`, or `None` if the candidate does not recover to any key.
#[cfg_attr(test, mockall::automock)]
pub trait RecoverAddress {
    fn recover_address(&self, digest: &B256, r: U256, s: U256, v: RecoveryId) -> Option<Address>;
}

/// How the target chain encodes the recovery identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryIdConvention {
    /// `v ∈ {27, 28}`, as used by legacy Ethereum signatures.
    #[default]
    Legacy,
    /// `v ∈ {0, 1}`, the bare y-parity.
    Parity,
}

impl RecoveryIdConvention {
    pub const fn offset(&self) -> RecoveryId {
        match self {
            RecoveryIdConvention::Legacy => 27,
            RecoveryIdConvention::Parity => 0,
        }
    }

    /// The candidates tried by [`resolve_recovery_id`], in order.
    pub const fn candidates(&self) -> [RecoveryId; 2] {
        [self.offset(), self.offset() + 1]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryIdConvention::Legacy => "legacy",
            RecoveryIdConvention::Parity => "parity",
        }
    }
}

impl fmt::Display for RecoveryIdConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecoveryIdConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "27" => Ok(RecoveryIdConvention::Legacy),
            "parity" | "0" => Ok(RecoveryIdConvention::Parity),
            other => Err(format!("unknown recovery id convention: {other}")),
        }
    }
}

/// A canonical signature together with the recovery identifier that recovers its signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedSignature {
    r: U256,
    s: U256,
    v: RecoveryId,
    #[serde(rename = "address")]
    recovered_address: Address,
    #[serde(skip)]
    convention: RecoveryIdConvention,
}

impl ResolvedSignature {
    pub const fn r(&self) -> U256 {
        self.r
    }

    pub const fn s(&self) -> U256 {
        self.s
    }

    pub const fn v(&self) -> RecoveryId {
        self.v
    }

    /// The signer recovered with [`Self::v`].
    pub const fn recovered_address(&self) -> Address {
        self.recovered_address
    }

    pub const fn convention(&self) -> RecoveryIdConvention {
        self.convention
    }

    /// Whether the y coordinate of the signature's `R` point is odd.
    pub const fn y_parity(&self) -> bool {
        self.v - self.convention.offset() == 1
    }

    /// Returns the joined `r || s || v` encoding.
    pub fn to_bytes(&self) -> [u8; RAW_SIGNATURE_LENGTH + 1] {
        let mut sig = [0u8; RAW_SIGNATURE_LENGTH + 1];
        sig[..SCALAR_LENGTH].copy_from_slice(&self.r.to_be_bytes::<32>());
        sig[SCALAR_LENGTH..RAW_SIGNATURE_LENGTH].copy_from_slice(&self.s.to_be_bytes::<32>());
        sig[RAW_SIGNATURE_LENGTH] = self.v;
        sig
    }

    /// Returns the joined encoding as a 0x-prefixed hex string.
    pub fn to_hex(&self) -> String {
        hex_encode(self.to_bytes())
    }
}

impl From<ResolvedSignature> for PrimitiveSignature {
    fn from(sig: ResolvedSignature) -> Self {
        PrimitiveSignature::new(sig.r, sig.s, sig.y_parity())
    }
}

/// Finds the recovery identifier that the remote signer left out.
///
/// Each candidate of `convention` is tried in order and the first one whose recovered address
/// equals `expected` (ignoring case) wins. `signature` must already be canonical, otherwise the
/// result would not match what a low-s enforcing verifier recovers.
pub fn resolve_recovery_id<R: RecoverAddress + ?Sized>(
    recoverer: &R,
    digest: &B256,
    signature: &CanonicalSignature,
    expected: &str,
    convention: RecoveryIdConvention,
) -> Result<ResolvedSignature, SignatureError> {
    for v in convention.candidates() {
        match recoverer.recover_address(digest, signature.r(), signature.s(), v) {
            Some(address) if addresses_match(&address.to_string(), expected) => {
                trace!(v, %address, "recovered expected signer");
                return Ok(ResolvedSignature {
                    r: signature.r(),
                    s: signature.s(),
                    v,
                    recovered_address: address,
                    convention,
                });
            }
            Some(address) => trace!(v, %address, "candidate recovered another signer"),
            None => trace!(v, "candidate did not recover"),
        }
    }

    warn!(%digest, expected, "no recovery identifier matches the expected address");
    Err(SignatureError::RecoveryMismatch { expected: expected.to_string() })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{core::signature::canonicalize, core::util::secp256k1::Secp256k1Recovery};
    use alloy_primitives::{address, b256};
    use mockall::Sequence;

    const DIGEST: B256 =
        b256!("a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2");
    const EXPECTED: &str = "0xe94e130546485b928c9c9b9a5e69eb787172952e";

    fn signature(r: &str, s: &str) -> CanonicalSignature {
        canonicalize(U256::from_str_radix(r, 16).unwrap(), U256::from_str_radix(s, 16).unwrap())
            .unwrap()
    }

    fn sig_v27() -> CanonicalSignature {
        signature(
            "904d320777ceae0232282cbf6da3809a678541cdef7f4f3328242641ceecb0dc",
            "5b7f7afe18221049a1e176a89a60b6c10df8c0e838edb9b2f11ae1fb50a28271",
        )
    }

    fn sig_v28() -> CanonicalSignature {
        signature(
            "fa754063b93a288b9a96883fc365efb9aee7ecaf632009baa04fe429e706d50e",
            "6a8971b06cd37b3da4ad04bb1298fda152a41e5c1104fd5d974d5c0a060a5e62",
        )
    }

    #[test]
    fn resolves_v_27() {
        let resolved = resolve_recovery_id(
            &Secp256k1Recovery,
            &DIGEST,
            &sig_v27(),
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap();

        assert_eq!(resolved.v(), 27);
        assert!(!resolved.y_parity());
        assert_eq!(
            resolved.recovered_address(),
            address!("e94e130546485b928c9c9b9a5e69eb787172952e")
        );
        assert_eq!(
            resolved.recovered_address().to_string(),
            "0xE94E130546485b928C9C9b9A5e69EB787172952e"
        );
    }

    #[test]
    fn resolves_v_28() {
        let resolved = resolve_recovery_id(
            &Secp256k1Recovery,
            &DIGEST,
            &sig_v28(),
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap();

        assert_eq!(resolved.v(), 28);
        assert!(resolved.y_parity());
        assert_eq!(
            resolved.recovered_address(),
            address!("e94e130546485b928c9c9b9a5e69eb787172952e")
        );
    }

    #[test]
    fn exactly_one_candidate_recovers_expected_signer() {
        let expected = address!("e94e130546485b928c9c9b9a5e69eb787172952e");
        for (sig, v) in [(sig_v27(), 27u8), (sig_v28(), 28u8)] {
            let other = if v == 27 { 28 } else { 27 };
            assert_eq!(
                Secp256k1Recovery.recover_address(&DIGEST, sig.r(), sig.s(), v),
                Some(expected)
            );
            assert_ne!(
                Secp256k1Recovery.recover_address(&DIGEST, sig.r(), sig.s(), other),
                Some(expected)
            );
        }
    }

    #[test]
    fn fails_for_unrelated_address() {
        let err = resolve_recovery_id(
            &Secp256k1Recovery,
            &DIGEST,
            &sig_v27(),
            "0xd9e57b0f2e81eb2233a4055296be4a74ecf8a4de",
            RecoveryIdConvention::Legacy,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SignatureError::RecoveryMismatch {
                expected: "0xd9e57b0f2e81eb2233a4055296be4a74ecf8a4de".to_string()
            }
        );
    }

    #[test]
    fn comparison_ignores_case() {
        for expected in [
            "0xE94E130546485b928C9C9b9A5e69EB787172952e",
            "0xE94E130546485B928C9C9B9A5E69EB787172952E",
            "e94e130546485b928c9c9b9a5e69eb787172952e",
        ] {
            let resolved = resolve_recovery_id(
                &Secp256k1Recovery,
                &DIGEST,
                &sig_v28(),
                expected,
                RecoveryIdConvention::Legacy,
            )
            .unwrap();
            assert_eq!(resolved.v(), 28);
        }
    }

    #[test]
    fn parity_convention_uses_bare_parity() {
        let resolved = resolve_recovery_id(
            &Secp256k1Recovery,
            &DIGEST,
            &sig_v28(),
            EXPECTED,
            RecoveryIdConvention::Parity,
        )
        .unwrap();

        assert_eq!(resolved.v(), 1);
        assert!(resolved.y_parity());
        assert_eq!(resolved.to_bytes()[64], 1);
    }

    #[test]
    fn high_s_resolves_after_canonicalization() {
        let low = sig_v28();
        let high = crate::consts::SECP256K1N - low.s();
        let canonical = canonicalize(low.r(), high).unwrap();

        let resolved = resolve_recovery_id(
            &Secp256k1Recovery,
            &DIGEST,
            &canonical,
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap();
        assert_eq!(resolved.v(), 28);
        assert_eq!(resolved.s(), low.s());
    }

    #[test]
    fn joins_signature() {
        let resolved = resolve_recovery_id(
            &Secp256k1Recovery,
            &DIGEST,
            &sig_v27(),
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap();

        assert_eq!(
            resolved.to_hex(),
            "0x904d320777ceae0232282cbf6da3809a678541cdef7f4f3328242641ceecb0dc\
             5b7f7afe18221049a1e176a89a60b6c10df8c0e838edb9b2f11ae1fb50a28271\
             1b"
        );

        let primitive = PrimitiveSignature::from(resolved);
        assert_eq!(primitive.r(), resolved.r());
        assert_eq!(primitive.s(), resolved.s());
        assert!(!primitive.v());
    }

    #[test]
    fn tries_candidates_in_order() {
        let expected = address!("e94e130546485b928c9c9b9a5e69eb787172952e");
        let other = address!("d9e57b0f2e81eb2233a4055296be4a74ecf8a4de");

        let mut seq = Sequence::new();
        let mut recoverer = MockRecoverAddress::new();
        recoverer
            .expect_recover_address()
            .withf(|_, _, _, v| *v == 27)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(Some(other));
        recoverer
            .expect_recover_address()
            .withf(|_, _, _, v| *v == 28)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(Some(expected));

        let resolved = resolve_recovery_id(
            &recoverer,
            &DIGEST,
            &sig_v28(),
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap();
        assert_eq!(resolved.v(), 28);
    }

    #[test]
    fn stops_at_first_match() {
        let expected = address!("e94e130546485b928c9c9b9a5e69eb787172952e");

        let mut recoverer = MockRecoverAddress::new();
        recoverer
            .expect_recover_address()
            .withf(|_, _, _, v| *v == 27)
            .times(1)
            .return_const(Some(expected));
        recoverer.expect_recover_address().withf(|_, _, _, v| *v == 28).never();

        let resolved = resolve_recovery_id(
            &recoverer,
            &DIGEST,
            &sig_v27(),
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap();
        assert_eq!(resolved.v(), 27);
    }

    #[test]
    fn failed_recoveries_exhaust_into_mismatch() {
        let mut recoverer = MockRecoverAddress::new();
        recoverer.expect_recover_address().times(2).return_const(None);

        let err = resolve_recovery_id(
            &recoverer,
            &DIGEST,
            &sig_v27(),
            EXPECTED,
            RecoveryIdConvention::Legacy,
        )
        .unwrap_err();
        assert!(matches!(err, SignatureError::RecoveryMismatch { .. }));
    }

    #[test]
    fn parses_conventions() {
        assert_eq!("legacy".parse(), Ok(RecoveryIdConvention::Legacy));
        assert_eq!("Parity".parse(), Ok(RecoveryIdConvention::Parity));
        assert!("eip155".parse::<RecoveryIdConvention>().is_err());
        assert_eq!(RecoveryIdConvention::Legacy.candidates(), [27, 28]);
        assert_eq!(RecoveryIdConvention::Parity.candidates(), [0, 1]);
    }
}
