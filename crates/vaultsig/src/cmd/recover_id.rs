use alloy_primitives::B256;
use clap::Parser;
use vaultsig_primitives::{canonicalize, resolve_recovery_id, ResolvedSignature, Secp256k1Recovery};

use crate::{
    common::{ConventionCliArgs, OutputArgs},
    utils::{parse_scalar, print_json, print_resolved_signature},
};

#[derive(Debug, Parser)]
#[clap(about = "Find the recovery identifier v of an (r, s) signature for a known signer.")]
pub struct RecoverIdCommand {
    #[arg(long, value_name = "DIGEST", help = "The signed 32-byte digest, hex encoded.")]
    digest: B256,

    #[arg(long, value_name = "R", help = "The r scalar, hex encoded.")]
    r: String,

    #[arg(long, value_name = "S", help = "The s scalar, hex encoded. High values are flipped.")]
    s: String,

    #[arg(long, value_name = "ADDRESS", help = "The address expected to have signed the digest.")]
    address: String,

    #[clap(flatten)]
    convention: ConventionCliArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl RecoverIdCommand {
    pub fn execute(self) -> eyre::Result<()> {
        let resolved = self.resolve()?;
        match self.output.json {
            true => print_json(&resolved),
            false => {
                print_resolved_signature(&resolved);
                Ok(())
            }
        }
    }

    fn resolve(&self) -> eyre::Result<ResolvedSignature> {
        let canonical = canonicalize(parse_scalar(&self.r)?, parse_scalar(&self.s)?)?;
        let resolved = resolve_recovery_id(
            &Secp256k1Recovery,
            &self.digest,
            &canonical,
            &self.address,
            self.convention.convention(),
        )?;
        Ok(resolved)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DIGEST: &str = "0xa1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2";

    fn command(r: &str, s: &str, address: &str, extra: &[&str]) -> RecoverIdCommand {
        let mut argv = vec![
            "recover-id",
            "--digest",
            DIGEST,
            "--r",
            r,
            "--s",
            s,
            "--address",
            address,
        ];
        argv.extend_from_slice(extra);
        RecoverIdCommand::try_parse_from(argv).unwrap()
    }

    #[test]
    fn resolves_v_28() {
        let resolved = command(
            "fa754063b93a288b9a96883fc365efb9aee7ecaf632009baa04fe429e706d50e",
            "6a8971b06cd37b3da4ad04bb1298fda152a41e5c1104fd5d974d5c0a060a5e62",
            "0xE94E130546485b928C9C9b9A5e69EB787172952e",
            &[],
        )
        .resolve()
        .unwrap();
        assert_eq!(resolved.v(), 28);
    }

    #[test]
    fn resolves_v_27_as_parity() {
        let resolved = command(
            "904d320777ceae0232282cbf6da3809a678541cdef7f4f3328242641ceecb0dc",
            "5b7f7afe18221049a1e176a89a60b6c10df8c0e838edb9b2f11ae1fb50a28271",
            "0xe94e130546485b928c9c9b9a5e69eb787172952e",
            &["--convention", "parity"],
        )
        .resolve()
        .unwrap();
        assert_eq!(resolved.v(), 0);
    }

    #[test]
    fn fails_for_unrelated_signer() {
        let result = command(
            "904d320777ceae0232282cbf6da3809a678541cdef7f4f3328242641ceecb0dc",
            "5b7f7afe18221049a1e176a89a60b6c10df8c0e838edb9b2f11ae1fb50a28271",
            "0xd9e57b0f2e81eb2233a4055296be4a74ecf8a4de",
            &[],
        )
        .resolve();
        assert!(result.is_err());
    }
}
