use clap::Parser;
use serde::Serialize;
use vaultsig_primitives::{utils::scalar_to_hex, RawSignature};

use crate::{
    common::OutputArgs,
    utils::{parse_hex_bytes, print_field, print_json},
};

#[derive(Debug, Parser)]
#[clap(about = "Split a raw r || s signature and bring it into low-s form.")]
pub struct CanonicalizeCommand {
    #[arg(value_name = "SIGNATURE", help = "The 64-byte r || s signature, hex encoded.")]
    signature: String,

    #[clap(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Serialize)]
struct CanonicalOutput {
    r: String,
    s: String,
    flipped: bool,
}

impl CanonicalizeCommand {
    pub fn execute(self) -> eyre::Result<()> {
        let canonical = self.canonicalize()?;
        if self.output.json {
            return print_json(&canonical);
        }

        print_field("r", &canonical.r);
        print_field("s", &canonical.s);
        print_field("flipped", canonical.flipped);
        Ok(())
    }

    fn canonicalize(&self) -> eyre::Result<CanonicalOutput> {
        let raw = RawSignature::from_slice(&parse_hex_bytes(&self.signature)?)?;
        let canonical = raw.canonicalize()?;

        Ok(CanonicalOutput {
            r: scalar_to_hex(&canonical.r()),
            s: scalar_to_hex(&canonical.s()),
            flipped: canonical.s() != raw.s(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn command(signature: &str) -> CanonicalizeCommand {
        CanonicalizeCommand::try_parse_from(["canonicalize", signature]).unwrap()
    }

    #[test]
    fn keeps_low_s() {
        let output = command("13aac9c6a526ad400a281835648b57d3f5c63c03544396ce241d6a763a462d265ae2d02a6f99d8671c3c84cd403baa7e8a3e477631d8e7d22aecc4c1e3c96f2a")
            .canonicalize()
            .unwrap();

        assert_eq!(output.r, "0x13aac9c6a526ad400a281835648b57d3f5c63c03544396ce241d6a763a462d26");
        assert_eq!(output.s, "0x5ae2d02a6f99d8671c3c84cd403baa7e8a3e477631d8e7d22aecc4c1e3c96f2a");
        assert!(!output.flipped);
    }

    #[test]
    fn flips_high_s() {
        // s = N - 1
        let output = command("0x0000000000000000000000000000000000000000000000000000000000000001fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140")
            .canonicalize()
            .unwrap();

        assert_eq!(output.s, "0x0000000000000000000000000000000000000000000000000000000000000001");
        assert!(output.flipped);
    }

    #[test]
    fn rejects_short_signature() {
        assert!(command("0x1234").canonicalize().is_err());
    }
}
