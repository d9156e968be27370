use alloy_primitives::Address;
use clap::Parser;
use vaultsig_primitives::address::ethereum_address;

use crate::{
    common::OutputArgs,
    utils::{parse_hex_bytes, print_field, print_json},
};

#[derive(Debug, Parser)]
#[clap(about = "Derive the Ethereum address of an uncompressed secp256k1 public key.")]
pub struct AddressCommand {
    #[arg(
        value_name = "PUBLIC_KEY",
        help = "The 65-byte public key (0x04 || x || y), hex encoded."
    )]
    public_key: String,

    #[clap(flatten)]
    output: OutputArgs,
}

impl AddressCommand {
    pub fn execute(self) -> eyre::Result<()> {
        let address = self.address()?;
        match self.output.json {
            true => print_json(&serde_json::json!({ "address": address })),
            false => {
                print_field("address", address);
                Ok(())
            }
        }
    }

    fn address(&self) -> eyre::Result<Address> {
        let public_key = parse_hex_bytes(&self.public_key)?;
        Ok(ethereum_address(&public_key)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::address;

    fn command(public_key: &str) -> AddressCommand {
        AddressCommand::try_parse_from(["address", public_key]).unwrap()
    }

    #[test]
    fn derives_address() {
        let cmd = command("0x0409105dfda9045744bb7e0b6b922b4bfcf339406778606ea583d31fc2244108568bfdd37a151612797e61ab1dbbf9e6d82efa66204c654d8585e89dc470923061");
        assert_eq!(cmd.address().unwrap(), address!("d9e57b0f2e81eb2233a4055296be4a74ecf8a4de"));
    }

    #[test]
    fn rejects_truncated_key() {
        let cmd = command("0409105dfda9045744bb7e0b6b922b4bfcf339406778606ea583d31fc2244108568bfdd37a151612797e61ab1dbbf9e6d82efa6");
        assert!(cmd.address().is_err());
    }
}
