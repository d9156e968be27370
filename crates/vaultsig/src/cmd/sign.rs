use alloy_primitives::B256;
use clap::{ArgGroup, Parser};
use colored::Colorize;
use tracing::info;
use vaultsig_signer::KeyVaultSigner;

use crate::{
    common::{KeyVaultCliArgs, OutputArgs},
    utils::{print_json, print_resolved_signature},
};

#[derive(Debug, Parser)]
#[clap(about = "Sign a digest or a personal message with a key vault key.")]
#[command(group(ArgGroup::new("payload").required(true).args(["digest", "message"])))]
pub struct SignCommand {
    #[arg(long, value_name = "DIGEST", help = "A 32-byte digest to sign, hex encoded.")]
    digest: Option<B256>,

    #[arg(long, value_name = "MESSAGE", help = "A message to sign with the EIP-191 prefix.")]
    message: Option<String>,

    #[clap(flatten)]
    vault: KeyVaultCliArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl SignCommand {
    pub async fn execute(self) -> eyre::Result<()> {
        let Self { digest, message, vault, output } = self;

        let credentials = vault.credentials()?;
        let signer = KeyVaultSigner::from_credentials(&credentials)?;

        let address = signer.address().await?;
        info!(%address, key_name = %credentials.key_name, "signing with key vault key");
        if !output.json {
            println!("{}{}", "Signing as: ".bright_cyan(), address.to_string().bold());
        }

        let resolved = match (digest, message) {
            (Some(digest), _) => signer.sign_digest(&digest).await?,
            (None, Some(message)) => signer.sign_message(message.as_bytes()).await?,
            (None, None) => eyre::bail!("Either --digest or --message is required"),
        };

        match output.json {
            true => print_json(&resolved),
            false => {
                print_resolved_signature(&resolved);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_digest() {
        let cmd = SignCommand::try_parse_from([
            "sign",
            "--vault-url",
            "https://my-vault.vault.azure.net",
            "--key-name",
            "eth-signer",
            "--digest",
            "a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2",
        ])
        .unwrap();

        assert_eq!(
            cmd.digest,
            Some(
                "0xa1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2"
                    .parse()
                    .unwrap()
            )
        );
        assert!(cmd.message.is_none());
    }

    #[tokio::test]
    async fn fails_without_credentials() {
        let cmd = SignCommand::try_parse_from([
            "sign",
            "--vault-url",
            "https://my-vault.vault.azure.net",
            "--key-name",
            "eth-signer",
            "--message",
            "hello",
        ])
        .unwrap();

        // no access token, so no request is ever sent
        let err = cmd.execute().await.unwrap_err();
        assert!(err.to_string().contains("Credentials not found"));
    }
}
