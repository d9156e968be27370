use account_utils::{credentials_exist, KeyVaultCredentials};
use clap::Parser;
use std::path::PathBuf;
use vaultsig_primitives::RecoveryIdConvention;

#[derive(Debug, Parser, Clone)]
pub struct KeyVaultCliArgs {
    #[arg(
        long,
        value_name = "FILE",
        env = "VAULTSIG_CONFIG",
        help = "YAML file with the vault url, key name and credentials. \
                    Flags given on the command line override its values."
    )]
    config: Option<PathBuf>,

    #[arg(long, value_name = "URL", env = "VAULTSIG_VAULT_URL", help = "The key vault url.")]
    vault_url: Option<String>,

    #[arg(long, value_name = "NAME", env = "VAULTSIG_KEY_NAME", help = "The name of the key.")]
    key_name: Option<String>,

    #[arg(long, value_name = "VERSION", help = "The key version. Defaults to the latest.")]
    key_version: Option<String>,

    #[arg(
        long,
        value_name = "TOKEN",
        env = "VAULTSIG_ACCESS_TOKEN",
        hide_env_values = true,
        help = "A bearer token for the key vault."
    )]
    access_token: Option<String>,

    #[clap(flatten)]
    convention: ConventionCliArgs,
}

impl KeyVaultCliArgs {
    /// Merges the config file, if any, with the command line overrides.
    pub fn credentials(&self) -> eyre::Result<KeyVaultCredentials> {
        let mut credentials = match &self.config {
            Some(path) => {
                if !credentials_exist(path) {
                    eyre::bail!("No credentials file at {}", path.display());
                }
                KeyVaultCredentials::from_file(path)?
            }
            None => {
                let vault_url = self
                    .vault_url
                    .clone()
                    .ok_or_else(|| eyre::eyre!("--vault-url is required without --config"))?;
                let key_name = self
                    .key_name
                    .clone()
                    .ok_or_else(|| eyre::eyre!("--key-name is required without --config"))?;
                KeyVaultCredentials::new(vault_url, key_name)
            }
        };

        if let Some(vault_url) = &self.vault_url {
            credentials.vault_url = vault_url.clone();
        }
        if let Some(key_name) = &self.key_name {
            credentials.key_name = key_name.clone();
        }
        if let Some(key_version) = &self.key_version {
            credentials = credentials.with_key_version(key_version.clone());
        }
        if let Some(token) = &self.access_token {
            credentials = credentials.with_access_token(token.as_str());
        }
        if let Some(convention) = self.convention.convention {
            credentials = credentials.with_recovery_id_convention(convention);
        }

        credentials.validate()?;
        Ok(credentials)
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ConventionCliArgs {
    #[arg(
        long,
        value_name = "CONVENTION",
        help = "How v is encoded: `legacy` (27/28) or `parity` (0/1). Defaults to legacy."
    )]
    pub convention: Option<RecoveryIdConvention>,
}

impl ConventionCliArgs {
    pub fn convention(&self) -> RecoveryIdConvention {
        self.convention.unwrap_or_default()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct OutputArgs {
    #[arg(long, help = "Print the result as JSON.")]
    pub json: bool,
}
