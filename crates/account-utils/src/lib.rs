use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use vaultsig_primitives::RecoveryIdConvention;
use zeroize::Zeroize;

use self::error::{Error, FsError};

pub mod credentials;
pub mod error;
pub mod helpers;

pub use self::credentials::Credential;

/// Provides a new-type wrapper around `String` that is zeroized on `Drop`.
///
/// Useful for ensuring that secret memory is zeroed-out on drop.
#[derive(Clone, PartialEq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
#[serde(transparent)]
pub struct ZeroizeString(String);

impl From<String> for ZeroizeString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ZeroizeString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl ZeroizeString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ZeroizeString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ZeroizeString(<redacted>)")
    }
}

/// Connection and authentication settings for a secp256k1 key held in a key vault.
///
/// Serialized as a YAML file. Exactly one way of authenticating is picked by
/// [`KeyVaultCredentials::credential`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyVaultCredentials {
    pub vault_url: String,
    pub key_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_version: Option<String>,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<ZeroizeString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<ZeroizeString>,
    #[serde(default)]
    pub recovery_id_convention: RecoveryIdConvention,
}

impl KeyVaultCredentials {
    pub fn new(vault_url: impl Into<String>, key_name: impl Into<String>) -> Self {
        Self {
            vault_url: vault_url.into(),
            key_name: key_name.into(),
            key_version: None,
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: None,
            client_secret_path: None,
            client_certificate_path: None,
            access_token: None,
            recovery_id_convention: RecoveryIdConvention::default(),
        }
    }

    /// Loads and validates credentials from the YAML file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|e| Error::UnableToOpenFile(path.to_path_buf(), e))?;
        let credentials: Self = serde_yaml::from_reader(file).map_err(Error::UnableToParseFile)?;
        credentials.validate()?;

        debug!(path = %path.display(), key_name = %credentials.key_name, "loaded key vault credentials");
        Ok(credentials)
    }

    /// Writes the credentials to `path` as YAML, readable only by the owner.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let bytes = serde_yaml::to_string(self).map_err(Error::UnableToEncodeFile)?;
        create_with_600_perms(path, bytes.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.key_name.trim().is_empty() {
            return Err(Error::MissingField("key_name"));
        }
        self.vault_url()?;
        Ok(())
    }

    /// The vault base url, which must use `https`.
    pub fn vault_url(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.vault_url).map_err(|e| Error::InvalidVaultUrl {
            url: self.vault_url.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "https" {
            return Err(Error::InvalidVaultUrl {
                url: self.vault_url.clone(),
                reason: "the vault must be reached over https".to_string(),
            });
        }
        Ok(url)
    }

    pub fn with_key_version(mut self, version: impl Into<String>) -> Self {
        self.key_version = Some(version.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<ZeroizeString>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_client_secret(
        mut self,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<ZeroizeString>,
    ) -> Self {
        self.tenant_id = tenant_id.into();
        self.client_id = client_id.into();
        self.client_secret = Some(secret.into());
        self
    }

    pub fn with_recovery_id_convention(mut self, convention: RecoveryIdConvention) -> Self {
        self.recovery_id_convention = convention;
        self
    }
}

/// Creates a file with `600 (-rw-------)` permissions and writes the specified bytes to file.
pub fn create_with_600_perms<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), FsError> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(FsError::UnableToCreateFile)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perm = file.metadata().map_err(FsError::UnableToRetrieveMetadata)?.permissions();
        perm.set_mode(0o600);
        file.set_permissions(perm).map_err(FsError::UnableToSetPermissions)?;
    }

    file.write_all(bytes).map_err(FsError::UnableToWriteFile)?;
    file.sync_all().map_err(FsError::UnableToWriteFile)?;

    Ok(())
}

/// Returns `true` if a credentials file exists at `path`.
pub fn credentials_exist<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
